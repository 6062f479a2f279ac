//! # Blog Core
//!
//! The domain layer of the blog.
//! Authors, posts, their validation rules and the use-case services that
//! enforce them before anything reaches a repository.
//! This crate contains pure business logic with zero infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;
pub mod service;
pub mod validation;

pub use error::{DomainError, RepoError};
pub use service::{AuthorService, PostService};
pub use validation::{ValidationError, ValidationErrors};
