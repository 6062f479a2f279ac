//! Use-case services.
//!
//! Services are the only path that writes records: every create or update
//! runs the entity's full validation, plus the checks that need the stored
//! collection, before the repository sees the record.

mod author_service;
mod post_service;

pub use author_service::AuthorService;
pub use post_service::PostService;
