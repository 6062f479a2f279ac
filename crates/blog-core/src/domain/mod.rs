//! Domain entities - the core business objects and their field rules.

pub mod author;

pub mod post;

pub use author::{Author, AuthorChanges, NewAuthor};
pub use post::{Category, NewPost, Post, PostChanges};
