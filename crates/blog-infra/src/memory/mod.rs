//! In-memory repositories - used when no database is configured, and in tests.
//!
//! Data is lost on process restart.

mod author;
mod post;
mod table;

pub use author::InMemoryAuthorRepository;
pub use post::InMemoryPostRepository;
