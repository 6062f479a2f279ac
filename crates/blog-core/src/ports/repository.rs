use async_trait::async_trait;

use crate::domain::{Author, Category, Post};
use crate::error::RepoError;

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// All entities, ordered by ID.
    async fn find_all(&self) -> Result<Vec<T>, RepoError>;

    /// Insert a new entity. The store assigns an ID when none is set.
    ///
    /// A clash with an existing ID or unique column is a
    /// [`RepoError::Constraint`].
    async fn insert(&self, entity: T) -> Result<T, RepoError>;

    /// Overwrite an existing entity, matched by its ID.
    async fn update(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// Author repository with domain-specific methods.
#[async_trait]
pub trait AuthorRepository: BaseRepository<Author, i32> {
    /// Find an author by exact name.
    async fn find_by_name(&self, name: &str) -> Result<Option<Author>, RepoError>;
}

/// Post repository.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, i32> {
    async fn find_by_category(&self, category: Category) -> Result<Vec<Post>, RepoError>;
}
