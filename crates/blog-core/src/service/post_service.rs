use std::sync::Arc;

use crate::domain::{Category, NewPost, Post, PostChanges};
use crate::error::{DomainError, RepoError};
use crate::ports::PostRepository;

const ENTITY: &str = "Post";

/// Validating entry point for post reads and writes.
#[derive(Clone)]
pub struct PostService {
    repo: Arc<dyn PostRepository>,
}

impl PostService {
    pub fn new(repo: Arc<dyn PostRepository>) -> Self {
        Self { repo }
    }

    /// Validate and persist a new post. The store assigns its id.
    pub async fn create(&self, new: NewPost) -> Result<Post, DomainError> {
        let post = Post::from(new);
        post.validate()?;
        Ok(self.repo.insert(post).await?)
    }

    /// Apply `changes` to a stored post, validating the result.
    ///
    /// On any failure the stored record is left untouched.
    pub async fn update(&self, id: i32, changes: PostChanges) -> Result<Post, DomainError> {
        let mut post = self.get(id).await?;
        post.apply(changes);
        post.validate()?;
        self.repo.update(post).await.map_err(|e| not_found(e, id))
    }

    pub async fn get(&self, id: i32) -> Result<Post, DomainError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(DomainError::NotFound {
                entity_type: ENTITY,
                id,
            })
    }

    pub async fn list(&self) -> Result<Vec<Post>, DomainError> {
        Ok(self.repo.find_all().await?)
    }

    pub async fn list_by_category(&self, category: Category) -> Result<Vec<Post>, DomainError> {
        Ok(self.repo.find_by_category(category).await?)
    }

    pub async fn delete(&self, id: i32) -> Result<(), DomainError> {
        self.repo.delete(id).await.map_err(|e| not_found(e, id))
    }
}

fn not_found(err: RepoError, id: i32) -> DomainError {
    match err {
        RepoError::NotFound => DomainError::NotFound {
            entity_type: ENTITY,
            id,
        },
        other => other.into(),
    }
}
