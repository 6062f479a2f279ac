use async_trait::async_trait;

use blog_core::domain::{Category, Post};
use blog_core::error::RepoError;
use blog_core::ports::{BaseRepository, PostRepository};

use super::table::{Row, Table};

impl Row for Post {
    fn id(&self) -> Option<i32> {
        self.id
    }

    fn set_id(&mut self, id: i32) {
        self.id = Some(id);
    }
}

/// In-memory post repository.
pub struct InMemoryPostRepository {
    table: Table<Post>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self {
            table: Table::new("posts"),
        }
    }
}

impl Default for InMemoryPostRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseRepository<Post, i32> for InMemoryPostRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<Post>, RepoError> {
        Ok(self.table.get(id).await)
    }

    async fn find_all(&self) -> Result<Vec<Post>, RepoError> {
        Ok(self.table.all().await)
    }

    async fn insert(&self, post: Post) -> Result<Post, RepoError> {
        let saved = self.table.insert(post).await?;
        tracing::debug!(post_id = ?saved.id, "Post stored in memory");
        Ok(saved)
    }

    async fn update(&self, post: Post) -> Result<Post, RepoError> {
        self.table.update(post).await
    }

    async fn delete(&self, id: i32) -> Result<(), RepoError> {
        self.table.delete(id).await
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn find_by_category(&self, category: Category) -> Result<Vec<Post>, RepoError> {
        Ok(self
            .table
            .find(|post| post.category == category.as_str())
            .await)
    }
}
