use async_trait::async_trait;

use blog_core::domain::Author;
use blog_core::domain::author::MAX_AUTHOR_ID;
use blog_core::error::RepoError;
use blog_core::ports::{AuthorRepository, BaseRepository};

use super::table::{Row, Table};

impl Row for Author {
    fn id(&self) -> Option<i32> {
        self.id
    }

    fn set_id(&mut self, id: i32) {
        self.id = Some(id);
    }

    fn unique_key(&self) -> Option<&str> {
        Some(self.name.as_str())
    }
}

/// In-memory author repository. Names are unique and ids stop at
/// [`MAX_AUTHOR_ID`], like the `authors` table.
pub struct InMemoryAuthorRepository {
    table: Table<Author>,
}

impl InMemoryAuthorRepository {
    pub fn new() -> Self {
        Self {
            table: Table::new("authors").with_max_id(MAX_AUTHOR_ID),
        }
    }
}

impl Default for InMemoryAuthorRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseRepository<Author, i32> for InMemoryAuthorRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<Author>, RepoError> {
        Ok(self.table.get(id).await)
    }

    async fn find_all(&self) -> Result<Vec<Author>, RepoError> {
        Ok(self.table.all().await)
    }

    async fn insert(&self, author: Author) -> Result<Author, RepoError> {
        let saved = self.table.insert(author).await?;
        tracing::debug!(author_id = ?saved.id, "Author stored in memory");
        Ok(saved)
    }

    async fn update(&self, author: Author) -> Result<Author, RepoError> {
        self.table.update(author).await
    }

    async fn delete(&self, id: i32) -> Result<(), RepoError> {
        self.table.delete(id).await
    }
}

#[async_trait]
impl AuthorRepository for InMemoryAuthorRepository {
    async fn find_by_name(&self, name: &str) -> Result<Option<Author>, RepoError> {
        Ok(self
            .table
            .find(|author| author.name == name)
            .await
            .into_iter()
            .next())
    }
}
