//! Store wiring - picks the repository backend behind the services.

use std::sync::Arc;

use blog_core::ports::{AuthorRepository, PostRepository};
use blog_core::{AuthorService, PostService};
use blog_infra::DatabaseConfig;
use blog_infra::memory::{InMemoryAuthorRepository, InMemoryPostRepository};

#[cfg(feature = "postgres")]
use blog_infra::database::{DatabaseConnections, schema};
#[cfg(feature = "postgres")]
use blog_infra::{PostgresAuthorRepository, PostgresPostRepository};

/// The validating services over one backend.
#[derive(Clone)]
pub struct Store {
    pub authors: AuthorService,
    pub posts: PostService,
    pub backend: &'static str,
}

impl Store {
    pub fn in_memory() -> Self {
        Self::from_repos(
            Arc::new(InMemoryAuthorRepository::new()),
            Arc::new(InMemoryPostRepository::new()),
            "memory",
        )
    }

    fn from_repos(
        authors: Arc<dyn AuthorRepository>,
        posts: Arc<dyn PostRepository>,
        backend: &'static str,
    ) -> Self {
        Self {
            authors: AuthorService::new(authors),
            posts: PostService::new(posts),
            backend,
        }
    }

    /// Connect to the configured database, falling back to memory when it
    /// is absent or unreachable.
    #[cfg(feature = "postgres")]
    pub async fn connect(db_config: Option<&DatabaseConfig>) -> Self {
        let Some(config) = db_config else {
            tracing::warn!("DATABASE_URL not set. Seeding the in-memory store.");
            return Self::in_memory();
        };

        let connections = match DatabaseConnections::init(config).await {
            Ok(connections) => connections,
            Err(e) => {
                tracing::error!(
                    "Failed to connect to database: {}. Using in-memory fallback.",
                    e
                );
                return Self::in_memory();
            }
        };

        if let Err(e) = schema::create_tables(&connections.main).await {
            tracing::error!("Failed to prepare tables: {}. Using in-memory fallback.", e);
            return Self::in_memory();
        }

        Self::from_repos(
            Arc::new(PostgresAuthorRepository::new(connections.main.clone())),
            Arc::new(PostgresPostRepository::new(connections.main)),
            "postgres",
        )
    }

    #[cfg(not(feature = "postgres"))]
    pub async fn connect(db_config: Option<&DatabaseConfig>) -> Self {
        if db_config.is_some() {
            tracing::warn!("Built without postgres feature - ignoring DATABASE_URL");
        }
        Self::in_memory()
    }
}
