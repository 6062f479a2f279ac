//! Seed file loading and application.

use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

use blog_core::DomainError;
use blog_core::domain::{NewAuthor, NewPost};

use crate::store::Store;

/// Bundled sample data used when no seed file is configured.
const SAMPLE: &str = include_str!("../data/sample.json");

/// Records to load, in the order they are applied.
#[derive(Debug, Default, Deserialize)]
pub struct SeedFile {
    #[serde(default)]
    pub authors: Vec<NewAuthor>,
    #[serde(default)]
    pub posts: Vec<NewPost>,
}

impl SeedFile {
    pub fn parse(json: &str) -> anyhow::Result<Self> {
        serde_json::from_str(json).context("invalid seed file")
    }

    pub fn read(path: &Path) -> anyhow::Result<Self> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("failed to read seed file {}", path.display()))?;
        Self::parse(&json)
    }

    pub fn sample() -> anyhow::Result<Self> {
        Self::parse(SAMPLE)
    }
}

/// A record the store refused.
#[derive(Debug)]
pub struct Rejection {
    pub entity: &'static str,
    /// Position in the seed file.
    pub index: usize,
    pub error: DomainError,
}

/// Outcome of applying a seed file.
#[derive(Debug, Default)]
pub struct SeedReport {
    pub authors_created: usize,
    pub posts_created: usize,
    pub rejected: Vec<Rejection>,
}

/// Create every record of `seed`, continuing past rejected ones.
pub async fn apply(store: &Store, seed: SeedFile) -> SeedReport {
    let mut report = SeedReport::default();

    for (index, author) in seed.authors.into_iter().enumerate() {
        let name = author.name.clone();
        match store.authors.create(author).await {
            Ok(saved) => {
                tracing::debug!(author_id = ?saved.id, author_name = %name, "Author created");
                report.authors_created += 1;
            }
            Err(error) => {
                tracing::warn!(index, author_name = %name, %error, "Author rejected");
                report.rejected.push(Rejection {
                    entity: "author",
                    index,
                    error,
                });
            }
        }
    }

    for (index, post) in seed.posts.into_iter().enumerate() {
        let title = post.title.clone();
        match store.posts.create(post).await {
            Ok(saved) => {
                tracing::debug!(post_id = ?saved.id, post_title = %title, "Post created");
                report.posts_created += 1;
            }
            Err(error) => {
                tracing::warn!(index, post_title = %title, %error, "Post rejected");
                report.rejected.push(Rejection {
                    entity: "post",
                    index,
                    error,
                });
            }
        }
    }

    report
}
