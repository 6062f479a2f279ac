use std::sync::Arc;

use crate::domain::author::{
    duplicate_id, duplicate_name, id_above_max, validate_id, validate_name,
};
use crate::domain::{Author, AuthorChanges, NewAuthor};
use crate::error::{DomainError, RepoError};
use crate::ports::AuthorRepository;
use crate::validation::Violations;

const ENTITY: &str = "Author";

/// Validating entry point for author reads and writes.
#[derive(Clone)]
pub struct AuthorService {
    repo: Arc<dyn AuthorRepository>,
}

impl AuthorService {
    pub fn new(repo: Arc<dyn AuthorRepository>) -> Self {
        Self { repo }
    }

    /// Validate and persist a new author.
    ///
    /// Fails with [`DomainError::Validation`] listing every violated rule,
    /// including a taken name or id. A conflicting insert that slips past
    /// the pre-check is rejected by the store as [`DomainError::Duplicate`].
    /// A store that has run out of identities below the maximum reports it
    /// as an `id` violation.
    pub async fn create(&self, new: NewAuthor) -> Result<Author, DomainError> {
        let author = Author::from(new);
        self.check(&author, None).await?;
        self.repo.insert(author).await.map_err(|e| match e {
            RepoError::Check(_) => DomainError::Validation(id_above_max().into()),
            other => other.into(),
        })
    }

    /// Apply `changes` to a stored author, validating the result.
    ///
    /// On any failure the stored record is left untouched.
    pub async fn update(&self, id: i32, changes: AuthorChanges) -> Result<Author, DomainError> {
        let mut author = self.get(id).await?;
        author.apply(changes);
        self.check(&author, Some(id)).await?;
        self.repo.update(author).await.map_err(|e| not_found(e, id))
    }

    pub async fn get(&self, id: i32) -> Result<Author, DomainError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(DomainError::NotFound {
                entity_type: ENTITY,
                id,
            })
    }

    pub async fn find_by_name(&self, name: &str) -> Result<Option<Author>, DomainError> {
        Ok(self.repo.find_by_name(name).await?)
    }

    pub async fn list(&self) -> Result<Vec<Author>, DomainError> {
        Ok(self.repo.find_all().await?)
    }

    pub async fn delete(&self, id: i32) -> Result<(), DomainError> {
        self.repo.delete(id).await.map_err(|e| not_found(e, id))
    }

    /// Field rules plus uniqueness against the stored authors.
    ///
    /// `stored_id` is the identity of the record being updated, which may
    /// keep its own name; `None` when creating.
    async fn check(&self, author: &Author, stored_id: Option<i32>) -> Result<(), DomainError> {
        let mut violations = Violations::new();
        if let Err(errors) = author.validate() {
            violations.extend(errors);
        }

        // Lookups only run for values that are otherwise well formed.
        if validate_name(&author.name).is_ok() {
            if let Some(existing) = self.repo.find_by_name(&author.name).await? {
                if existing.id != stored_id {
                    violations.push(duplicate_name());
                }
            }
        }

        if let (None, Some(id)) = (stored_id, author.id) {
            if validate_id(id).is_ok() && self.repo.find_by_id(id).await?.is_some() {
                violations.push(duplicate_id());
            }
        }

        Ok(violations.finish()?)
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
