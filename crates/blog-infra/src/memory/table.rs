//! Keyed row storage shared by the in-memory repositories.

use std::collections::BTreeMap;

use blog_core::error::RepoError;
use tokio::sync::RwLock;

/// A row the table can key and, optionally, hold unique.
pub(crate) trait Row: Clone + Send + Sync {
    fn id(&self) -> Option<i32>;

    fn set_id(&mut self, id: i32);

    /// Column value that must not repeat across rows.
    fn unique_key(&self) -> Option<&str> {
        None
    }
}

struct Rows<T> {
    rows: BTreeMap<i32, T>,
    next_id: i32,
}

/// Rows ordered by id behind an async RwLock.
///
/// Mirrors what a database table gives the repositories: identity
/// assignment, primary key, unique key and id range enforcement.
pub(crate) struct Table<T> {
    name: &'static str,
    max_id: Option<i32>,
    inner: RwLock<Rows<T>>,
}

impl<T: Row> Table<T> {
    pub(crate) fn new(name: &'static str) -> Self {
        Self {
            name,
            max_id: None,
            inner: RwLock::new(Rows {
                rows: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }

    /// Reject any row, requested or assigned, whose id exceeds `max_id`.
    pub(crate) fn with_max_id(mut self, max_id: i32) -> Self {
        self.max_id = Some(max_id);
        self
    }

    pub(crate) async fn get(&self, id: i32) -> Option<T> {
        self.inner.read().await.rows.get(&id).cloned()
    }

    pub(crate) async fn all(&self) -> Vec<T> {
        self.inner.read().await.rows.values().cloned().collect()
    }

    pub(crate) async fn find<F>(&self, predicate: F) -> Vec<T>
    where
        F: Fn(&T) -> bool,
    {
        self.inner
            .read()
            .await
            .rows
            .values()
            .filter(|row| predicate(row))
            .cloned()
            .collect()
    }

    /// Insert a row, assigning the next id when it has none.
    ///
    /// Explicit ids move the sequence past themselves so later assigned
    /// ids never collide with them.
    pub(crate) async fn insert(&self, mut row: T) -> Result<T, RepoError> {
        // Single write lock: the checks and the insert are atomic.
        let mut inner = self.inner.write().await;

        let id = match row.id() {
            Some(id) => id,
            None => inner.next_id,
        };
        if let Some(max_id) = self.max_id.filter(|max_id| id > *max_id) {
            return Err(RepoError::Check(format!(
                "{}: id {} exceeds {}",
                self.name, id, max_id
            )));
        }
        if inner.rows.contains_key(&id) {
            return Err(RepoError::Constraint(format!(
                "{}: id {} already exists",
                self.name, id
            )));
        }
        self.check_unique(&inner.rows, &row, id)?;

        row.set_id(id);
        inner.next_id = inner.next_id.max(id.saturating_add(1));
        inner.rows.insert(id, row.clone());
        Ok(row)
    }

    pub(crate) async fn update(&self, row: T) -> Result<T, RepoError> {
        let id = row.id().ok_or(RepoError::NotFound)?;
        let mut inner = self.inner.write().await;

        if !inner.rows.contains_key(&id) {
            return Err(RepoError::NotFound);
        }
        self.check_unique(&inner.rows, &row, id)?;

        inner.rows.insert(id, row.clone());
        Ok(row)
    }

    pub(crate) async fn delete(&self, id: i32) -> Result<(), RepoError> {
        self.inner
            .write()
            .await
            .rows
            .remove(&id)
            .map(|_| ())
            .ok_or(RepoError::NotFound)
    }

    fn check_unique(&self, rows: &BTreeMap<i32, T>, row: &T, id: i32) -> Result<(), RepoError> {
        let Some(key) = row.unique_key() else {
            return Ok(());
        };
        let taken = rows
            .iter()
            .any(|(other_id, other)| *other_id != id && other.unique_key() == Some(key));
        if taken {
            return Err(RepoError::Constraint(format!(
                "{}: '{}' already exists",
                self.name, key
            )));
        }
        Ok(())
    }
}
