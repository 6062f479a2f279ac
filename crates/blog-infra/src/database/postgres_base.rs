use std::marker::PhantomData;

use async_trait::async_trait;
use sea_orm::sqlx::error::{DatabaseError, ErrorKind};
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, ConnectionTrait, DbBackend, DbConn, DbErr, EntityName,
    EntityTrait, IdenStatic, IntoActiveModel, Iterable, PrimaryKeyToColumn, PrimaryKeyTrait,
    QueryOrder, RuntimeErr, Statement,
};

use blog_core::error::RepoError;
use blog_core::ports::BaseRepository;

/// Generic PostgreSQL repository implementation.
pub struct PostgresBaseRepository<E>
where
    E: EntityTrait,
{
    pub(crate) db: DbConn,
    _entity: PhantomData<E>,
}

impl<E> PostgresBaseRepository<E>
where
    E: EntityTrait,
{
    pub fn new(db: DbConn) -> Self {
        Self {
            db,
            _entity: PhantomData,
        }
    }
}

/// The driver-level error behind a failed statement, if the database
/// produced one.
fn database_error(err: &DbErr) -> Option<&(dyn DatabaseError + 'static)> {
    match err {
        DbErr::Exec(RuntimeErr::SqlxError(e)) | DbErr::Query(RuntimeErr::SqlxError(e)) => {
            e.as_database_error()
        }
        _ => None,
    }
}

/// Translate a write failure, keeping unique and check constraint clashes
/// apart from other query errors.
pub(crate) fn write_error(err: DbErr) -> RepoError {
    if let Some(db_err) = database_error(&err) {
        match db_err.kind() {
            ErrorKind::UniqueViolation => return RepoError::Constraint(db_err.message().to_owned()),
            ErrorKind::CheckViolation => return RepoError::Check(db_err.message().to_owned()),
            _ => {}
        }
    }
    match err {
        DbErr::RecordNotFound(_) | DbErr::RecordNotUpdated => RepoError::NotFound,
        DbErr::Conn(e) => RepoError::Connection(e.to_string()),
        other => RepoError::Query(other.to_string()),
    }
}

pub(crate) fn read_error(err: DbErr) -> RepoError {
    match err {
        DbErr::Conn(e) => RepoError::Connection(e.to_string()),
        other => RepoError::Query(other.to_string()),
    }
}

impl<E> PostgresBaseRepository<E>
where
    E: EntityTrait,
{
    /// Move the id sequence past the largest stored id.
    ///
    /// A row inserted with a caller-chosen id leaves the serial sequence
    /// behind; without this a later generated id could collide with it.
    pub(crate) async fn sync_sequence(&self) -> Result<(), RepoError> {
        let backend = self.db.get_database_backend();
        if backend != DbBackend::Postgres {
            return Ok(());
        }
        let Some(key) = E::PrimaryKey::iter().next() else {
            return Ok(());
        };

        let table = E::default().table_name().to_owned();
        let column = key.into_column().as_str().to_owned();
        let sql = format!(
            "SELECT setval(pg_get_serial_sequence('{table}', '{column}'), \
             (SELECT MAX(\"{column}\") FROM \"{table}\"))"
        );

        self.db
            .execute(Statement::from_string(backend, sql))
            .await
            .map_err(write_error)?;
        tracing::debug!(table = %table, "Id sequence synced");
        Ok(())
    }
}

#[async_trait]
impl<E, T, ID> BaseRepository<T, ID> for PostgresBaseRepository<E>
where
    E: EntityTrait,
    E::Model: IntoActiveModel<E::ActiveModel> + Sync + Send,
    E::ActiveModel: ActiveModelTrait<Entity = E> + ActiveModelBehavior + Send + Sync,
    E::PrimaryKey: PrimaryKeyTrait<ValueType = ID>,
    E::Column: Send + Sync,
    ID: Send + Sync + Into<sea_orm::Value> + Clone + Copy + 'static,
    T: From<E::Model> + Into<E::ActiveModel> + Send + Sync + 'static,
{
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError> {
        let result = E::find_by_id(id).one(&self.db).await.map_err(read_error)?;

        Ok(result.map(Into::into))
    }

    async fn find_all(&self) -> Result<Vec<T>, RepoError> {
        let mut query = E::find();
        for key in E::PrimaryKey::iter() {
            query = query.order_by_asc(key.into_column());
        }
        let result = query.all(&self.db).await.map_err(read_error)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn insert(&self, entity: T) -> Result<T, RepoError> {
        let active_model: E::ActiveModel = entity.into();
        let explicit_id = active_model.get_primary_key_value().is_some();
        let model = active_model.insert(&self.db).await.map_err(write_error)?;

        if explicit_id {
            self.sync_sequence().await?;
        }

        Ok(model.into())
    }

    async fn update(&self, entity: T) -> Result<T, RepoError> {
        let active_model: E::ActiveModel = entity.into();
        let model = active_model.update(&self.db).await.map_err(write_error)?;

        Ok(model.into())
    }

    async fn delete(&self, id: ID) -> Result<(), RepoError> {
        let result = E::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(write_error)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        Ok(())
    }
}
