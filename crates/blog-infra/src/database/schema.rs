//! Table creation from the SeaORM entities.

use sea_orm::sea_query::{Expr, TableCreateStatement};
use sea_orm::{ConnectionTrait, DbBackend, DbConn, DbErr, EntityName, EntityTrait, Schema};

use blog_core::domain::author::MAX_AUTHOR_ID;

use super::entity::{author, post};

/// Create the `authors` and `posts` tables if they do not exist yet.
///
/// `authors.name` gets its unique constraint here, which is what rejects a
/// duplicate name that raced past the service pre-check.
pub async fn create_tables(db: &DbConn) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    execute(db, author::Entity, &authors_table(backend)).await?;
    execute(db, post::Entity, &table_statement(backend, post::Entity)).await?;
    Ok(())
}

/// `authors`, with ids bounded by [`MAX_AUTHOR_ID`] so the sequence cannot
/// hand out a larger one.
fn authors_table(backend: DbBackend) -> TableCreateStatement {
    let mut statement = table_statement(backend, author::Entity);
    statement.check(Expr::col(author::Column::Id).lte(MAX_AUTHOR_ID));
    statement
}

fn table_statement<E>(backend: DbBackend, entity: E) -> TableCreateStatement
where
    E: EntityTrait,
{
    let mut statement = Schema::new(backend).create_table_from_entity(entity);
    statement.if_not_exists();
    statement
}

async fn execute<E>(db: &DbConn, entity: E, statement: &TableCreateStatement) -> Result<(), DbErr>
where
    E: EntityTrait,
{
    let backend = db.get_database_backend();
    db.execute(backend.build(statement)).await?;
    tracing::info!(table = %entity.table_name(), "Table ready");
    Ok(())
}
