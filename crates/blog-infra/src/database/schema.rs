//! Schema initialization.

use sea_orm::{DbConn, DbErr, EntityTrait, QuerySelect};
use sea_orm_migration::MigratorTrait;

use blog_core::RepoError;

use super::entity::{blog, post};
use super::error::repo_error;
use super::migration::Migrator;

fn schema_error(err: DbErr) -> RepoError {
    match repo_error(err) {
        RepoError::Query(msg) | RepoError::Constraint(msg) => RepoError::Schema(msg),
        other => other,
    }
}

/// Bring the schema to the expected shape, or report why it cannot be.
///
/// Pending migrations are applied first; a database that already matches is
/// left as it is. Existing relations that disagree with the entities are
/// reported as `RepoError::Schema` and never altered.
pub async fn ensure_schema(db: &DbConn) -> Result<(), RepoError> {
    tracing::info!("Applying pending migrations...");
    Migrator::up(db, None).await.map_err(schema_error)?;

    verify_shape(db).await?;
    tracing::info!("Schema is up to date");
    Ok(())
}

/// Select every mapped column of both relations without reading any row.
async fn verify_shape(db: &DbConn) -> Result<(), RepoError> {
    blog::Entity::find()
        .limit(0)
        .all(db)
        .await
        .map_err(|e| RepoError::Schema(format!("blogs does not match the Blog entity: {e}")))?;

    post::Entity::find()
        .limit(0)
        .all(db)
        .await
        .map_err(|e| RepoError::Schema(format!("posts does not match the Post entity: {e}")))?;

    Ok(())
}
