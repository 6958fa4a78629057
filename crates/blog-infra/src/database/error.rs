//! Translation of SeaORM errors into the domain error taxonomy.

use sea_orm::{DbErr, SqlErr};

use blog_core::{RepoError, WriteFailure};

fn is_connection_error(err: &DbErr) -> bool {
    matches!(err, DbErr::Conn(_) | DbErr::ConnectionAcquire(_))
}

fn constraint_message(err: &DbErr) -> Option<String> {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(msg)) => Some(msg),
        Some(SqlErr::ForeignKeyConstraintViolation(msg)) => Some(msg),
        _ => None,
    }
}

pub(crate) fn repo_error(err: DbErr) -> RepoError {
    if is_connection_error(&err) {
        return RepoError::Connection(err.to_string());
    }
    match constraint_message(&err) {
        Some(msg) => RepoError::Constraint(msg),
        None => RepoError::Query(err.to_string()),
    }
}

pub(crate) fn write_failure(err: &DbErr) -> WriteFailure {
    if is_connection_error(err) {
        WriteFailure::Connection
    } else if constraint_message(err).is_some() {
        WriteFailure::Constraint
    } else {
        WriteFailure::Statement
    }
}

#[cfg(test)]
mod tests {
    use sea_orm::{ConnectionTrait, DbConn, RuntimeErr};

    use super::*;
    use crate::database::{DatabaseConfig, connect, ensure_schema};

    async fn memory_db() -> DbConn {
        let mut config = DatabaseConfig::new("sqlite::memory:");
        config.max_connections = 1;
        config.min_connections = 1;
        config.sqlx_logging = false;
        connect(&config).await.unwrap()
    }

    #[test]
    fn test_connection_errors_map_to_connection() {
        let err = DbErr::Conn(RuntimeErr::Internal("refused".to_string()));
        assert!(matches!(repo_error(err), RepoError::Connection(_)));

        let err = DbErr::Conn(RuntimeErr::Internal("refused".to_string()));
        assert_eq!(write_failure(&err), WriteFailure::Connection);
    }

    #[test]
    fn test_other_errors_map_to_query() {
        let err = DbErr::Custom("boom".to_string());
        assert_eq!(write_failure(&err), WriteFailure::Statement);
        match repo_error(err) {
            RepoError::Query(msg) => assert!(msg.contains("boom")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_unique_violation_maps_to_constraint() {
        let db = memory_db().await;
        db.execute_unprepared("CREATE TABLE tags (name TEXT NOT NULL UNIQUE)")
            .await
            .unwrap();
        db.execute_unprepared("INSERT INTO tags (name) VALUES ('rust')")
            .await
            .unwrap();

        let err = db
            .execute_unprepared("INSERT INTO tags (name) VALUES ('rust')")
            .await
            .unwrap_err();

        assert_eq!(write_failure(&err), WriteFailure::Constraint);
        assert!(matches!(repo_error(err), RepoError::Constraint(_)));
    }

    #[tokio::test]
    async fn test_foreign_key_violation_maps_to_constraint() {
        let db = memory_db().await;
        ensure_schema(&db).await.unwrap();

        let err = db
            .execute_unprepared(
                "INSERT INTO posts (title, content, blog_id) VALUES ('orphan', 'orphan', 42)",
            )
            .await
            .unwrap_err();

        assert_eq!(write_failure(&err), WriteFailure::Constraint);
        assert!(matches!(repo_error(err), RepoError::Constraint(_)));
    }
}
