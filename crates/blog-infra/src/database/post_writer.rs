//! Post insert over hand-written SQL inside an explicit transaction.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use sea_orm::{
    ConnectionTrait, DatabaseTransaction, DbBackend, DbConn, DbErr, Statement, TransactionTrait,
    Value,
};

use blog_core::domain::{NewPost, PostId};
use blog_core::ports::PostWriter;
use blog_core::{WriteError, WriteFailure};

use super::error::write_failure;

/// Writes posts one transaction at a time.
pub struct SqlPostWriter {
    db: Arc<DbConn>,
    timeout: Duration,
}

impl SqlPostWriter {
    pub fn new(db: Arc<DbConn>) -> Self {
        Self {
            db,
            timeout: Duration::from_secs(30),
        }
    }

    /// Bound the insert statement; elapsing it rolls the transaction back.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

fn db_write_error(err: &DbErr) -> WriteError {
    WriteError::new(write_failure(err), err.to_string())
}

fn insert_statement(backend: DbBackend, post: &NewPost) -> Statement {
    let sql = match backend {
        DbBackend::Postgres => {
            "INSERT INTO posts (title, content, blog_id) VALUES ($1, $2, $3) RETURNING post_id"
        }
        DbBackend::Sqlite => {
            "INSERT INTO posts (title, content, blog_id) VALUES (?, ?, ?) RETURNING post_id"
        }
        DbBackend::MySql => "INSERT INTO posts (title, content, blog_id) VALUES (?, ?, ?)",
    };

    Statement::from_sql_and_values(
        backend,
        sql,
        [
            Value::from(post.title.as_str()),
            Value::from(post.content.as_str()),
            Value::from(post.blog_id.into_inner()),
        ],
    )
}

async fn execute_insert(txn: &DatabaseTransaction, post: &NewPost) -> Result<PostId, DbErr> {
    let backend = txn.get_database_backend();
    let stmt = insert_statement(backend, post);

    if backend == DbBackend::MySql {
        let result = txn.execute(stmt).await?;
        let id = i32::try_from(result.last_insert_id())
            .map_err(|_| DbErr::Custom("post_id does not fit in i32".to_string()))?;
        return Ok(PostId(id));
    }

    let row = txn.query_one(stmt).await?.ok_or(DbErr::RecordNotInserted)?;
    let id: i32 = row.try_get("", "post_id")?;
    Ok(PostId(id))
}

#[async_trait]
impl PostWriter for SqlPostWriter {
    async fn insert_post_transactional(&self, post: NewPost) -> Result<PostId, WriteError> {
        let txn = self.db.begin().await.map_err(|e| db_write_error(&e))?;

        let outcome = match tokio::time::timeout(self.timeout, execute_insert(&txn, &post)).await {
            Ok(Ok(id)) => Ok(id),
            Ok(Err(e)) => Err(db_write_error(&e)),
            Err(_) => Err(WriteError::new(
                WriteFailure::Timeout,
                format!("insert did not complete within {:?}", self.timeout),
            )),
        };

        match outcome {
            Ok(id) => {
                txn.commit().await.map_err(|e| db_write_error(&e))?;
                tracing::info!(post_id = %id, blog_id = %post.blog_id, "Post committed");
                Ok(id)
            }
            Err(err) => {
                let rolled_back = match txn.rollback().await {
                    Ok(()) => true,
                    Err(e) => {
                        tracing::error!(error = %e, "Rollback failed");
                        false
                    }
                };
                tracing::warn!(reason = %err.reason, blog_id = %post.blog_id, "Transaction rolled back");
                Err(err.rolled_back(rolled_back))
            }
        }
    }
}
