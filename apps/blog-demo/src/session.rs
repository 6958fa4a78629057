//! One demonstration pass: seed, list, insert, report.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use blog_core::domain::{BlogWithPosts, NewBlog, NewPost, PostId};
use blog_core::ports::{BlogRepository, PostWriter};
use blog_core::{RepoError, WriteError};
use blog_infra::{DatabaseConfig, SeaOrmBlogRepository, SqlPostWriter, connect, ensure_schema};
use sea_orm::DbConn;

pub const SEED_BLOG_URL: &str = "https://example.com";
pub const DEMO_POST_TITLE: &str = "ADO.NET Post";
pub const DEMO_POST_CONTENT: &str = "Content via ADO.NET";

/// One listed blog, as reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlogSummary {
    pub url: String,
    pub post_count: usize,
}

impl From<&BlogWithPosts> for BlogSummary {
    fn from(entry: &BlogWithPosts) -> Self {
        Self {
            url: entry.blog.url.clone(),
            post_count: entry.post_count(),
        }
    }
}

/// Result of the transactional insert. A rollback is reported, not raised.
#[derive(Debug)]
pub enum InsertOutcome {
    Inserted(PostId),
    RolledBack(WriteError),
}

#[derive(Debug)]
pub struct SessionReport {
    pub blogs: Vec<BlogSummary>,
    pub insert: InsertOutcome,
}

impl fmt::Display for SessionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for blog in &self.blogs {
            writeln!(f, "Blog: {}, Posts Count: {}", blog.url, blog.post_count)?;
        }
        match &self.insert {
            InsertOutcome::Inserted(id) => {
                writeln!(f, "Inserted post via transaction (PostId: {id})")
            }
            InsertOutcome::RolledBack(err) => writeln!(f, "Transaction rolled back: {err}"),
        }
    }
}

/// Connect, run the session and release the pool whatever the outcome.
pub async fn run_session(config: &DatabaseConfig) -> Result<SessionReport, RepoError> {
    let db = Arc::new(connect(config).await?);
    let result = run_with_connection(Arc::clone(&db), config.transaction_timeout).await;

    // The repository and writer are dropped by now, so this is the last handle.
    match Arc::into_inner(db) {
        Some(db) => {
            if let Err(e) = db.close().await {
                tracing::warn!(error = %e, "Failed to close database pool");
            }
        }
        None => tracing::warn!("Database pool still shared, leaving it to drop"),
    }

    result
}

pub async fn run_with_connection(
    db: Arc<DbConn>,
    transaction_timeout: Duration,
) -> Result<SessionReport, RepoError> {
    ensure_schema(&db).await?;

    let repo = SeaOrmBlogRepository::new(Arc::clone(&db));
    let writer = SqlPostWriter::new(db).with_timeout(transaction_timeout);

    drive(&repo, &writer).await
}

/// Seed-if-empty, list, then insert the demo post under the first blog.
pub async fn drive(
    repo: &dyn BlogRepository,
    writer: &dyn PostWriter,
) -> Result<SessionReport, RepoError> {
    if !repo.any_blogs().await? {
        let id = repo.insert_blog(NewBlog::new(SEED_BLOG_URL)?).await?;
        tracing::info!(blog_id = %id, url = SEED_BLOG_URL, "Seeded default blog");
    }

    let listing = repo.list_blogs_with_posts().await?;
    let blogs: Vec<BlogSummary> = listing.iter().map(BlogSummary::from).collect();

    let first = listing
        .first()
        .ok_or_else(|| RepoError::NotFound("no blog to attach the demo post to".to_string()))?;

    let post = NewPost::new(first.blog.id, DEMO_POST_TITLE, DEMO_POST_CONTENT);
    let insert = match writer.insert_post_transactional(post).await {
        Ok(id) => InsertOutcome::Inserted(id),
        Err(err) => InsertOutcome::RolledBack(err),
    };

    Ok(SessionReport { blogs, insert })
}
