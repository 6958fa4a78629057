//! Integration tests against SQLite databases.

use std::sync::Arc;
use std::time::Duration;

use blog_core::domain::{BlogId, NewBlog, NewPost};
use blog_core::ports::{BlogRepository, PostWriter};
use blog_core::{RepoError, WriteFailure};
use blog_infra::{DatabaseConfig, SeaOrmBlogRepository, SqlPostWriter, connect, ensure_schema};
use sea_orm::{ConnectionTrait, DbConn, TransactionTrait};

/// A single pooled connection keeps every query on the same in-memory database.
async fn open(url: &str) -> DbConn {
    let mut config = DatabaseConfig::new(url);
    config.max_connections = 1;
    config.min_connections = 1;
    config.sqlx_logging = false;

    connect(&config).await.expect("Failed to open database")
}

async fn memory_db() -> DbConn {
    open("sqlite::memory:").await
}

async fn migrated_db() -> Arc<DbConn> {
    let db = memory_db().await;
    ensure_schema(&db).await.expect("Failed to create schema");
    Arc::new(db)
}

#[tokio::test]
async fn test_ensure_schema_is_idempotent() {
    let db = migrated_db().await;
    let repo = SeaOrmBlogRepository::new(Arc::clone(&db));
    repo.insert_blog(NewBlog::new("https://example.com").unwrap())
        .await
        .unwrap();

    ensure_schema(&db).await.expect("Second run should be a no-op");

    let listing = repo.list_blogs_with_posts().await.unwrap();
    assert_eq!(listing.len(), 1);
}

#[tokio::test]
async fn test_ensure_schema_rejects_conflicting_posts_table() {
    let db = memory_db().await;
    db.execute_unprepared("CREATE TABLE posts (id INTEGER PRIMARY KEY, body TEXT)")
        .await
        .unwrap();

    let err = ensure_schema(&db).await.unwrap_err();
    assert!(matches!(err, RepoError::Schema(_)), "got {err:?}");

    // The conflicting table is reported, not replaced.
    db.execute_unprepared("SELECT id, body FROM posts")
        .await
        .expect("Existing table must be left alone");
}

#[tokio::test]
async fn test_any_blogs_after_first_insert() {
    let repo = SeaOrmBlogRepository::new(migrated_db().await);

    assert!(!repo.any_blogs().await.unwrap());

    let id = repo
        .insert_blog(NewBlog::new("https://example.com").unwrap())
        .await
        .unwrap();

    assert!(repo.any_blogs().await.unwrap());
    assert!(id.into_inner() > 0);
}

#[tokio::test]
async fn test_posts_stay_with_their_blog() {
    let db = migrated_db().await;
    let repo = SeaOrmBlogRepository::new(Arc::clone(&db));
    let writer = SqlPostWriter::new(db);

    let first = repo
        .insert_blog(NewBlog::new("https://one.example").unwrap())
        .await
        .unwrap();
    let second = repo
        .insert_blog(NewBlog::new("https://two.example").unwrap())
        .await
        .unwrap();

    for (blog_id, title) in [(second, "b"), (first, "a"), (second, "c")] {
        writer
            .insert_post_transactional(NewPost::new(blog_id, title, "body"))
            .await
            .unwrap();
    }

    let listing = repo.list_blogs_with_posts().await.unwrap();
    assert_eq!(listing.len(), 2);

    assert_eq!(listing[0].blog.id, first);
    let titles: Vec<_> = listing[0].posts.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, ["a"]);

    assert_eq!(listing[1].blog.id, second);
    let titles: Vec<_> = listing[1].posts.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, ["b", "c"]);
    assert!(listing[1].posts.iter().all(|p| p.blog_id == second));
}

#[tokio::test]
async fn test_listing_more_blogs_than_bind_parameters() {
    let db = migrated_db().await;
    // SQLite caps a statement at 32766 bound parameters.
    db.execute_unprepared(
        "INSERT INTO blogs (url) \
         WITH RECURSIVE seq(n) AS (SELECT 1 UNION ALL SELECT n + 1 FROM seq WHERE n < 40000) \
         SELECT 'https://blog' || n || '.example' FROM seq",
    )
    .await
    .unwrap();

    let repo = SeaOrmBlogRepository::new(Arc::clone(&db));
    let writer = SqlPostWriter::new(db);

    let last = repo.list_blogs_with_posts().await.unwrap();
    assert_eq!(last.len(), 40_000);
    let last_id = last[39_999].blog.id;

    writer
        .insert_post_transactional(NewPost::new(last_id, "tail", "tail"))
        .await
        .unwrap();

    let listing = repo.list_blogs_with_posts().await.unwrap();
    assert_eq!(listing.len(), 40_000);
    assert_eq!(listing[39_999].posts.len(), 1);
    assert_eq!(listing.iter().map(|b| b.post_count()).sum::<usize>(), 1);
}

#[tokio::test]
async fn test_transactional_insert_round_trip() {
    let db = migrated_db().await;
    let repo = SeaOrmBlogRepository::new(Arc::clone(&db));
    let writer = SqlPostWriter::new(db);

    let blog_id = repo
        .insert_blog(NewBlog::new("https://example.com").unwrap())
        .await
        .unwrap();

    let post_id = writer
        .insert_post_transactional(NewPost::new(blog_id, "Hello", "World"))
        .await
        .unwrap();

    let listing = repo.list_blogs_with_posts().await.unwrap();
    let post = &listing[0].posts[0];
    assert_eq!(post.id, post_id);
    assert_eq!(post.blog_id, blog_id);
    assert_eq!(post.title, "Hello");
    assert_eq!(post.content, "World");
}

#[tokio::test]
async fn test_unknown_blog_rolls_back_insert() {
    let db = migrated_db().await;
    let repo = SeaOrmBlogRepository::new(Arc::clone(&db));
    let writer = SqlPostWriter::new(db);

    let blog_id = repo
        .insert_blog(NewBlog::new("https://example.com").unwrap())
        .await
        .unwrap();
    writer
        .insert_post_transactional(NewPost::new(blog_id, "kept", "kept"))
        .await
        .unwrap();
    let before = repo.count_posts().await.unwrap();

    let err = writer
        .insert_post_transactional(NewPost::new(BlogId(9_999), "orphan", "orphan"))
        .await
        .unwrap_err();

    assert_eq!(err.kind, WriteFailure::Constraint);
    assert!(err.rolled_back);
    assert!(!err.is_transient());
    assert_eq!(repo.count_posts().await.unwrap(), before);
}

#[tokio::test]
async fn test_insert_blocked_past_timeout_is_rolled_back() {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite://{}?mode=rwc", dir.path().join("blogs.db").display());

    let db = Arc::new(open(&url).await);
    ensure_schema(&db).await.unwrap();
    let repo = SeaOrmBlogRepository::new(Arc::clone(&db));
    let blog_id = repo
        .insert_blog(NewBlog::new("https://example.com").unwrap())
        .await
        .unwrap();

    // A second pool takes the write lock and keeps it past the writer's timeout.
    let other = open(&url).await;
    let lock = other.begin().await.unwrap();
    lock.execute_unprepared("INSERT INTO blogs (url) VALUES ('https://other.example')")
        .await
        .unwrap();
    let release = tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(500)).await;
        lock.rollback().await
    });

    let writer = SqlPostWriter::new(Arc::clone(&db)).with_timeout(Duration::from_millis(100));
    let err = writer
        .insert_post_transactional(NewPost::new(blog_id, "late", "late"))
        .await
        .unwrap_err();
    release.await.unwrap().unwrap();

    assert_eq!(err.kind, WriteFailure::Timeout);
    assert!(err.is_transient());
    assert!(err.rolled_back);
    assert_eq!(repo.count_posts().await.unwrap(), 0);
}
