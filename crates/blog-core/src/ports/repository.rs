use async_trait::async_trait;

use crate::domain::{BlogId, BlogWithPosts, NewBlog, NewPost, PostId};
use crate::error::{RepoError, WriteError};

/// Typed reads and writes over blogs and their posts.
#[async_trait]
pub trait BlogRepository: Send + Sync {
    /// Whether at least one blog exists.
    async fn any_blogs(&self) -> Result<bool, RepoError>;

    /// Insert a blog and return its generated id.
    async fn insert_blog(&self, blog: NewBlog) -> Result<BlogId, RepoError>;

    /// All blogs with their posts, loaded eagerly.
    ///
    /// Blogs and each blog's posts come back in insertion order.
    async fn list_blogs_with_posts(&self) -> Result<Vec<BlogWithPosts>, RepoError>;

    /// Number of stored posts across all blogs.
    async fn count_posts(&self) -> Result<u64, RepoError>;
}

/// Writes a post inside its own transaction.
#[async_trait]
pub trait PostWriter: Send + Sync {
    /// Commit the insert and return the new id, or roll back and report why.
    async fn insert_post_transactional(&self, post: NewPost) -> Result<PostId, WriteError>;
}
