//! SeaORM implementation of the blog repository.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, DbConn, EntityTrait, PaginatorTrait, QueryOrder, Set};

use blog_core::RepoError;
use blog_core::domain::{BlogId, BlogWithPosts, NewBlog, Post};
use blog_core::ports::BlogRepository;

use super::entity::blog::{self, Entity as BlogEntity};
use super::entity::post::{self, Entity as PostEntity};
use super::error::repo_error;

/// Blog repository over a shared SeaORM connection.
pub struct SeaOrmBlogRepository {
    db: Arc<DbConn>,
}

impl SeaOrmBlogRepository {
    pub fn new(db: Arc<DbConn>) -> Self {
        Self { db }
    }
}

/// Attach each post to the blog whose id it carries, keeping both orders.
fn group_posts(blogs: Vec<blog::Model>, posts: Vec<post::Model>) -> Vec<BlogWithPosts> {
    let mut by_blog: HashMap<i32, Vec<Post>> = HashMap::new();
    for post in posts {
        by_blog.entry(post.blog_id).or_default().push(post.into());
    }

    blogs
        .into_iter()
        .map(|blog| {
            let posts = by_blog.remove(&blog.blog_id).unwrap_or_default();
            BlogWithPosts {
                blog: blog.into(),
                posts,
            }
        })
        .collect()
}

#[async_trait]
impl BlogRepository for SeaOrmBlogRepository {
    async fn any_blogs(&self) -> Result<bool, RepoError> {
        let first = BlogEntity::find()
            .one(self.db.as_ref())
            .await
            .map_err(repo_error)?;

        Ok(first.is_some())
    }

    async fn insert_blog(&self, new_blog: NewBlog) -> Result<BlogId, RepoError> {
        let model = blog::ActiveModel {
            url: Set(new_blog.into_url()),
            ..Default::default()
        }
        .insert(self.db.as_ref())
        .await
        .map_err(repo_error)?;

        tracing::debug!(blog_id = model.blog_id, url = %model.url, "Blog inserted");
        Ok(model.blog_id.into())
    }

    async fn list_blogs_with_posts(&self) -> Result<Vec<BlogWithPosts>, RepoError> {
        let blogs = BlogEntity::find()
            .order_by_asc(blog::Column::BlogId)
            .all(self.db.as_ref())
            .await
            .map_err(repo_error)?;

        if blogs.is_empty() {
            return Ok(Vec::new());
        }

        // Every blog is loaded, and the foreign key ties every post to one of
        // them, so the second query needs no per-blog parameters.
        let posts = PostEntity::find()
            .order_by_asc(post::Column::PostId)
            .all(self.db.as_ref())
            .await
            .map_err(repo_error)?;

        tracing::debug!(blogs = blogs.len(), posts = posts.len(), "Loaded blogs with posts");
        Ok(group_posts(blogs, posts))
    }

    async fn count_posts(&self) -> Result<u64, RepoError> {
        PostEntity::find().count(self.db.as_ref()).await.map_err(repo_error)
    }
}
