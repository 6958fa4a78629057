use serde::{Deserialize, Serialize};

use super::{BlogId, Post};
use crate::error::RepoError;

/// Blog snapshot - as read from storage. Changing it persists nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Blog {
    pub id: BlogId,
    pub url: String,
}

/// A blog together with its posts, in insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogWithPosts {
    pub blog: Blog,
    pub posts: Vec<Post>,
}

impl BlogWithPosts {
    pub fn post_count(&self) -> usize {
        self.posts.len()
    }
}

/// Command to create a blog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBlog {
    url: String,
}

impl NewBlog {
    /// Create a blog command. The URL is required and may not be blank.
    pub fn new(url: impl Into<String>) -> Result<Self, RepoError> {
        let url = url.into();
        if url.trim().is_empty() {
            return Err(RepoError::Constraint("Blog url is required".to_string()));
        }
        Ok(Self { url })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn into_url(self) -> String {
        self.url
    }
}
