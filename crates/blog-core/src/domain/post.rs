use serde::{Deserialize, Serialize};

use super::{BlogId, PostId};

/// Post snapshot. `blog_id` is a key, not a handle to the owning blog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub blog_id: BlogId,
    pub title: String,
    pub content: String,
}

/// Command to create a post under an existing blog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub blog_id: BlogId,
    pub title: String,
    pub content: String,
}

impl NewPost {
    pub fn new(blog_id: BlogId, title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            blog_id,
            title: title.into(),
            content: content.into(),
        }
    }
}
