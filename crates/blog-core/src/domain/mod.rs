//! Domain entities - read-only snapshots and write commands.

mod blog;
mod id;
mod post;

pub use blog::{Blog, BlogWithPosts, NewBlog};
pub use id::{BlogId, PostId};
pub use post::{NewPost, Post};
