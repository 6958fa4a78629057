//! SeaORM entities mapped onto the `blogs` and `posts` relations.

pub mod blog;
pub mod post;
