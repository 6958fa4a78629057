//! Database access: connection, schema, repository and transactional writer.

mod connections;
mod error;
mod post_writer;
mod repository;
mod schema;

pub mod entity;
pub mod migration;

pub use connections::{ConnectionStrings, DEFAULT_CONNECTION, DatabaseConfig, connect};
pub use post_writer::SqlPostWriter;
pub use repository::SeaOrmBlogRepository;
pub use schema::ensure_schema;
