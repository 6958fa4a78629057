//! # Blog Infrastructure
//!
//! Concrete implementations of the ports defined in `blog-core`, built on SeaORM.
//!
//! ## Feature Flags
//!
//! - `postgres` (default) - PostgreSQL driver
//! - `sqlite` - SQLite driver

pub mod database;

pub use database::{
    ConnectionStrings, DatabaseConfig, SeaOrmBlogRepository, SqlPostWriter, connect,
    ensure_schema,
};
