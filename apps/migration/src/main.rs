//! Migration CLI tool for the blog schema.
//!
//! Usage:
//!   migration up      - Run all pending migrations
//!   migration down    - Rollback last migration
//!   migration status  - Show migration status
//!   migration fresh   - Drop all tables and re-run migrations
//!
//! The database is taken from `DATABASE_URL` (or `-u <url>`).

use blog_infra::database::migration::Migrator;
use sea_orm_migration::prelude::*;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // The migrator CLI sets up its own tracing
    cli::run_cli(Migrator).await;
}
