//! # Blog Demo
//!
//! Seeds a blog if none exist, lists blogs with their posts, then inserts a
//! post inside an explicit transaction and reports the outcome.
//!
//! Settings come from `appsettings.json`: the path in `APPSETTINGS_PATH` if set,
//! else the working directory, else the copy beside this crate's manifest.
//! Environment variables override the file.

mod config;
mod session;
mod telemetry;

use config::AppConfig;
use telemetry::TelemetryConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    telemetry::init_telemetry(&TelemetryConfig::from_env());

    let config = AppConfig::load()?;
    let database = config.database_config()?;

    let report = session::run_session(&database).await?;
    print!("{report}");

    Ok(())
}
