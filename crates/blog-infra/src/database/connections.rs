use std::collections::HashMap;
use std::time::Duration;

use sea_orm::{ConnectOptions, ConnectionTrait, Database, DbConn};
use serde::Deserialize;

use blog_core::RepoError;

use super::error::repo_error;

/// Key naming the connection string the application runs against.
pub const DEFAULT_CONNECTION: &str = "DefaultConnection";

/// Named connection strings, as found in a settings file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct ConnectionStrings(HashMap<String, String>);

impl ConnectionStrings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Add or replace a connection string.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ConnectionStrings {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Configuration for the database connection.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout: Duration,
    pub idle_timeout: Duration,
    /// Upper bound for a single transactional write.
    pub transaction_timeout: Duration,
    pub sqlx_logging: bool,
}

impl DatabaseConfig {
    /// Configuration with default pool settings for the given URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: 10,
            min_connections: 1,
            connect_timeout: Duration::from_secs(10),
            idle_timeout: Duration::from_secs(300),
            transaction_timeout: Duration::from_secs(30),
            sqlx_logging: true,
        }
    }

    /// Resolve the `DefaultConnection` entry. Never touches the network.
    pub fn from_connection_strings(strings: &ConnectionStrings) -> Result<Self, RepoError> {
        match strings.get(DEFAULT_CONNECTION).map(str::trim) {
            Some(url) if !url.is_empty() => Ok(Self::new(url)),
            Some(_) => Err(RepoError::Configuration(format!(
                "connection string '{DEFAULT_CONNECTION}' is empty"
            ))),
            None => Err(RepoError::Configuration(format!(
                "connection string '{DEFAULT_CONNECTION}' is not configured"
            ))),
        }
    }
}

/// Open a pooled connection to the configured database.
///
/// The pool is released when the returned handle is closed or dropped.
pub async fn connect(config: &DatabaseConfig) -> Result<DbConn, RepoError> {
    tracing::info!("Connecting to database...");

    let opts = ConnectOptions::new(&config.url)
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .connect_timeout(config.connect_timeout)
        .idle_timeout(config.idle_timeout)
        .sqlx_logging(config.sqlx_logging)
        .to_owned();

    let db = Database::connect(opts).await.map_err(|e| match repo_error(e) {
        RepoError::Query(msg) => RepoError::Connection(msg),
        other => other,
    })?;

    tracing::info!(
        backend = ?db.get_database_backend(),
        "Database connected (pool: {})",
        config.max_connections
    );

    Ok(db)
}
