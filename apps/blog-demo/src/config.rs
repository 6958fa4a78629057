//! Application configuration loaded from the settings file and environment.

use std::path::{Path, PathBuf};
use std::time::Duration;
use std::{env, fs, io};

use blog_core::RepoError;
use blog_infra::database::{ConnectionStrings, DEFAULT_CONNECTION, DatabaseConfig};
use serde::Deserialize;

/// Settings file name, looked up by [`settings_path`].
pub const SETTINGS_FILE: &str = "appsettings.json";

/// `APPSETTINGS_PATH` wins, then the working directory, then the file shipped
/// next to this crate's manifest.
pub fn settings_path(explicit: Option<String>) -> PathBuf {
    if let Some(path) = explicit {
        return PathBuf::from(path);
    }
    let local = PathBuf::from(SETTINGS_FILE);
    if local.is_file() {
        return local;
    }
    Path::new(env!("CARGO_MANIFEST_DIR")).join(SETTINGS_FILE)
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct SettingsFile {
    #[serde(default)]
    connection_strings: ConnectionStrings,
}

/// Application configuration. Built once at startup.
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub connection_strings: ConnectionStrings,
    pub max_connections: Option<u32>,
    pub min_connections: Option<u32>,
    pub connect_timeout_secs: Option<u64>,
    pub transaction_timeout_secs: Option<u64>,
}

impl AppConfig {
    /// Load the settings file, then let environment variables override it.
    pub fn load() -> Result<Self, RepoError> {
        let path = settings_path(env::var("APPSETTINGS_PATH").ok());
        tracing::debug!(path = %path.display(), "Loading settings");

        let mut config = Self::from_file(&path)?;
        config.apply_env(|key| env::var(key).ok());
        Ok(config)
    }

    /// A missing file yields an empty configuration; a malformed one is an error.
    pub fn from_file(path: &Path) -> Result<Self, RepoError> {
        match fs::read_to_string(path) {
            Ok(raw) => Self::from_json(&raw).map_err(|e| match e {
                RepoError::Configuration(msg) => {
                    RepoError::Configuration(format!("{}: {msg}", path.display()))
                }
                other => other,
            }),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No settings file, using environment only");
                Ok(Self::default())
            }
            Err(e) => Err(RepoError::Configuration(format!(
                "cannot read {}: {e}",
                path.display()
            ))),
        }
    }

    pub fn from_json(raw: &str) -> Result<Self, RepoError> {
        let settings: SettingsFile = serde_json::from_str(raw)
            .map_err(|e| RepoError::Configuration(format!("malformed settings: {e}")))?;

        Ok(Self {
            connection_strings: settings.connection_strings,
            ..Self::default()
        })
    }

    /// Apply overrides.
    ///
    /// `ConnectionStrings__DefaultConnection` replaces the file entry;
    /// `DATABASE_URL` is used only when neither provides one.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let key = format!("ConnectionStrings__{DEFAULT_CONNECTION}");
        if let Some(url) = lookup(&key) {
            self.connection_strings.set(DEFAULT_CONNECTION, url);
        } else if self.connection_strings.get(DEFAULT_CONNECTION).is_none() {
            if let Some(url) = lookup("DATABASE_URL") {
                self.connection_strings.set(DEFAULT_CONNECTION, url);
            }
        }

        let parsed = |name: &str| -> Option<u32> { lookup(name).and_then(|s| s.parse().ok()) };
        self.max_connections = parsed("DB_MAX_CONNECTIONS").or(self.max_connections);
        self.min_connections = parsed("DB_MIN_CONNECTIONS").or(self.min_connections);
        self.connect_timeout_secs = lookup("DB_CONNECT_TIMEOUT_SECS")
            .and_then(|s| s.parse().ok())
            .or(self.connect_timeout_secs);
        self.transaction_timeout_secs = lookup("DB_TRANSACTION_TIMEOUT_SECS")
            .and_then(|s| s.parse().ok())
            .or(self.transaction_timeout_secs);
    }

    /// Resolve the database configuration; fails before any connection is attempted.
    pub fn database_config(&self) -> Result<DatabaseConfig, RepoError> {
        let mut config = DatabaseConfig::from_connection_strings(&self.connection_strings)?;

        if let Some(max) = self.max_connections {
            config.max_connections = max;
        }
        if let Some(min) = self.min_connections {
            config.min_connections = min;
        }
        if let Some(secs) = self.connect_timeout_secs {
            config.connect_timeout = Duration::from_secs(secs);
        }
        if let Some(secs) = self.transaction_timeout_secs {
            config.transaction_timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }
}
