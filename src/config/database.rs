//! Database location and pool sizing.

use serde::Deserialize;

/// Environment variable that overrides `[database].url`.
pub const DATABASE_URL_ENV: &str = "SCOREBOOK_DATABASE_URL";

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// SQLite database URL or file path.
    pub url: String,

    /// Maximum number of pooled connections.
    pub pool_size: u32,

    /// `PRAGMA busy_timeout` applied to every pooled connection, in ms.
    pub busy_timeout_ms: u32,
}

impl DatabaseConfig {
    /// Replace the URL with `SCOREBOOK_DATABASE_URL` when it is set and non-empty.
    pub fn apply_env_override(&mut self) {
        if let Ok(url) = std::env::var(DATABASE_URL_ENV) {
            if !url.trim().is_empty() {
                self.url = url;
            }
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "scorebook.db".into(),
            pool_size: 5,
            busy_timeout_ms: 5000,
        }
    }
}
