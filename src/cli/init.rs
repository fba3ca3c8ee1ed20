//! `scorebook init`: create the database and bring its schema up to date.

use std::fs;
use std::path::Path;

use serde_json::json;
use tracing::info;

use crate::cli::output;
use crate::config::Config;
use crate::db;
use crate::error::Result;

/// Filesystem path behind a SQLite URL, or `None` for in-memory databases.
pub(crate) fn database_path(url: &str) -> Option<&Path> {
    let path = url.strip_prefix("sqlite://").unwrap_or(url);
    let path = path.strip_prefix("file:").unwrap_or(path);
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() || path == ":memory:" {
        return None;
    }
    Some(Path::new(path))
}

pub fn execute(config: &Config) -> Result<()> {
    let url = &config.database.url;
    let path = database_path(url);
    let existed = path.is_some_and(Path::exists);

    if let Some(parent) = path.and_then(Path::parent) {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let mut conn = db::establish(url)?;
    db::configure_sqlite_connection(&mut conn, config.database.busy_timeout_ms)?;
    let applied = db::migrate(&mut conn)?;
    info!(url = %url, existed, applied = applied.len(), "Database initialized");

    if output::is_json() {
        output::record(
            "init",
            json!({
                "database": url,
                "created": !existed,
                "applied": applied,
            }),
        )?;
        return Ok(());
    }

    output::section("Database");
    output::field("Location", url);
    if existed {
        output::note("Using existing database");
    } else {
        output::success("Created database");
    }
    if applied.is_empty() {
        output::success("Schema is up to date");
    } else {
        for version in &applied {
            output::success(&format!("Applied migration {}", output::highlight(version)));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_file_path() {
        assert_eq!(database_path("data/scorebook.db"), Some(Path::new("data/scorebook.db")));
    }

    #[test]
    fn url_prefixes_and_query_are_stripped() {
        assert_eq!(database_path("sqlite://game.db"), Some(Path::new("game.db")));
        assert_eq!(database_path("file:game.db?mode=rwc"), Some(Path::new("game.db")));
    }

    #[test]
    fn memory_database_has_no_path() {
        assert_eq!(database_path(":memory:"), None);
        assert_eq!(database_path("file::memory:?cache=shared"), None);
    }
}
