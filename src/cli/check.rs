//! `scorebook check`: verify the configured database is usable.

use diesel_migrations::MigrationHarness;
use serde_json::json;

use crate::cli::{connect, output};
use crate::config::Config;
use crate::db::{self, MIGRATIONS};
use crate::error::{Error, Result};

pub fn execute(config: &Config) -> Result<()> {
    let url = &config.database.url;
    let mut conn = connect(config)?;
    db::ping(&mut conn)?;
    let applied = db::applied_migrations(&mut conn)?;
    let pending = conn
        .has_pending_migration(MIGRATIONS)
        .map_err(|e| Error::Connection(e.to_string()))?;

    if output::is_json() {
        output::record(
            "check",
            json!({
                "database": url,
                "reachable": true,
                "applied": applied,
                "pending": pending,
            }),
        )?;
        return Ok(());
    }

    output::section("Database Check");
    output::field("Location", url);
    output::success("Connection OK");
    match applied.iter().max() {
        Some(version) => output::field("Schema", version),
        None => output::field("Schema", output::muted("none")),
    }
    if pending {
        output::warning("Pending migrations; run `scorebook init` to apply them");
    } else {
        output::success("Schema is up to date");
    }
    Ok(())
}
