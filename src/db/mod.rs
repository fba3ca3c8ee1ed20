//! Database layer for persistence using Diesel ORM.
//!
//! Provides connection pooling, embedded migrations, and per-connection
//! SQLite configuration. The access functions in [`crate::store`] take a
//! `&mut SqliteConnection`, so callers choose between a pooled connection
//! and a directly established one.

pub mod model;
pub mod schema;

use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool};
use diesel::SqliteConnection;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use tracing::{debug, info};

use crate::config::database::DatabaseConfig;
use crate::error::{Error, Result};

/// Embedded migrations from the migrations/ directory.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Database connection pool type alias.
pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;

/// Applies connection pragmas whenever the pool opens a connection.
#[derive(Debug, Clone, Copy)]
struct SqlitePragmas {
    busy_timeout_ms: u32,
}

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for SqlitePragmas {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> std::result::Result<(), diesel::r2d2::Error> {
        configure_sqlite_connection(conn, self.busy_timeout_ms)
            .map_err(diesel::r2d2::Error::QueryError)
    }
}

/// Create a connection pool for the given database URL with default sizing.
///
/// # Errors
/// Returns an error if the pool cannot be created.
pub fn create_pool(database_url: &str) -> Result<DbPool> {
    create_pool_with(&DatabaseConfig {
        url: database_url.to_string(),
        ..DatabaseConfig::default()
    })
}

/// Create a connection pool from database configuration.
///
/// # Errors
/// Returns an error if the pool cannot be created.
pub fn create_pool_with(config: &DatabaseConfig) -> Result<DbPool> {
    let manager = ConnectionManager::<SqliteConnection>::new(&config.url);
    let pool = Pool::builder()
        .max_size(config.pool_size)
        .connection_customizer(Box::new(SqlitePragmas {
            busy_timeout_ms: config.busy_timeout_ms,
        }))
        .build(manager)
        .map_err(|e| Error::Connection(e.to_string()))?;
    debug!(url = %config.url, max_size = config.pool_size, "Created connection pool");
    Ok(pool)
}

/// Open a single connection outside any pool, with foreign-key enforcement
/// switched off like pooled connections.
///
/// # Errors
/// Returns an error if the database cannot be opened.
pub fn establish(database_url: &str) -> Result<SqliteConnection> {
    let mut conn =
        SqliteConnection::establish(database_url).map_err(|e| Error::Connection(e.to_string()))?;
    conn.batch_execute(FOREIGN_KEYS_OFF)?;
    Ok(conn)
}

/// Run all pending database migrations on a pooled connection.
///
/// # Errors
/// Returns an error if migrations fail.
pub fn run_migrations(pool: &DbPool) -> Result<Vec<String>> {
    let mut conn = pool.get()?;
    migrate(&mut conn)
}

/// Run all pending migrations on `conn`, returning the versions applied.
///
/// # Errors
/// Returns an error if a migration fails.
pub fn migrate(conn: &mut SqliteConnection) -> Result<Vec<String>> {
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| Error::Connection(e.to_string()))?
        .into_iter()
        .map(|version| version.to_string())
        .collect::<Vec<_>>();
    if !applied.is_empty() {
        info!(count = applied.len(), "Applied database migrations");
    }
    Ok(applied)
}

/// Versions of every migration already applied to `conn`.
///
/// # Errors
/// Returns an error if the migration table cannot be read.
pub fn applied_migrations(conn: &mut SqliteConnection) -> Result<Vec<String>> {
    let versions = conn
        .applied_migrations()
        .map_err(|e| Error::Connection(e.to_string()))?
        .into_iter()
        .map(|version| version.to_string())
        .collect();
    Ok(versions)
}

/// The bundled SQLite enables foreign keys by default; plain deletes must
/// orphan their children instead of failing.
const FOREIGN_KEYS_OFF: &str = "PRAGMA foreign_keys = OFF;";

/// Configure SQLite connection pragmas.
///
/// Turns foreign-key enforcement off and sets the busy timeout.
///
/// # Errors
/// Returns an error if a pragma fails to apply.
pub fn configure_sqlite_connection(
    conn: &mut SqliteConnection,
    busy_timeout_ms: u32,
) -> QueryResult<()> {
    conn.batch_execute(FOREIGN_KEYS_OFF)?;
    conn.batch_execute(&format!("PRAGMA busy_timeout={busy_timeout_ms};"))
}

/// Round-trip a trivial query to prove the connection is usable.
///
/// # Errors
/// Returns an error if the query fails.
pub fn ping(conn: &mut SqliteConnection) -> Result<()> {
    #[derive(QueryableByName)]
    struct One {
        #[diesel(sql_type = diesel::sql_types::Integer)]
        value: i32,
    }

    let row: One = diesel::sql_query("SELECT 1 AS value").get_result(conn)?;
    if row.value != 1 {
        return Err(Error::Connection(format!(
            "unexpected ping result {}",
            row.value
        )));
    }
    Ok(())
}
