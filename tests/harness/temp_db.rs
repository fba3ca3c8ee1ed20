use std::path::{Path, PathBuf};

use diesel::r2d2::{ConnectionManager, PooledConnection};
use diesel::SqliteConnection;
use scorebook::config::database::DatabaseConfig;
use scorebook::db::{create_pool_with, run_migrations, DbPool};
use tempfile::TempDir;

pub type Conn = PooledConnection<ConnectionManager<SqliteConnection>>;

/// Migrated SQLite database in a temporary directory, removed on drop.
pub struct TempDb {
    dir: TempDir,
    path: PathBuf,
    pool: DbPool,
}

impl TempDb {
    pub fn create(name: &str) -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join(format!("scorebook-{name}.db"));

        let pool = create_pool_with(&DatabaseConfig {
            url: path.display().to_string(),
            pool_size: 4,
            busy_timeout_ms: 2_000,
        })
        .expect("create sqlite pool");
        run_migrations(&pool).expect("run migrations");

        Self { dir, path, pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    pub fn conn(&self) -> Conn {
        self.pool.get().expect("get sqlite connection")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn dir(&self) -> &Path {
        self.dir.path()
    }
}
