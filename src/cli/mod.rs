//! CLI module graph and command dispatch.

pub mod check;
pub mod command;
pub mod init;
pub mod output;
pub mod report;

use std::path::Path;

use diesel::r2d2::{ConnectionManager, PooledConnection};
use diesel::SqliteConnection;

use self::command::{Cli, Commands};
use self::init::database_path;
use crate::config::Config;
use crate::db;
use crate::error::{Error, Result};

/// Run the parsed command against `config`.
///
/// Output settings are applied by the caller through [`output::configure`].
///
/// # Errors
/// Returns the first error raised by the command.
pub fn execute(cli: &Cli, config: &Config) -> Result<()> {
    match &cli.command {
        Commands::Init => init::execute(config),
        Commands::Check => check::execute(config),
        Commands::Teams(args) => {
            let mut conn = connect(config)?;
            report::teams(&mut conn, &args.username)
        }
        Commands::Roster(args) => {
            let mut conn = connect(config)?;
            report::roster(&mut conn, args.team_id)
        }
        Commands::BoxScore(args) => {
            let mut conn = connect(config)?;
            report::box_score(&mut conn, args.game_id)
        }
    }
}

/// Check out a connection to an existing database.
///
/// A missing database file is an error; opening it would silently create it.
pub(crate) fn connect(config: &Config) -> Result<PooledConnection<ConnectionManager<SqliteConnection>>> {
    let url = &config.database.url;
    if database_path(url).is_some_and(|path| !Path::exists(path)) {
        return Err(Error::Connection(format!(
            "database {url} does not exist; run `scorebook init` first"
        )));
    }
    let pool = db::create_pool_with(&config.database)?;
    Ok(pool.get()?)
}
