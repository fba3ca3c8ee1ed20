//! Scorebook - data backend for baseball and softball team management.
//!
//! Records users (coaches), the teams they manage, rosters, games, inning
//! line scores, batting orders, per-game player statistics, and the
//! play-by-play events of a game: at-bats, outs and stolen-base attempts.
//!
//! # Modules
//!
//! - [`db`] - Diesel schema, entity types, connection pooling and migrations
//! - [`store`] - Create/read/update/delete functions for every entity
//! - [`password`] - Salted password hashing and verification
//! - [`config`] - Configuration loading from TOML with environment overrides
//! - [`error`] - Error types for the crate
//! - [`cli`] - The `scorebook` operator commands
//!
//! # Example
//!
//! ```no_run
//! use scorebook::db;
//! use scorebook::store::{player, team, user};
//!
//! # fn main() -> scorebook::error::Result<()> {
//! let pool = db::create_pool("scorebook.db")?;
//! db::run_migrations(&pool)?;
//! let mut conn = pool.get()?;
//!
//! let coach = user::create_user(&mut conn, "coach1", "c@x.com", "pw")?;
//! let tigers = team::create_team(&mut conn, "Tigers", Some(coach.id))?;
//! player::create_player(&mut conn, "Joe", tigers.id, Some(7))?;
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod password;
pub mod store;
