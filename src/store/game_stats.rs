//! Per-game player statistics.
//!
//! A player has at most one stats row per game, enforced by a unique index
//! on `(game_id, player_id)`. Rows are addressed by that pair.

use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::debug;

use super::last_insert_rowid;
use crate::db::model::{GameStats, GameStatsUpdate, NewGameStats};
use crate::db::schema::game_stats;
use crate::error::Result;

/// Create a zeroed stats row for `player_id` in `game_id`.
///
/// # Errors
/// Fails with a UNIQUE violation if the pair already has a row.
pub fn create_game_stats(conn: &mut SqliteConnection, game_id: i32, player_id: i32) -> Result<GameStats> {
    let row = NewGameStats { game_id, player_id };

    let stats = conn.transaction(|conn| -> QueryResult<GameStats> {
        diesel::insert_into(game_stats::table).values(&row).execute(conn)?;
        let id = last_insert_rowid(conn)?;
        game_stats::table
            .find(id)
            .select(GameStats::as_select())
            .first(conn)
    })?;

    debug!(stats_id = stats.id, game_id, player_id, "Created game stats");
    Ok(stats)
}

/// Stats for one player in one game.
pub fn get_game_stats(
    conn: &mut SqliteConnection,
    game_id: i32,
    player_id: i32,
) -> Result<Option<GameStats>> {
    let stats = game_stats::table
        .filter(game_stats::game_id.eq(game_id))
        .filter(game_stats::player_id.eq(player_id))
        .select(GameStats::as_select())
        .first(conn)
        .optional()?;
    Ok(stats)
}

pub fn get_game_stats_by_id(conn: &mut SqliteConnection, stats_id: i32) -> Result<Option<GameStats>> {
    let stats = game_stats::table
        .find(stats_id)
        .select(GameStats::as_select())
        .first(conn)
        .optional()?;
    Ok(stats)
}

/// Every player's stats line for `game_id`, in insertion order.
pub fn get_game_stats_by_game(conn: &mut SqliteConnection, game_id: i32) -> Result<Vec<GameStats>> {
    let rows = game_stats::table
        .filter(game_stats::game_id.eq(game_id))
        .order(game_stats::id.asc())
        .select(GameStats::as_select())
        .load(conn)?;
    Ok(rows)
}

/// Overwrite the counters set in `update`; others keep their values.
///
/// Returns `Ok(None)` when the pair has no stats row.
pub fn update_game_stats(
    conn: &mut SqliteConnection,
    game_id: i32,
    player_id: i32,
    update: GameStatsUpdate,
) -> Result<Option<GameStats>> {
    let stats = conn.transaction(|conn| -> QueryResult<Option<GameStats>> {
        if update != GameStatsUpdate::default() {
            diesel::update(
                game_stats::table
                    .filter(game_stats::game_id.eq(game_id))
                    .filter(game_stats::player_id.eq(player_id)),
            )
            .set(&update)
            .execute(conn)?;
        }
        game_stats::table
            .filter(game_stats::game_id.eq(game_id))
            .filter(game_stats::player_id.eq(player_id))
            .select(GameStats::as_select())
            .first(conn)
            .optional()
    })?;

    if let Some(stats) = &stats {
        debug!(stats_id = stats.id, game_id, player_id, "Updated game stats");
    }
    Ok(stats)
}

pub fn delete_game_stats(conn: &mut SqliteConnection, stats_id: i32) -> Result<bool> {
    let deleted = conn.transaction(|conn| {
        diesel::delete(game_stats::table.find(stats_id)).execute(conn)
    })?;
    if deleted > 0 {
        debug!(stats_id, "Deleted game stats");
    }
    Ok(deleted > 0)
}
