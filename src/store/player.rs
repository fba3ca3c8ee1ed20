//! Player access functions.

use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::debug;

use super::last_insert_rowid;
use super::relationship::{delete_with, Entity, OnDelete};
use crate::db::model::{NewPlayer, Player, PlayerChanges};
use crate::db::schema::players;
use crate::error::Result;

pub fn create_player(
    conn: &mut SqliteConnection,
    name: &str,
    team_id: i32,
    number: Option<i32>,
) -> Result<Player> {
    let row = NewPlayer {
        name,
        number,
        team_id,
    };

    let player = conn.transaction(|conn| -> QueryResult<Player> {
        diesel::insert_into(players::table).values(&row).execute(conn)?;
        let id = last_insert_rowid(conn)?;
        players::table.find(id).select(Player::as_select()).first(conn)
    })?;

    debug!(player_id = player.id, team_id, number = ?player.number, "Created player");
    Ok(player)
}

pub fn get_player_by_id(conn: &mut SqliteConnection, player_id: i32) -> Result<Option<Player>> {
    let player = players::table
        .find(player_id)
        .select(Player::as_select())
        .first(conn)
        .optional()?;
    Ok(player)
}

/// The roster of `team_id`, in insertion order.
pub fn get_players_by_team(conn: &mut SqliteConnection, team_id: i32) -> Result<Vec<Player>> {
    let players = players::table
        .filter(players::team_id.eq(team_id))
        .order(players::id.asc())
        .select(Player::as_select())
        .load(conn)?;
    Ok(players)
}

pub fn update_player(
    conn: &mut SqliteConnection,
    player_id: i32,
    changes: PlayerChanges,
) -> Result<Option<Player>> {
    let player = conn.transaction(|conn| -> QueryResult<Option<Player>> {
        if changes != PlayerChanges::default() {
            diesel::update(players::table.find(player_id))
                .set(&changes)
                .execute(conn)?;
        }
        players::table
            .find(player_id)
            .select(Player::as_select())
            .first(conn)
            .optional()
    })?;

    if let Some(player) = &player {
        debug!(player_id = player.id, "Updated player");
    }
    Ok(player)
}

/// Delete a player. Lineup slots, stats, at-bats, outs and steals that
/// reference them are left in place.
pub fn delete_player(conn: &mut SqliteConnection, player_id: i32) -> Result<bool> {
    delete_player_with(conn, player_id, OnDelete::Orphan)
}

pub fn delete_player_with(
    conn: &mut SqliteConnection,
    player_id: i32,
    policy: OnDelete,
) -> Result<bool> {
    delete_with(conn, Entity::Player, player_id, policy)
}
