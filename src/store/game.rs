//! Game access functions.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::debug;

use super::last_insert_rowid;
use super::relationship::{delete_with, Entity, OnDelete};
use crate::db::model::{Game, GameChanges, NewGame};
use crate::db::schema::games;
use crate::error::Result;

pub fn create_game(
    conn: &mut SqliteConnection,
    date: NaiveDateTime,
    opponent: &str,
    team_id: i32,
) -> Result<Game> {
    let row = NewGame {
        date,
        opponent,
        team_id,
    };

    let game = conn.transaction(|conn| -> QueryResult<Game> {
        diesel::insert_into(games::table).values(&row).execute(conn)?;
        let id = last_insert_rowid(conn)?;
        games::table.find(id).select(Game::as_select()).first(conn)
    })?;

    debug!(game_id = game.id, team_id, opponent = %game.opponent, "Created game");
    Ok(game)
}

pub fn get_game_by_id(conn: &mut SqliteConnection, game_id: i32) -> Result<Option<Game>> {
    let game = games::table
        .find(game_id)
        .select(Game::as_select())
        .first(conn)
        .optional()?;
    Ok(game)
}

/// Games scheduled for `team_id`, in insertion order.
pub fn get_games_by_team(conn: &mut SqliteConnection, team_id: i32) -> Result<Vec<Game>> {
    let games = games::table
        .filter(games::team_id.eq(team_id))
        .order(games::id.asc())
        .select(Game::as_select())
        .load(conn)?;
    Ok(games)
}

pub fn update_game(
    conn: &mut SqliteConnection,
    game_id: i32,
    changes: GameChanges,
) -> Result<Option<Game>> {
    let game = conn.transaction(|conn| -> QueryResult<Option<Game>> {
        if changes != GameChanges::default() {
            diesel::update(games::table.find(game_id))
                .set(&changes)
                .execute(conn)?;
        }
        games::table
            .find(game_id)
            .select(Game::as_select())
            .first(conn)
            .optional()
    })?;

    if let Some(game) = &game {
        debug!(game_id = game.id, "Updated game");
    }
    Ok(game)
}

/// Delete a game. Innings, lineups and stats for it are left in place.
pub fn delete_game(conn: &mut SqliteConnection, game_id: i32) -> Result<bool> {
    delete_game_with(conn, game_id, OnDelete::Orphan)
}

pub fn delete_game_with(conn: &mut SqliteConnection, game_id: i32, policy: OnDelete) -> Result<bool> {
    delete_with(conn, Entity::Game, game_id, policy)
}
