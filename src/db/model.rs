//! Entity types for Diesel ORM.
//!
//! Each table has a queryable entity, an insertable `New*` row, and, where
//! the entity can be edited, a `*Changes` set whose fields are all optional.
//! A field left as `None` in a change set keeps its stored value.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::Serialize;

use super::schema::{
    at_bats, batting_orders, game_stats, games, innings, outs, players, steals, teams, users,
};
use crate::password;

/// A person who manages teams.
#[derive(Queryable, Selectable, Identifiable, Debug, Clone, PartialEq, Eq, Serialize)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: Option<String>,
}

impl User {
    /// Hash `password` with a fresh salt and store it on this value.
    ///
    /// Only the in-memory value changes; persist it with
    /// [`update_user`](crate::store::user::update_user).
    pub fn set_password(&mut self, password: &str) {
        self.password_hash = Some(password::hash_password(password));
    }

    /// Check `password` against the stored hash.
    #[must_use]
    pub fn check_password(&self, password: &str) -> bool {
        self.password_hash
            .as_deref()
            .is_some_and(|hash| password::verify_password(password, hash))
    }
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = users)]
pub struct NewUser<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password_hash: Option<String>,
}

/// Changes to a user. `password` is plain text and is hashed on update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserChanges {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(AsChangeset, Debug, Clone, Default)]
#[diesel(table_name = users)]
pub(crate) struct UserChangeset {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password_hash: Option<String>,
}

/// A team owned by an optional managing user.
#[derive(Queryable, Selectable, Identifiable, Debug, Clone, PartialEq, Eq, Serialize)]
#[diesel(table_name = teams)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Team {
    pub id: i32,
    pub name: String,
    pub created_at: NaiveDateTime,
    pub user_id: Option<i32>,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = teams)]
pub struct NewTeam<'a> {
    pub name: &'a str,
    pub created_at: NaiveDateTime,
    pub user_id: Option<i32>,
}

#[derive(AsChangeset, Debug, Clone, Default, PartialEq, Eq)]
#[diesel(table_name = teams)]
pub struct TeamChanges {
    pub name: Option<String>,
}

#[derive(Queryable, Selectable, Identifiable, Debug, Clone, PartialEq, Eq, Serialize)]
#[diesel(table_name = players)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Player {
    pub id: i32,
    pub name: String,
    /// Jersey number.
    pub number: Option<i32>,
    pub team_id: i32,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = players)]
pub struct NewPlayer<'a> {
    pub name: &'a str,
    pub number: Option<i32>,
    pub team_id: i32,
}

/// Changes to a player. `number: Some(None)` clears the jersey number.
#[derive(AsChangeset, Debug, Clone, Default, PartialEq, Eq)]
#[diesel(table_name = players)]
pub struct PlayerChanges {
    pub name: Option<String>,
    pub number: Option<Option<i32>>,
}

#[derive(Queryable, Selectable, Identifiable, Debug, Clone, PartialEq, Eq, Serialize)]
#[diesel(table_name = games)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Game {
    pub id: i32,
    pub date: NaiveDateTime,
    pub opponent: String,
    pub team_id: i32,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = games)]
pub struct NewGame<'a> {
    pub date: NaiveDateTime,
    pub opponent: &'a str,
    pub team_id: i32,
}

#[derive(AsChangeset, Debug, Clone, Default, PartialEq, Eq)]
#[diesel(table_name = games)]
pub struct GameChanges {
    pub date: Option<NaiveDateTime>,
    pub opponent: Option<String>,
}

/// Half of the line score for one inning of a game.
#[derive(Queryable, Selectable, Identifiable, Debug, Clone, PartialEq, Eq, Serialize)]
#[diesel(table_name = innings)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Inning {
    pub id: i32,
    pub game_id: i32,
    pub inning_number: i32,
    pub team_runs: i32,
    pub opponent_runs: i32,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = innings)]
pub struct NewInning {
    pub game_id: i32,
    pub inning_number: i32,
    pub team_runs: i32,
    pub opponent_runs: i32,
}

#[derive(AsChangeset, Debug, Clone, Default, PartialEq, Eq)]
#[diesel(table_name = innings)]
pub struct InningChanges {
    pub inning_number: Option<i32>,
    pub team_runs: Option<i32>,
    pub opponent_runs: Option<i32>,
}

/// A player's slot in a game's lineup.
#[derive(Queryable, Selectable, Identifiable, Debug, Clone, PartialEq, Eq, Serialize)]
#[diesel(table_name = batting_orders)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct BattingOrder {
    pub id: i32,
    pub game_id: i32,
    pub player_id: i32,
    pub order_number: i32,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = batting_orders)]
pub struct NewBattingOrder {
    pub game_id: i32,
    pub player_id: i32,
    pub order_number: i32,
}

/// Counting stats for one player in one game.
#[derive(Queryable, Selectable, Identifiable, Debug, Clone, PartialEq, Eq, Serialize)]
#[diesel(table_name = game_stats)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct GameStats {
    pub id: i32,
    pub game_id: i32,
    pub player_id: i32,
    pub at_bats: i32,
    pub hits: i32,
    pub runs: i32,
    pub rbis: i32,
    pub strikeouts: i32,
    pub walks: i32,
    pub stolen_bases: i32,
    pub caught_stealing: i32,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = game_stats)]
pub struct NewGameStats {
    pub game_id: i32,
    pub player_id: i32,
}

/// Counters to overwrite on a [`GameStats`] row.
///
/// Only the listed counters exist; any other name is a compile error.
#[derive(AsChangeset, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[diesel(table_name = game_stats)]
pub struct GameStatsUpdate {
    pub at_bats: Option<i32>,
    pub hits: Option<i32>,
    pub runs: Option<i32>,
    pub rbis: Option<i32>,
    pub strikeouts: Option<i32>,
    pub walks: Option<i32>,
    pub stolen_bases: Option<i32>,
    pub caught_stealing: Option<i32>,
}

/// One plate appearance.
#[derive(Queryable, Selectable, Identifiable, Debug, Clone, PartialEq, Eq, Serialize)]
#[diesel(table_name = at_bats)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct AtBat {
    pub id: i32,
    pub inning_id: i32,
    pub batter_id: i32,
    /// Outcome category, e.g. "single", "walk", "strikeout".
    pub result: String,
    pub rbis: i32,
    pub balls: i32,
    pub strikes: i32,
    /// Bases the batter advanced.
    pub bases_advanced: i32,
    /// Runners already on base who advanced.
    pub runners_advanced: i32,
    pub timestamp: NaiveDateTime,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = at_bats)]
pub struct NewAtBat {
    pub inning_id: i32,
    pub batter_id: i32,
    pub result: String,
    pub rbis: i32,
    pub balls: i32,
    pub strikes: i32,
    pub bases_advanced: i32,
    pub runners_advanced: i32,
    pub timestamp: NaiveDateTime,
}

impl NewAtBat {
    /// A plate appearance with zeroed counts, stamped now.
    #[must_use]
    pub fn new(inning_id: i32, batter_id: i32, result: impl Into<String>) -> Self {
        Self {
            inning_id,
            batter_id,
            result: result.into(),
            rbis: 0,
            balls: 0,
            strikes: 0,
            bases_advanced: 0,
            runners_advanced: 0,
            timestamp: chrono::Utc::now().naive_utc(),
        }
    }
}

#[derive(AsChangeset, Debug, Clone, Default, PartialEq, Eq)]
#[diesel(table_name = at_bats)]
pub struct AtBatChanges {
    pub result: Option<String>,
    pub rbis: Option<i32>,
    pub balls: Option<i32>,
    pub strikes: Option<i32>,
    pub bases_advanced: Option<i32>,
    pub runners_advanced: Option<i32>,
}

#[derive(Queryable, Selectable, Identifiable, Debug, Clone, PartialEq, Eq, Serialize)]
#[diesel(table_name = outs)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Out {
    pub id: i32,
    pub at_bat_id: i32,
    /// Player put out.
    pub player_id: i32,
    /// e.g. "strikeout", "groundout", "flyout", "caught_stealing".
    pub out_type: String,
    /// Base where the out was made; `None` for strikeouts.
    pub base: Option<i32>,
    /// Fielder credited with the out.
    pub fielder_id: Option<i32>,
    pub timestamp: NaiveDateTime,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = outs)]
pub struct NewOut {
    pub at_bat_id: i32,
    pub player_id: i32,
    pub out_type: String,
    pub base: Option<i32>,
    pub fielder_id: Option<i32>,
    pub timestamp: NaiveDateTime,
}

impl NewOut {
    #[must_use]
    pub fn new(at_bat_id: i32, player_id: i32, out_type: impl Into<String>) -> Self {
        Self {
            at_bat_id,
            player_id,
            out_type: out_type.into(),
            base: None,
            fielder_id: None,
            timestamp: chrono::Utc::now().naive_utc(),
        }
    }

    #[must_use]
    pub fn at_base(mut self, base: i32) -> Self {
        self.base = Some(base);
        self
    }

    #[must_use]
    pub fn fielded_by(mut self, fielder_id: i32) -> Self {
        self.fielder_id = Some(fielder_id);
        self
    }
}

/// A stolen-base attempt, successful or not.
#[derive(Queryable, Selectable, Identifiable, Debug, Clone, PartialEq, Eq, Serialize)]
#[diesel(table_name = steals)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Steal {
    pub id: i32,
    pub at_bat_id: i32,
    pub player_id: i32,
    pub from_base: i32,
    pub to_base: i32,
    pub success: bool,
    pub timestamp: NaiveDateTime,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = steals)]
pub struct NewSteal {
    pub at_bat_id: i32,
    pub player_id: i32,
    pub from_base: i32,
    pub to_base: i32,
    pub success: bool,
    pub timestamp: NaiveDateTime,
}

impl NewSteal {
    #[must_use]
    pub fn new(at_bat_id: i32, player_id: i32, from_base: i32, to_base: i32, success: bool) -> Self {
        Self {
            at_bat_id,
            player_id,
            from_base,
            to_base,
            success,
            timestamp: chrono::Utc::now().naive_utc(),
        }
    }
}
