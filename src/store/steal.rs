//! Stolen-base attempt access functions.

use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::debug;

use super::last_insert_rowid;
use crate::db::model::{NewSteal, Steal};
use crate::db::schema::steals;
use crate::error::Result;

pub fn create_steal(conn: &mut SqliteConnection, steal: NewSteal) -> Result<Steal> {
    let steal = conn.transaction(|conn| -> QueryResult<Steal> {
        diesel::insert_into(steals::table).values(&steal).execute(conn)?;
        let id = last_insert_rowid(conn)?;
        steals::table.find(id).select(Steal::as_select()).first(conn)
    })?;

    debug!(
        steal_id = steal.id,
        player_id = steal.player_id,
        from_base = steal.from_base,
        to_base = steal.to_base,
        success = steal.success,
        "Recorded steal attempt"
    );
    Ok(steal)
}

pub fn get_steal_by_id(conn: &mut SqliteConnection, steal_id: i32) -> Result<Option<Steal>> {
    let steal = steals::table
        .find(steal_id)
        .select(Steal::as_select())
        .first(conn)
        .optional()?;
    Ok(steal)
}

/// Attempts made during `at_bat_id`.
pub fn get_steals_by_at_bat(conn: &mut SqliteConnection, at_bat_id: i32) -> Result<Vec<Steal>> {
    let rows = steals::table
        .filter(steals::at_bat_id.eq(at_bat_id))
        .order(steals::id.asc())
        .select(Steal::as_select())
        .load(conn)?;
    Ok(rows)
}

/// Every attempt by `player_id`.
pub fn get_steals_by_player(conn: &mut SqliteConnection, player_id: i32) -> Result<Vec<Steal>> {
    let rows = steals::table
        .filter(steals::player_id.eq(player_id))
        .order(steals::id.asc())
        .select(Steal::as_select())
        .load(conn)?;
    Ok(rows)
}

pub fn delete_steal(conn: &mut SqliteConnection, steal_id: i32) -> Result<bool> {
    let deleted =
        conn.transaction(|conn| diesel::delete(steals::table.find(steal_id)).execute(conn))?;
    if deleted > 0 {
        debug!(steal_id, "Deleted steal");
    }
    Ok(deleted > 0)
}
