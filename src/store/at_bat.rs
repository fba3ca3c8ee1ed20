//! Plate appearance access functions.

use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::debug;

use super::last_insert_rowid;
use super::relationship::{delete_with, Entity, OnDelete};
use crate::db::model::{AtBat, AtBatChanges, NewAtBat};
use crate::db::schema::at_bats;
use crate::error::Result;

pub fn create_at_bat(conn: &mut SqliteConnection, at_bat: NewAtBat) -> Result<AtBat> {
    let at_bat = conn.transaction(|conn| -> QueryResult<AtBat> {
        diesel::insert_into(at_bats::table).values(&at_bat).execute(conn)?;
        let id = last_insert_rowid(conn)?;
        at_bats::table.find(id).select(AtBat::as_select()).first(conn)
    })?;

    debug!(
        at_bat_id = at_bat.id,
        inning_id = at_bat.inning_id,
        batter_id = at_bat.batter_id,
        result = %at_bat.result,
        "Created at-bat"
    );
    Ok(at_bat)
}

pub fn get_at_bat_by_id(conn: &mut SqliteConnection, at_bat_id: i32) -> Result<Option<AtBat>> {
    let at_bat = at_bats::table
        .find(at_bat_id)
        .select(AtBat::as_select())
        .first(conn)
        .optional()?;
    Ok(at_bat)
}

/// Plate appearances in `inning_id`, in the order they were recorded.
pub fn get_at_bats_by_inning(conn: &mut SqliteConnection, inning_id: i32) -> Result<Vec<AtBat>> {
    let rows = at_bats::table
        .filter(at_bats::inning_id.eq(inning_id))
        .order(at_bats::id.asc())
        .select(AtBat::as_select())
        .load(conn)?;
    Ok(rows)
}

/// Every plate appearance by `batter_id`, in the order they were recorded.
pub fn get_at_bats_by_batter(conn: &mut SqliteConnection, batter_id: i32) -> Result<Vec<AtBat>> {
    let rows = at_bats::table
        .filter(at_bats::batter_id.eq(batter_id))
        .order(at_bats::id.asc())
        .select(AtBat::as_select())
        .load(conn)?;
    Ok(rows)
}

pub fn update_at_bat(
    conn: &mut SqliteConnection,
    at_bat_id: i32,
    changes: AtBatChanges,
) -> Result<Option<AtBat>> {
    let at_bat = conn.transaction(|conn| -> QueryResult<Option<AtBat>> {
        if changes != AtBatChanges::default() {
            diesel::update(at_bats::table.find(at_bat_id))
                .set(&changes)
                .execute(conn)?;
        }
        at_bats::table
            .find(at_bat_id)
            .select(AtBat::as_select())
            .first(conn)
            .optional()
    })?;

    if let Some(at_bat) = &at_bat {
        debug!(at_bat_id = at_bat.id, result = %at_bat.result, "Updated at-bat");
    }
    Ok(at_bat)
}

/// Delete an at-bat. Outs and steals recorded during it are left in place.
pub fn delete_at_bat(conn: &mut SqliteConnection, at_bat_id: i32) -> Result<bool> {
    delete_at_bat_with(conn, at_bat_id, OnDelete::Orphan)
}

pub fn delete_at_bat_with(conn: &mut SqliteConnection, at_bat_id: i32, policy: OnDelete) -> Result<bool> {
    delete_with(conn, Entity::AtBat, at_bat_id, policy)
}
