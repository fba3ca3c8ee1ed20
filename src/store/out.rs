//! Out access functions.

use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::debug;

use super::last_insert_rowid;
use crate::db::model::{NewOut, Out};
use crate::db::schema::outs;
use crate::error::Result;

pub fn create_out(conn: &mut SqliteConnection, out: NewOut) -> Result<Out> {
    let out = conn.transaction(|conn| -> QueryResult<Out> {
        diesel::insert_into(outs::table).values(&out).execute(conn)?;
        let id = last_insert_rowid(conn)?;
        outs::table.find(id).select(Out::as_select()).first(conn)
    })?;

    debug!(
        out_id = out.id,
        at_bat_id = out.at_bat_id,
        player_id = out.player_id,
        out_type = %out.out_type,
        "Recorded out"
    );
    Ok(out)
}

pub fn get_out_by_id(conn: &mut SqliteConnection, out_id: i32) -> Result<Option<Out>> {
    let out = outs::table
        .find(out_id)
        .select(Out::as_select())
        .first(conn)
        .optional()?;
    Ok(out)
}

/// Outs recorded during `at_bat_id`.
pub fn get_outs_by_at_bat(conn: &mut SqliteConnection, at_bat_id: i32) -> Result<Vec<Out>> {
    let rows = outs::table
        .filter(outs::at_bat_id.eq(at_bat_id))
        .order(outs::id.asc())
        .select(Out::as_select())
        .load(conn)?;
    Ok(rows)
}

/// Outs credited to `fielder_id`.
pub fn get_outs_fielded_by(conn: &mut SqliteConnection, fielder_id: i32) -> Result<Vec<Out>> {
    let rows = outs::table
        .filter(outs::fielder_id.eq(fielder_id))
        .order(outs::id.asc())
        .select(Out::as_select())
        .load(conn)?;
    Ok(rows)
}

pub fn delete_out(conn: &mut SqliteConnection, out_id: i32) -> Result<bool> {
    let deleted = conn.transaction(|conn| diesel::delete(outs::table.find(out_id)).execute(conn))?;
    if deleted > 0 {
        debug!(out_id, "Deleted out");
    }
    Ok(deleted > 0)
}
