//! Batting order access functions.
//!
//! `order_number` carries no uniqueness constraint; it only orders the
//! slots that share a game.

use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::debug;

use super::last_insert_rowid;
use crate::db::model::{BattingOrder, NewBattingOrder};
use crate::db::schema::batting_orders;
use crate::error::Result;

pub fn create_batting_order(
    conn: &mut SqliteConnection,
    game_id: i32,
    player_id: i32,
    order_number: i32,
) -> Result<BattingOrder> {
    let row = NewBattingOrder {
        game_id,
        player_id,
        order_number,
    };

    let slot = conn.transaction(|conn| -> QueryResult<BattingOrder> {
        diesel::insert_into(batting_orders::table)
            .values(&row)
            .execute(conn)?;
        let id = last_insert_rowid(conn)?;
        batting_orders::table
            .find(id)
            .select(BattingOrder::as_select())
            .first(conn)
    })?;

    debug!(batting_order_id = slot.id, game_id, player_id, order_number, "Created batting order slot");
    Ok(slot)
}

pub fn get_batting_order_by_id(
    conn: &mut SqliteConnection,
    batting_order_id: i32,
) -> Result<Option<BattingOrder>> {
    let slot = batting_orders::table
        .find(batting_order_id)
        .select(BattingOrder::as_select())
        .first(conn)
        .optional()?;
    Ok(slot)
}

/// The lineup for `game_id`, ascending by `order_number`.
///
/// Slots sharing an order number keep insertion order.
pub fn get_batting_order(conn: &mut SqliteConnection, game_id: i32) -> Result<Vec<BattingOrder>> {
    let lineup = batting_orders::table
        .filter(batting_orders::game_id.eq(game_id))
        .order((batting_orders::order_number.asc(), batting_orders::id.asc()))
        .select(BattingOrder::as_select())
        .load(conn)?;
    Ok(lineup)
}

/// Move a slot to `order_number`. Returns `Ok(None)` when no slot matches.
pub fn update_batting_order(
    conn: &mut SqliteConnection,
    batting_order_id: i32,
    order_number: i32,
) -> Result<Option<BattingOrder>> {
    let slot = conn.transaction(|conn| -> QueryResult<Option<BattingOrder>> {
        diesel::update(batting_orders::table.find(batting_order_id))
            .set(batting_orders::order_number.eq(order_number))
            .execute(conn)?;
        batting_orders::table
            .find(batting_order_id)
            .select(BattingOrder::as_select())
            .first(conn)
            .optional()
    })?;

    if slot.is_some() {
        debug!(batting_order_id, order_number, "Updated batting order slot");
    }
    Ok(slot)
}

pub fn delete_batting_order(conn: &mut SqliteConnection, batting_order_id: i32) -> Result<bool> {
    let deleted = conn.transaction(|conn| {
        diesel::delete(batting_orders::table.find(batting_order_id)).execute(conn)
    })?;
    if deleted > 0 {
        debug!(batting_order_id, "Deleted batting order slot");
    }
    Ok(deleted > 0)
}
