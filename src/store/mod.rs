//! Access functions over the scorebook schema.
//!
//! Every function takes the connection it runs on. Each create, update and
//! delete runs in its own transaction that commits before returning, so a
//! caller never sees a half-applied mutation. Lookups that miss return
//! `Ok(None)`, listings that miss return an empty `Vec`, and deletes that
//! miss return `Ok(false)`. Store failures, including UNIQUE violations,
//! surface unchanged as [`Error::Database`](crate::error::Error::Database).

pub mod at_bat;
pub mod batting_order;
pub mod game;
pub mod game_stats;
pub mod inning;
pub mod out;
pub mod player;
pub mod relationship;
pub mod steal;
pub mod team;
pub mod user;

use diesel::prelude::*;
use diesel::SqliteConnection;

pub use relationship::{Entity, OnDelete, Relationship, RELATIONSHIPS};

#[derive(QueryableByName)]
struct LastInsertRowId {
    #[diesel(sql_type = diesel::sql_types::Integer)]
    #[diesel(column_name = "id")]
    id: i32,
}

/// Row id assigned by the most recent INSERT on `conn`.
pub(crate) fn last_insert_rowid(conn: &mut SqliteConnection) -> QueryResult<i32> {
    diesel::sql_query("SELECT last_insert_rowid() AS id")
        .get_result::<LastInsertRowId>(conn)
        .map(|row| row.id)
}
