//! Team access functions.

use chrono::Utc;
use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::debug;

use super::last_insert_rowid;
use super::relationship::{delete_with, Entity, OnDelete};
use crate::db::model::{NewTeam, Team, TeamChanges};
use crate::db::schema::teams;
use crate::error::Result;

/// Create a team, stamped with the current UTC time.
///
/// # Errors
/// Fails with a UNIQUE violation when `name` is taken.
pub fn create_team(conn: &mut SqliteConnection, name: &str, user_id: Option<i32>) -> Result<Team> {
    let row = NewTeam {
        name,
        created_at: Utc::now().naive_utc(),
        user_id,
    };

    let team = conn.transaction(|conn| -> QueryResult<Team> {
        diesel::insert_into(teams::table).values(&row).execute(conn)?;
        let id = last_insert_rowid(conn)?;
        teams::table.find(id).select(Team::as_select()).first(conn)
    })?;

    debug!(team_id = team.id, name = %team.name, user_id = ?team.user_id, "Created team");
    Ok(team)
}

pub fn get_team_by_id(conn: &mut SqliteConnection, team_id: i32) -> Result<Option<Team>> {
    let team = teams::table
        .find(team_id)
        .select(Team::as_select())
        .first(conn)
        .optional()?;
    Ok(team)
}

/// Teams managed by `user_id`, in insertion order.
pub fn get_teams_by_user(conn: &mut SqliteConnection, user_id: i32) -> Result<Vec<Team>> {
    let teams = teams::table
        .filter(teams::user_id.eq(user_id))
        .order(teams::id.asc())
        .select(Team::as_select())
        .load(conn)?;
    Ok(teams)
}

pub fn update_team(
    conn: &mut SqliteConnection,
    team_id: i32,
    changes: TeamChanges,
) -> Result<Option<Team>> {
    let team = conn.transaction(|conn| -> QueryResult<Option<Team>> {
        if changes != TeamChanges::default() {
            diesel::update(teams::table.find(team_id))
                .set(&changes)
                .execute(conn)?;
        }
        teams::table
            .find(team_id)
            .select(Team::as_select())
            .first(conn)
            .optional()
    })?;

    if let Some(team) = &team {
        debug!(team_id = team.id, "Updated team");
    }
    Ok(team)
}

/// Delete a team. Its players and games are left in place.
pub fn delete_team(conn: &mut SqliteConnection, team_id: i32) -> Result<bool> {
    delete_team_with(conn, team_id, OnDelete::Orphan)
}

pub fn delete_team_with(conn: &mut SqliteConnection, team_id: i32, policy: OnDelete) -> Result<bool> {
    delete_with(conn, Entity::Team, team_id, policy)
}
