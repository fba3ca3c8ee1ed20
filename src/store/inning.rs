//! Inning access functions.

use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::debug;

use super::last_insert_rowid;
use super::relationship::{delete_with, Entity, OnDelete};
use crate::db::model::{Inning, InningChanges, NewInning};
use crate::db::schema::innings;
use crate::error::Result;

/// Open inning `inning_number` of `game_id` with no runs on either side.
pub fn create_inning(conn: &mut SqliteConnection, game_id: i32, inning_number: i32) -> Result<Inning> {
    let row = NewInning {
        game_id,
        inning_number,
        team_runs: 0,
        opponent_runs: 0,
    };

    let inning = conn.transaction(|conn| -> QueryResult<Inning> {
        diesel::insert_into(innings::table).values(&row).execute(conn)?;
        let id = last_insert_rowid(conn)?;
        innings::table.find(id).select(Inning::as_select()).first(conn)
    })?;

    debug!(inning_id = inning.id, game_id, inning_number, "Created inning");
    Ok(inning)
}

pub fn get_inning_by_id(conn: &mut SqliteConnection, inning_id: i32) -> Result<Option<Inning>> {
    let inning = innings::table
        .find(inning_id)
        .select(Inning::as_select())
        .first(conn)
        .optional()?;
    Ok(inning)
}

/// The line score of `game_id`, ascending by inning number.
pub fn get_innings_by_game(conn: &mut SqliteConnection, game_id: i32) -> Result<Vec<Inning>> {
    let innings = innings::table
        .filter(innings::game_id.eq(game_id))
        .order((innings::inning_number.asc(), innings::id.asc()))
        .select(Inning::as_select())
        .load(conn)?;
    Ok(innings)
}

pub fn update_inning(
    conn: &mut SqliteConnection,
    inning_id: i32,
    changes: InningChanges,
) -> Result<Option<Inning>> {
    let inning = conn.transaction(|conn| -> QueryResult<Option<Inning>> {
        if changes != InningChanges::default() {
            diesel::update(innings::table.find(inning_id))
                .set(&changes)
                .execute(conn)?;
        }
        innings::table
            .find(inning_id)
            .select(Inning::as_select())
            .first(conn)
            .optional()
    })?;

    if let Some(inning) = &inning {
        debug!(
            inning_id = inning.id,
            team_runs = inning.team_runs,
            opponent_runs = inning.opponent_runs,
            "Updated inning"
        );
    }
    Ok(inning)
}

/// Delete an inning. Its at-bats are left in place.
pub fn delete_inning(conn: &mut SqliteConnection, inning_id: i32) -> Result<bool> {
    delete_inning_with(conn, inning_id, OnDelete::Orphan)
}

pub fn delete_inning_with(conn: &mut SqliteConnection, inning_id: i32, policy: OnDelete) -> Result<bool> {
    delete_with(conn, Entity::Inning, inning_id, policy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::testing;

    fn game_id(conn: &mut SqliteConnection) -> i32 {
        let team = testing::team(conn, "Tigers");
        testing::game(conn, team.id, "Lions").id
    }

    #[test]
    fn new_inning_has_no_runs() {
        let mut conn = testing::conn();
        let game_id = game_id(&mut conn);
        let inning = create_inning(&mut conn, game_id, 1).unwrap();

        assert!(inning.id > 0);
        assert_eq!(inning.game_id, game_id);
        assert_eq!(inning.inning_number, 1);
        assert_eq!((inning.team_runs, inning.opponent_runs), (0, 0));
        assert_eq!(get_inning_by_id(&mut conn, inning.id).unwrap(), Some(inning));
    }

    #[test]
    fn innings_list_in_inning_order() {
        let mut conn = testing::conn();
        let game_id = game_id(&mut conn);
        for number in [2, 3, 1] {
            create_inning(&mut conn, game_id, number).unwrap();
        }
        let numbers: Vec<i32> = get_innings_by_game(&mut conn, game_id)
            .unwrap()
            .iter()
            .map(|inning| inning.inning_number)
            .collect();
        assert_eq!(numbers, vec![1, 2, 3]);
        assert!(get_innings_by_game(&mut conn, game_id + 1).unwrap().is_empty());
    }

    #[test]
    fn update_runs() {
        let mut conn = testing::conn();
        let game_id = game_id(&mut conn);
        let inning = create_inning(&mut conn, game_id, 4).unwrap();

        let scored = update_inning(
            &mut conn,
            inning.id,
            InningChanges {
                team_runs: Some(3),
                ..Default::default()
            },
        )
        .unwrap()
        .unwrap();
        assert_eq!(scored.team_runs, 3);
        assert_eq!(scored.opponent_runs, 0);
        assert_eq!(scored.inning_number, 4);
    }

    #[test]
    fn update_missing_inning_is_none() {
        let mut conn = testing::conn();
        let changes = InningChanges {
            opponent_runs: Some(1),
            ..Default::default()
        };
        assert_eq!(update_inning(&mut conn, 9, changes).unwrap(), None);
    }

    #[test]
    fn delete_once_then_false() {
        let mut conn = testing::conn();
        let game_id = game_id(&mut conn);
        let inning = create_inning(&mut conn, game_id, 1).unwrap();
        assert!(delete_inning(&mut conn, inning.id).unwrap());
        assert_eq!(get_inning_by_id(&mut conn, inning.id).unwrap(), None);
        assert!(!delete_inning(&mut conn, inning.id).unwrap());
    }
}
