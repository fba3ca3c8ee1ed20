#![allow(dead_code)]

//! Builders shared by the integration tests.

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;
use diesel::SqliteConnection;
use scorebook::db::model::{Game, NewUser, Player, Team, User};
use scorebook::db::schema::users;
use scorebook::password::hash_password_with;
use scorebook::store;

/// Iteration count for seeded passwords; the default makes suites crawl.
pub const SEED_ITERATIONS: u32 = 1_000;

pub fn opening_day() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 4, 11)
        .and_then(|d| d.and_hms_opt(18, 30, 0))
        .expect("valid date")
}

/// Seed a user with a cheaply hashed password `pw`.
pub fn coach(conn: &mut SqliteConnection, username: &str) -> User {
    let email = format!("{username}@example.com");
    diesel::insert_into(users::table)
        .values(&NewUser {
            username,
            email: &email,
            password_hash: Some(hash_password_with("pw", SEED_ITERATIONS)),
        })
        .execute(conn)
        .expect("insert user");
    users::table
        .filter(users::username.eq(username))
        .select(User::as_select())
        .first(conn)
        .expect("create user")
}

pub fn team(conn: &mut SqliteConnection, name: &str, coach: &User) -> Team {
    store::team::create_team(conn, name, Some(coach.id)).expect("create team")
}

pub fn player(conn: &mut SqliteConnection, team: &Team, name: &str, number: i32) -> Player {
    store::player::create_player(conn, name, team.id, Some(number)).expect("create player")
}

pub fn game(conn: &mut SqliteConnection, team: &Team, opponent: &str) -> Game {
    store::game::create_game(conn, opening_day(), opponent, team.id).expect("create game")
}
