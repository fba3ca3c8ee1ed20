//! User access functions.

use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::debug;

use super::last_insert_rowid;
use super::relationship::{delete_with, Entity, OnDelete};
use crate::db::model::{NewUser, User, UserChanges, UserChangeset};
use crate::db::schema::users;
use crate::error::Result;
use crate::password;

/// Create a user, hashing `password` before it is stored.
///
/// # Errors
/// Fails with a UNIQUE violation when `username` or `email` is taken.
pub fn create_user(
    conn: &mut SqliteConnection,
    username: &str,
    email: &str,
    password: &str,
) -> Result<User> {
    let row = NewUser {
        username,
        email,
        password_hash: Some(password::hash_password(password)),
    };
    let user = insert_user(conn, &row)?;

    debug!(user_id = user.id, username = %user.username, "Created user");
    Ok(user)
}

/// Insert a row whose password is already hashed.
pub(crate) fn insert_user(conn: &mut SqliteConnection, row: &NewUser<'_>) -> QueryResult<User> {
    conn.transaction(|conn| {
        diesel::insert_into(users::table).values(row).execute(conn)?;
        let id = last_insert_rowid(conn)?;
        users::table.find(id).select(User::as_select()).first(conn)
    })
}

pub fn get_user_by_id(conn: &mut SqliteConnection, user_id: i32) -> Result<Option<User>> {
    let user = users::table
        .find(user_id)
        .select(User::as_select())
        .first(conn)
        .optional()?;
    Ok(user)
}

pub fn get_user_by_username(conn: &mut SqliteConnection, username: &str) -> Result<Option<User>> {
    let user = users::table
        .filter(users::username.eq(username))
        .select(User::as_select())
        .first(conn)
        .optional()?;
    Ok(user)
}

pub fn get_user_by_email(conn: &mut SqliteConnection, email: &str) -> Result<Option<User>> {
    let user = users::table
        .filter(users::email.eq(email))
        .select(User::as_select())
        .first(conn)
        .optional()?;
    Ok(user)
}

/// Apply `changes` to a user. A new password is hashed with a fresh salt.
///
/// Returns `Ok(None)` when no user has `user_id`.
///
/// # Errors
/// Fails with a UNIQUE violation when the new username or email is taken.
pub fn update_user(
    conn: &mut SqliteConnection,
    user_id: i32,
    changes: UserChanges,
) -> Result<Option<User>> {
    let changeset = UserChangeset {
        username: changes.username,
        email: changes.email,
        password_hash: changes.password.as_deref().map(password::hash_password),
    };
    let is_empty = changeset.username.is_none()
        && changeset.email.is_none()
        && changeset.password_hash.is_none();

    let user = conn.transaction(|conn| -> QueryResult<Option<User>> {
        if !is_empty {
            diesel::update(users::table.find(user_id))
                .set(&changeset)
                .execute(conn)?;
        }
        users::table
            .find(user_id)
            .select(User::as_select())
            .first(conn)
            .optional()
    })?;

    if let Some(user) = &user {
        debug!(user_id = user.id, "Updated user");
    }
    Ok(user)
}

/// Delete a user. Teams they manage keep a dangling `user_id`.
pub fn delete_user(conn: &mut SqliteConnection, user_id: i32) -> Result<bool> {
    delete_user_with(conn, user_id, OnDelete::Orphan)
}

/// Delete a user under an explicit policy. Cascading clears `teams.user_id`.
pub fn delete_user_with(conn: &mut SqliteConnection, user_id: i32, policy: OnDelete) -> Result<bool> {
    delete_with(conn, Entity::User, user_id, policy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::testing;

    #[test]
    fn create_assigns_id_and_hashes_password() {
        let mut conn = testing::conn();
        let user = create_user(&mut conn, "testuser", "test@example.com", "password123").unwrap();

        assert!(user.id > 0);
        assert_eq!(user.username, "testuser");
        assert_eq!(user.email, "test@example.com");
        assert_ne!(user.password_hash.as_deref(), Some("password123"));
        assert!(user.check_password("password123"));
        assert!(!user.check_password("wrongpassword"));
    }

    #[test]
    fn lookups_find_the_created_user() {
        let mut conn = testing::conn();
        let user = create_user(&mut conn, "testuser", "test@example.com", "pw").unwrap();

        assert_eq!(get_user_by_id(&mut conn, user.id).unwrap(), Some(user.clone()));
        assert_eq!(
            get_user_by_username(&mut conn, "testuser").unwrap(),
            Some(user.clone())
        );
        assert_eq!(
            get_user_by_email(&mut conn, "test@example.com").unwrap(),
            Some(user)
        );
    }

    #[test]
    fn lookups_miss_with_none() {
        let mut conn = testing::conn();
        assert_eq!(get_user_by_id(&mut conn, 1).unwrap(), None);
        assert_eq!(get_user_by_username(&mut conn, "ghost").unwrap(), None);
        assert_eq!(get_user_by_email(&mut conn, "ghost@example.com").unwrap(), None);
    }

    #[test]
    fn update_all_fields() {
        let mut conn = testing::conn();
        let user = create_user(&mut conn, "testuser", "test@example.com", "password123").unwrap();

        let updated = update_user(
            &mut conn,
            user.id,
            UserChanges {
                username: Some("newusername".into()),
                email: Some("new@example.com".into()),
                password: Some("newpassword".into()),
            },
        )
        .unwrap()
        .unwrap();

        assert_eq!(updated.username, "newusername");
        assert_eq!(updated.email, "new@example.com");
        assert!(updated.check_password("newpassword"));
        assert!(!updated.check_password("password123"));
    }

    #[test]
    fn update_single_field_leaves_others() {
        let mut conn = testing::conn();
        let user = create_user(&mut conn, "testuser", "test@example.com", "pw").unwrap();

        let updated = update_user(
            &mut conn,
            user.id,
            UserChanges {
                email: Some("other@example.com".into()),
                ..Default::default()
            },
        )
        .unwrap()
        .unwrap();

        assert_eq!(updated.username, user.username);
        assert_eq!(updated.password_hash, user.password_hash);
        assert_eq!(updated.email, "other@example.com");
    }

    #[test]
    fn empty_update_is_a_no_op() {
        let mut conn = testing::conn();
        let user = create_user(&mut conn, "testuser", "test@example.com", "pw").unwrap();
        let same = update_user(&mut conn, user.id, UserChanges::default()).unwrap();
        assert_eq!(same, Some(user));
    }

    #[test]
    fn update_missing_user_is_none() {
        let mut conn = testing::conn();
        let changes = UserChanges {
            username: Some("x".into()),
            ..Default::default()
        };
        assert_eq!(update_user(&mut conn, 99, changes).unwrap(), None);
    }

    #[test]
    fn duplicate_username_is_a_unique_violation() {
        let mut conn = testing::conn();
        create_user(&mut conn, "coach1", "a@x.com", "pw").unwrap();
        let err = create_user(&mut conn, "coach1", "b@x.com", "pw").unwrap_err();
        assert!(err.is_unique_violation(), "{err}");
    }

    #[test]
    fn duplicate_email_is_a_unique_violation() {
        let mut conn = testing::conn();
        create_user(&mut conn, "a", "c@x.com", "pw").unwrap();
        let err = create_user(&mut conn, "b", "c@x.com", "pw").unwrap_err();
        assert!(err.is_unique_violation(), "{err}");
    }

    #[test]
    fn fixture_users_hash_with_few_iterations() {
        let mut conn = testing::conn();
        let user = testing::user(&mut conn, "coach");

        let hash = user.password_hash.as_deref().unwrap();
        assert!(hash.starts_with("pbkdf2:sha256:1000$"), "{hash}");
        assert!(user.check_password("password123"));
        assert_eq!(get_user_by_username(&mut conn, "coach").unwrap(), Some(user));
    }

    #[test]
    fn delete_once_then_false() {
        let mut conn = testing::conn();
        let user = testing::user(&mut conn, "testuser");

        assert!(delete_user(&mut conn, user.id).unwrap());
        assert_eq!(get_user_by_id(&mut conn, user.id).unwrap(), None);
        assert!(!delete_user(&mut conn, user.id).unwrap());
    }
}
