//! Declared parent/child relationships and what deleting a parent does.
//!
//! Every foreign key in the schema is listed in [`RELATIONSHIPS`]. Deleting a
//! parent applies one [`OnDelete`] policy to all of its relationships:
//!
//! - [`OnDelete::Orphan`] removes only the parent. Children keep a dangling
//!   foreign key. This is what the plain `delete_*` functions do.
//! - [`OnDelete::Restrict`] refuses the delete while any child row still
//!   references the parent.
//! - [`OnDelete::Cascade`] deletes dependents first, recursively. Optional
//!   references (`teams.user_id`, `outs.fielder_id`) are cleared instead,
//!   so removing a coach keeps the team and removing a fielder keeps the out.

use diesel::prelude::*;
use diesel::sql_types::{BigInt, Integer};
use diesel::SqliteConnection;
use tracing::{debug, warn};

use crate::error::{Error, Result};

/// What happens to children when their parent is deleted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OnDelete {
    #[default]
    Orphan,
    Restrict,
    Cascade,
}

/// Tables that take part in relationships.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Entity {
    User,
    Team,
    Player,
    Game,
    Inning,
    BattingOrder,
    GameStats,
    AtBat,
    Out,
    Steal,
}

impl Entity {
    /// Backing table name.
    #[must_use]
    pub const fn table(self) -> &'static str {
        match self {
            Entity::User => "users",
            Entity::Team => "teams",
            Entity::Player => "players",
            Entity::Game => "games",
            Entity::Inning => "innings",
            Entity::BattingOrder => "batting_orders",
            Entity::GameStats => "game_stats",
            Entity::AtBat => "at_bats",
            Entity::Out => "outs",
            Entity::Steal => "steals",
        }
    }

    /// Singular, human-readable name.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Entity::User => "user",
            Entity::Team => "team",
            Entity::Player => "player",
            Entity::Game => "game",
            Entity::Inning => "inning",
            Entity::BattingOrder => "batting order",
            Entity::GameStats => "game stats",
            Entity::AtBat => "at-bat",
            Entity::Out => "out",
            Entity::Steal => "steal",
        }
    }

    /// Relationships in which this entity is the parent.
    pub fn children(self) -> impl Iterator<Item = &'static Relationship> {
        RELATIONSHIPS.iter().filter(move |rel| rel.parent == self)
    }
}

/// A foreign key from `child.column` to `parent.id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Relationship {
    pub parent: Entity,
    pub child: Entity,
    pub column: &'static str,
    /// Whether the column accepts NULL.
    pub optional: bool,
}

impl Relationship {
    const fn required(parent: Entity, child: Entity, column: &'static str) -> Self {
        Self {
            parent,
            child,
            column,
            optional: false,
        }
    }

    const fn optional(parent: Entity, child: Entity, column: &'static str) -> Self {
        Self {
            parent,
            child,
            column,
            optional: true,
        }
    }

    /// `table.column`, for messages.
    #[must_use]
    pub fn qualified_column(&self) -> String {
        format!("{}.{}", self.child.table(), self.column)
    }
}

/// Every foreign key in the schema.
pub const RELATIONSHIPS: &[Relationship] = &[
    Relationship::optional(Entity::User, Entity::Team, "user_id"),
    Relationship::required(Entity::Team, Entity::Player, "team_id"),
    Relationship::required(Entity::Team, Entity::Game, "team_id"),
    Relationship::required(Entity::Game, Entity::Inning, "game_id"),
    Relationship::required(Entity::Game, Entity::BattingOrder, "game_id"),
    Relationship::required(Entity::Game, Entity::GameStats, "game_id"),
    Relationship::required(Entity::Player, Entity::BattingOrder, "player_id"),
    Relationship::required(Entity::Player, Entity::GameStats, "player_id"),
    Relationship::required(Entity::Player, Entity::AtBat, "batter_id"),
    Relationship::required(Entity::Player, Entity::Out, "player_id"),
    Relationship::optional(Entity::Player, Entity::Out, "fielder_id"),
    Relationship::required(Entity::Player, Entity::Steal, "player_id"),
    Relationship::required(Entity::Inning, Entity::AtBat, "inning_id"),
    Relationship::required(Entity::AtBat, Entity::Out, "at_bat_id"),
    Relationship::required(Entity::AtBat, Entity::Steal, "at_bat_id"),
];

#[derive(QueryableByName)]
struct Count {
    #[diesel(sql_type = BigInt)]
    count: i64,
}

#[derive(QueryableByName)]
struct RowId {
    #[diesel(sql_type = Integer)]
    id: i32,
}

/// Delete `entity` row `id` under `policy`, in one transaction.
///
/// Returns `Ok(false)` when no such row exists.
///
/// # Errors
/// Returns [`Error::Restricted`] when `policy` is [`OnDelete::Restrict`] and
/// a child still references the row, or a database error.
pub fn delete_with(
    conn: &mut SqliteConnection,
    entity: Entity,
    id: i32,
    policy: OnDelete,
) -> Result<bool> {
    let deleted = conn.transaction(|conn| -> Result<bool> {
        if !exists(conn, entity, id)? {
            return Ok(false);
        }
        match policy {
            OnDelete::Orphan => {}
            OnDelete::Restrict => {
                for rel in entity.children() {
                    let dependents = count_children(conn, rel, id)?;
                    if dependents > 0 {
                        warn!(
                            entity = entity.label(),
                            id,
                            relationship = %rel.qualified_column(),
                            dependents,
                            "Delete restricted by dependent rows"
                        );
                        return Err(Error::Restricted {
                            entity: entity.label(),
                            id,
                            relationship: rel.qualified_column(),
                            dependents,
                        });
                    }
                }
            }
            OnDelete::Cascade => cascade_children(conn, entity, id)?,
        }
        delete_row(conn, entity, id)?;
        Ok(true)
    })?;

    if deleted {
        debug!(entity = entity.label(), id, ?policy, "Deleted row");
    }
    Ok(deleted)
}

fn cascade_children(conn: &mut SqliteConnection, entity: Entity, id: i32) -> Result<()> {
    for rel in entity.children() {
        if rel.optional {
            let cleared = diesel::sql_query(format!(
                "UPDATE {} SET {} = NULL WHERE {} = ?",
                rel.child.table(),
                rel.column,
                rel.column
            ))
            .bind::<Integer, _>(id)
            .execute(conn)?;
            if cleared > 0 {
                debug!(relationship = %rel.qualified_column(), parent = id, cleared, "Cleared optional references");
            }
            continue;
        }

        let child_ids: Vec<RowId> = diesel::sql_query(format!(
            "SELECT id FROM {} WHERE {} = ?",
            rel.child.table(),
            rel.column
        ))
        .bind::<Integer, _>(id)
        .load(conn)?;

        for child in child_ids {
            cascade_children(conn, rel.child, child.id)?;
            delete_row(conn, rel.child, child.id)?;
        }
    }
    Ok(())
}

fn exists(conn: &mut SqliteConnection, entity: Entity, id: i32) -> Result<bool> {
    let row: Count = diesel::sql_query(format!(
        "SELECT COUNT(*) AS count FROM {} WHERE id = ?",
        entity.table()
    ))
    .bind::<Integer, _>(id)
    .get_result(conn)?;
    Ok(row.count > 0)
}

/// Number of `rel.child` rows that reference `parent_id`.
///
/// # Errors
/// Returns a database error if the count query fails.
pub fn count_children(conn: &mut SqliteConnection, rel: &Relationship, parent_id: i32) -> Result<i64> {
    let row: Count = diesel::sql_query(format!(
        "SELECT COUNT(*) AS count FROM {} WHERE {} = ?",
        rel.child.table(),
        rel.column
    ))
    .bind::<Integer, _>(parent_id)
    .get_result(conn)?;
    Ok(row.count)
}

fn delete_row(conn: &mut SqliteConnection, entity: Entity, id: i32) -> Result<()> {
    diesel::sql_query(format!("DELETE FROM {} WHERE id = ?", entity.table()))
        .bind::<Integer, _>(id)
        .execute(conn)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::model::{NewAtBat, NewOut};
    use crate::store::testing;
    use crate::store::{at_bat, game, game_stats, inning, out, player, team, user};

    #[test]
    fn every_relationship_points_at_a_different_table() {
        for rel in RELATIONSHIPS {
            assert_ne!(rel.parent, rel.child, "{rel:?}");
        }
    }

    #[test]
    fn leaf_entities_have_no_children() {
        for entity in [Entity::BattingOrder, Entity::GameStats, Entity::Out, Entity::Steal] {
            assert_eq!(entity.children().count(), 0, "{entity:?}");
        }
    }

    #[test]
    fn player_has_six_dependent_relationships() {
        assert_eq!(Entity::Player.children().count(), 6);
    }

    #[test]
    fn delete_missing_row_is_false_for_every_policy() {
        let mut conn = testing::conn();
        for policy in [OnDelete::Orphan, OnDelete::Restrict, OnDelete::Cascade] {
            assert!(!delete_with(&mut conn, Entity::Team, 404, policy).unwrap());
        }
    }

    #[test]
    fn orphan_leaves_children_in_place() {
        let mut conn = testing::conn();
        let t = testing::team(&mut conn, "Tigers");
        let p = testing::player(&mut conn, t.id, "Joe");

        assert!(delete_with(&mut conn, Entity::Team, t.id, OnDelete::Orphan).unwrap());
        assert!(team::get_team_by_id(&mut conn, t.id).unwrap().is_none());
        assert_eq!(player::get_players_by_team(&mut conn, t.id).unwrap(), vec![p]);
    }

    #[test]
    fn restrict_refuses_while_children_exist() {
        let mut conn = testing::conn();
        let t = testing::team(&mut conn, "Tigers");
        testing::player(&mut conn, t.id, "Joe");

        let err = delete_with(&mut conn, Entity::Team, t.id, OnDelete::Restrict).unwrap_err();
        assert!(matches!(
            &err,
            Error::Restricted {
                entity: "team",
                relationship,
                dependents: 1,
                ..
            } if relationship == "players.team_id"
        ));
        assert!(team::get_team_by_id(&mut conn, t.id).unwrap().is_some());
    }

    #[test]
    fn restrict_names_the_referencing_column() {
        let mut conn = testing::conn();
        let t = testing::team(&mut conn, "Tigers");
        let batter = testing::player(&mut conn, t.id, "Joe");
        let fielder = testing::player(&mut conn, t.id, "Sam");
        let g = testing::game(&mut conn, t.id, "Lions");
        let i = inning::create_inning(&mut conn, g.id, 1).unwrap();
        let ab = at_bat::create_at_bat(&mut conn, NewAtBat::new(i.id, batter.id, "flyout")).unwrap();
        out::create_out(
            &mut conn,
            NewOut::new(ab.id, batter.id, "flyout").fielded_by(fielder.id),
        )
        .unwrap();

        let err = delete_with(&mut conn, Entity::Player, fielder.id, OnDelete::Restrict).unwrap_err();
        assert_eq!(
            err.to_string(),
            format!("cannot delete player {}: 1 outs.fielder_id still reference it", fielder.id)
        );
    }

    #[test]
    fn restrict_allows_childless_rows() {
        let mut conn = testing::conn();
        let t = testing::team(&mut conn, "Tigers");
        assert!(delete_with(&mut conn, Entity::Team, t.id, OnDelete::Restrict).unwrap());
    }

    #[test]
    fn cascade_removes_the_whole_tree() {
        let mut conn = testing::conn();
        let t = testing::team(&mut conn, "Tigers");
        let p = testing::player(&mut conn, t.id, "Joe");
        let g = testing::game(&mut conn, t.id, "Lions");
        let i = inning::create_inning(&mut conn, g.id, 1).unwrap();
        let ab = at_bat::create_at_bat(&mut conn, NewAtBat::new(i.id, p.id, "strikeout")).unwrap();
        let o = out::create_out(&mut conn, NewOut::new(ab.id, p.id, "strikeout")).unwrap();
        game_stats::create_game_stats(&mut conn, g.id, p.id).unwrap();

        assert!(delete_with(&mut conn, Entity::Team, t.id, OnDelete::Cascade).unwrap());

        assert!(player::get_player_by_id(&mut conn, p.id).unwrap().is_none());
        assert!(game::get_game_by_id(&mut conn, g.id).unwrap().is_none());
        assert!(inning::get_inning_by_id(&mut conn, i.id).unwrap().is_none());
        assert!(at_bat::get_at_bat_by_id(&mut conn, ab.id).unwrap().is_none());
        assert!(out::get_out_by_id(&mut conn, o.id).unwrap().is_none());
        assert!(game_stats::get_game_stats(&mut conn, g.id, p.id).unwrap().is_none());
    }

    #[test]
    fn cascade_clears_optional_references() {
        let mut conn = testing::conn();
        let coach = testing::user(&mut conn, "coach");
        let t = team::create_team(&mut conn, "Tigers", Some(coach.id)).unwrap();

        assert!(delete_with(&mut conn, Entity::User, coach.id, OnDelete::Cascade).unwrap());

        let kept = team::get_team_by_id(&mut conn, t.id).unwrap().unwrap();
        assert_eq!(kept.user_id, None);
        assert!(user::get_user_by_id(&mut conn, coach.id).unwrap().is_none());
    }

    #[test]
    fn cascade_on_fielder_keeps_the_out() {
        let mut conn = testing::conn();
        let t = testing::team(&mut conn, "Tigers");
        let batter = testing::player(&mut conn, t.id, "Joe");
        let fielder = testing::player(&mut conn, t.id, "Sam");
        let g = testing::game(&mut conn, t.id, "Lions");
        let i = inning::create_inning(&mut conn, g.id, 1).unwrap();
        let ab = at_bat::create_at_bat(&mut conn, NewAtBat::new(i.id, batter.id, "groundout")).unwrap();
        let o = out::create_out(
            &mut conn,
            NewOut::new(ab.id, batter.id, "groundout").at_base(1).fielded_by(fielder.id),
        )
        .unwrap();

        assert!(delete_with(&mut conn, Entity::Player, fielder.id, OnDelete::Cascade).unwrap());

        let kept = out::get_out_by_id(&mut conn, o.id).unwrap().unwrap();
        assert_eq!(kept.fielder_id, None);
        assert_eq!(kept.player_id, batter.id);
    }
}
