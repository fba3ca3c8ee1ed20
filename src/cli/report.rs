//! Read-only reports: a coach's teams, a roster, and a game's box score.

use std::collections::HashMap;

use diesel::SqliteConnection;
use serde::Serialize;
use tabled::{Table, Tabled};

use crate::cli::output;
use crate::db::model::{Game, GameStats, Inning, Player, Team};
use crate::error::{Error, Result};
use crate::store::{batting_order, game, game_stats, inning, player, team, user};

#[derive(Tabled)]
struct TeamRow {
    #[tabled(rename = "ID")]
    id: i32,
    #[tabled(rename = "Team")]
    name: String,
    #[tabled(rename = "Players")]
    players: usize,
    #[tabled(rename = "Games")]
    games: usize,
    #[tabled(rename = "Created")]
    created: String,
}

#[derive(Tabled)]
struct PlayerRow {
    #[tabled(rename = "ID")]
    id: i32,
    #[tabled(rename = "#")]
    number: String,
    #[tabled(rename = "Name")]
    name: String,
}

impl From<&Player> for PlayerRow {
    fn from(player: &Player) -> Self {
        Self {
            id: player.id,
            number: player.number.map(|n| n.to_string()).unwrap_or_default(),
            name: player.name.clone(),
        }
    }
}

#[derive(Tabled)]
struct LineScoreRow {
    #[tabled(rename = "Inning")]
    inning: String,
    #[tabled(rename = "Us")]
    team_runs: i32,
    #[tabled(rename = "Them")]
    opponent_runs: i32,
}

#[derive(Tabled)]
struct BattingRow {
    #[tabled(rename = "Player")]
    name: String,
    #[tabled(rename = "AB")]
    at_bats: i32,
    #[tabled(rename = "H")]
    hits: i32,
    #[tabled(rename = "R")]
    runs: i32,
    #[tabled(rename = "RBI")]
    rbis: i32,
    #[tabled(rename = "BB")]
    walks: i32,
    #[tabled(rename = "SO")]
    strikeouts: i32,
    #[tabled(rename = "SB")]
    stolen_bases: i32,
    #[tabled(rename = "CS")]
    caught_stealing: i32,
}

/// One player's stats line with their display name.
#[derive(Debug, Serialize)]
struct BattingLine {
    player: String,
    #[serde(flatten)]
    stats: GameStats,
}

/// Everything the box score shows for one game.
#[derive(Debug, Serialize)]
struct BoxScore {
    game: Game,
    team: Option<Team>,
    innings: Vec<Inning>,
    team_total: i32,
    opponent_total: i32,
    batting: Vec<BattingLine>,
}

/// `scorebook teams <username>`
pub fn teams(conn: &mut SqliteConnection, username: &str) -> Result<()> {
    let coach = user::get_user_by_username(conn, username)?.ok_or_else(|| Error::NotFound {
        entity: "user",
        key: username.to_string(),
    })?;
    let teams = team::get_teams_by_user(conn, coach.id)?;

    if output::is_json() {
        for team in &teams {
            output::record("team", team)?;
        }
        return Ok(());
    }

    output::section(&format!("Teams managed by {}", output::highlight(&coach.username)));
    if teams.is_empty() {
        output::note("No teams");
        return Ok(());
    }

    let mut rows = Vec::with_capacity(teams.len());
    for team in &teams {
        rows.push(TeamRow {
            id: team.id,
            name: team.name.clone(),
            players: player::get_players_by_team(conn, team.id)?.len(),
            games: game::get_games_by_team(conn, team.id)?.len(),
            created: team.created_at.format("%Y-%m-%d").to_string(),
        });
    }
    output::lines(&Table::new(rows).to_string());
    Ok(())
}

/// `scorebook roster <team-id>`
pub fn roster(conn: &mut SqliteConnection, team_id: i32) -> Result<()> {
    let team = team::get_team_by_id(conn, team_id)?.ok_or_else(|| Error::NotFound {
        entity: "team",
        key: team_id.to_string(),
    })?;
    let players = player::get_players_by_team(conn, team.id)?;

    if output::is_json() {
        for player in &players {
            output::record("player", player)?;
        }
        return Ok(());
    }

    output::section(&format!("{} roster", output::highlight(&team.name)));
    if players.is_empty() {
        output::note("No players");
        return Ok(());
    }
    output::lines(&Table::new(players.iter().map(PlayerRow::from)).to_string());
    Ok(())
}

/// `scorebook box-score <game-id>`
pub fn box_score(conn: &mut SqliteConnection, game_id: i32) -> Result<()> {
    let report = load_box_score(conn, game_id)?;

    if output::is_json() {
        return output::record("box_score", &report);
    }

    let team_name = report
        .team
        .as_ref()
        .map_or_else(|| format!("team {}", report.game.team_id), |t| t.name.clone());
    output::section(&format!(
        "{} vs {}",
        output::highlight(&team_name),
        output::highlight(&report.game.opponent)
    ));
    output::field("Date", report.game.date.format("%Y-%m-%d %H:%M"));
    output::field(
        "Score",
        format!("{}-{}", report.team_total, report.opponent_total),
    );

    output::section("Line score");
    if report.innings.is_empty() {
        output::note("No innings recorded");
    } else {
        let mut rows: Vec<LineScoreRow> = report
            .innings
            .iter()
            .map(|inning| LineScoreRow {
                inning: inning.inning_number.to_string(),
                team_runs: inning.team_runs,
                opponent_runs: inning.opponent_runs,
            })
            .collect();
        rows.push(LineScoreRow {
            inning: "Total".into(),
            team_runs: report.team_total,
            opponent_runs: report.opponent_total,
        });
        output::lines(&Table::new(rows).to_string());
    }

    output::section("Batting");
    if report.batting.is_empty() {
        output::note("No stats recorded");
    } else {
        let rows = report.batting.iter().map(|line| BattingRow {
            name: line.player.clone(),
            at_bats: line.stats.at_bats,
            hits: line.stats.hits,
            runs: line.stats.runs,
            rbis: line.stats.rbis,
            walks: line.stats.walks,
            strikeouts: line.stats.strikeouts,
            stolen_bases: line.stats.stolen_bases,
            caught_stealing: line.stats.caught_stealing,
        });
        output::lines(&Table::new(rows).to_string());
    }
    Ok(())
}

fn load_box_score(conn: &mut SqliteConnection, game_id: i32) -> Result<BoxScore> {
    let game = game::get_game_by_id(conn, game_id)?.ok_or_else(|| Error::NotFound {
        entity: "game",
        key: game_id.to_string(),
    })?;
    let team = team::get_team_by_id(conn, game.team_id)?;
    let innings = inning::get_innings_by_game(conn, game.id)?;
    let team_total = innings.iter().map(|i| i.team_runs).sum();
    let opponent_total = innings.iter().map(|i| i.opponent_runs).sum();

    // Batting lines follow the lineup; players outside it go last.
    let lineup: HashMap<i32, i32> = batting_order::get_batting_order(conn, game.id)?
        .into_iter()
        .map(|slot| (slot.player_id, slot.order_number))
        .collect();
    let mut stats = game_stats::get_game_stats_by_game(conn, game.id)?;
    stats.sort_by_key(|s| (lineup.get(&s.player_id).copied().unwrap_or(i32::MAX), s.id));

    let mut batting = Vec::with_capacity(stats.len());
    for stats in stats {
        let player = player::get_player_by_id(conn, stats.player_id)?
            .map_or_else(|| format!("player {}", stats.player_id), |p| p.name);
        batting.push(BattingLine { player, stats });
    }

    Ok(BoxScore {
        game,
        team,
        innings,
        team_total,
        opponent_total,
        batting,
    })
}
