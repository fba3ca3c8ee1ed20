//! Command-line interface definitions.
//!
//! Defines the CLI structure for the scorebook binary using `clap`. The
//! subcommands bootstrap the database and print read-only reports over it.

use clap::{Args, Parser, Subcommand};
use std::io::IsTerminal;
use std::path::PathBuf;

/// Baseball and softball scorebook data backend
#[derive(Parser, Debug)]
#[command(name = "scorebook")]
#[command(version)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true, default_value = "config.toml")]
    pub config: PathBuf,

    /// Color output mode [auto, always, never]
    #[arg(
        long,
        global = true,
        default_value = "auto",
        hide_possible_values = true
    )]
    pub color: ColorChoice,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Color output mode for terminal rendering.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ColorChoice {
    /// Color when stdout is a terminal
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl ColorChoice {
    /// Resolve the choice against the current stdout.
    #[must_use]
    pub fn enabled(self) -> bool {
        match self {
            ColorChoice::Auto => std::io::stdout().is_terminal(),
            ColorChoice::Always => true,
            ColorChoice::Never => false,
        }
    }
}

/// Top-level subcommands for the scorebook CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create the database if needed and apply pending migrations
    Init,

    /// Verify the database is reachable and report its schema version
    Check,

    /// List the teams managed by a user
    Teams(TeamsArgs),

    /// List a team's players
    Roster(RosterArgs),

    /// Show the line score and batting lines of a game
    BoxScore(BoxScoreArgs),
}

/// Arguments for `scorebook teams`.
#[derive(Args, Debug)]
pub struct TeamsArgs {
    /// Username of the managing coach
    pub username: String,
}

/// Arguments for `scorebook roster`.
#[derive(Args, Debug)]
pub struct RosterArgs {
    /// Team id
    pub team_id: i32,
}

/// Arguments for `scorebook box-score`.
#[derive(Args, Debug)]
pub struct BoxScoreArgs {
    /// Game id
    pub game_id: i32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_follow_subcommand() {
        let cli = Cli::parse_from(["scorebook", "roster", "3", "--json", "-c", "other.toml"]);
        assert!(cli.json);
        assert!(!cli.quiet);
        assert_eq!(cli.config, PathBuf::from("other.toml"));
        assert!(matches!(cli.command, Commands::Roster(RosterArgs { team_id: 3 })));
    }

    #[test]
    fn box_score_uses_kebab_case() {
        let cli = Cli::parse_from(["scorebook", "box-score", "12"]);
        assert!(matches!(cli.command, Commands::BoxScore(BoxScoreArgs { game_id: 12 })));
        assert_eq!(cli.config, PathBuf::from("config.toml"));
    }

    #[test]
    fn color_choice_parses_and_resolves() {
        let cli = Cli::parse_from(["scorebook", "--color", "never", "check"]);
        assert_eq!(cli.color, ColorChoice::Never);
        assert!(!cli.color.enabled());
        assert!(ColorChoice::Always.enabled());
    }

    #[test]
    fn non_numeric_team_id_is_rejected() {
        assert!(Cli::try_parse_from(["scorebook", "roster", "tigers"]).is_err());
    }
}
