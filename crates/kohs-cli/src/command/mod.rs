use std::path::PathBuf;

use clap::{Parser, Subcommand};
use kohs_engine::GameType;
use kohs_profile::{ProfileRecorder, ProfileStore};

use crate::util;

use self::{analytics::AnalyticsArg, play::PlayArg};

mod analytics;
mod clear_data;
mod games;
mod play;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    #[clap(flatten)]
    global: GlobalArg,
    /// What to run (defaults to `play`)
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Debug, Clone, clap::Args)]
struct GlobalArg {
    /// Profile file holding the recorded sessions
    #[clap(
        long,
        global = true,
        env = "KOHS_PROFILE",
        default_value = "./data/profile.json"
    )]
    profile: PathBuf,
    /// Log file (filter with RUST_LOG)
    #[clap(
        long,
        global = true,
        env = "KOHS_LOG_FILE",
        default_value = "./data/kohs.log"
    )]
    log_file: PathBuf,
}

impl GlobalArg {
    fn open_recorder(&self) -> ProfileRecorder {
        ProfileRecorder::open(ProfileStore::file(&self.profile))
    }
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Play Kohs Block Design in the terminal
    Play(#[clap(flatten)] PlayArg),
    /// Show statistics of completed sessions
    Analytics(#[clap(flatten)] AnalyticsArg),
    /// List the available games
    Games,
    /// Delete every recorded session and start a new profile
    ClearData,
}

pub fn run() -> anyhow::Result<()> {
    let CommandArgs { global, mode } = CommandArgs::parse();
    util::init_tracing(&global.log_file)?;

    match mode.unwrap_or_else(|| Mode::Play(PlayArg::default())) {
        Mode::Play(arg) => play::run(&global, &arg)?,
        Mode::Analytics(arg) => analytics::run(&global, &arg)?,
        Mode::Games => games::run(),
        Mode::ClearData => clear_data::run(&global),
    }
    Ok(())
}

/// Parses a game identifier such as `kohs` or `go-no-go`.
fn parse_game_type(s: &str) -> Result<GameType, String> {
    GameType::ALL
        .into_iter()
        .find(|game_type| game_type.as_str() == s.trim())
        .ok_or_else(|| {
            let names = GameType::ALL.map(GameType::as_str);
            format!("unknown game: {s} (expected one of {})", names.join(", "))
        })
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory as _;
    use kohs_engine::{Difficulty, GridSize};

    use super::*;

    #[test]
    fn test_cli_is_well_formed() {
        CommandArgs::command().debug_assert();
    }

    #[test]
    fn test_defaults_to_play() {
        let args = CommandArgs::try_parse_from(["kohs"]).unwrap();
        assert!(args.mode.is_none());
    }

    #[test]
    fn test_play_options() {
        let args = CommandArgs::try_parse_from([
            "kohs",
            "play",
            "--grid",
            "4",
            "--difficulty",
            "hard",
            "--seed",
            "000102030405060708090a0b0c0d0e0f",
        ])
        .unwrap();
        let Some(Mode::Play(arg)) = args.mode else {
            panic!("expected play");
        };
        assert_eq!(arg.grid, GridSize::Four);
        assert_eq!(arg.difficulty, Difficulty::Hard);
        assert!(arg.seed.is_some());

        assert!(CommandArgs::try_parse_from(["kohs", "play", "--grid", "9"]).is_err());
    }

    #[test]
    fn test_global_options_after_subcommand() {
        let args = CommandArgs::try_parse_from([
            "kohs",
            "analytics",
            "--json",
            "--game",
            "go-no-go",
            "--profile",
            "/tmp/p.json",
        ])
        .unwrap();
        assert_eq!(args.global.profile, PathBuf::from("/tmp/p.json"));
        let Some(Mode::Analytics(arg)) = args.mode else {
            panic!("expected analytics");
        };
        assert!(arg.json);
        assert_eq!(arg.game, Some(GameType::GoNoGo));
    }

    #[test]
    fn test_parse_game_type() {
        for game_type in GameType::ALL {
            assert_eq!(parse_game_type(game_type.as_str()), Ok(game_type));
        }
        assert!(parse_game_type("chess").is_err());
    }
}
