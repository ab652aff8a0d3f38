use kohs_engine::{BoardSeed, Difficulty, GameConfig, GameType, GridSize};
use kohs_profile::GameCatalog;
use tracing::info;

use crate::{
    command::{GlobalArg, parse_game_type},
    tui::Runtime,
    util,
    view::widgets::BoardGeometry,
};

use self::app::PlayApp;

mod app;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    /// Game to launch
    #[clap(long, value_parser = parse_game_type, default_value = "kohs")]
    pub(super) game: GameType,
    /// Number of blocks on the board (4 or 16)
    #[clap(long, default_value_t = GridSize::Sixteen)]
    pub(super) grid: GridSize,
    /// Difficulty tier (easy, medium or hard)
    #[clap(long, default_value_t = Difficulty::Easy)]
    pub(super) difficulty: Difficulty,
    /// Seed for a reproducible first puzzle (32 hex digits)
    #[clap(long)]
    pub(super) seed: Option<BoardSeed>,
}

impl Default for PlayArg {
    fn default() -> Self {
        Self {
            game: GameType::Kohs,
            grid: GridSize::Sixteen,
            difficulty: Difficulty::Easy,
            seed: None,
        }
    }
}

pub(super) fn run(global: &GlobalArg, arg: &PlayArg) -> anyhow::Result<()> {
    let PlayArg {
        game,
        grid,
        difficulty,
        seed,
    } = arg;

    let game = GameCatalog.launch(*game)?;
    info!(game = %game.game_type, "launching {}", game.title);

    let config = GameConfig {
        grid: *grid,
        difficulty: *difficulty,
        drag_threshold: BoardGeometry::DRAG_THRESHOLD,
        ..GameConfig::default()
    };
    let seed = seed.unwrap_or_else(rand::random);
    let mut app = PlayApp::new(config, seed, global.open_recorder());

    Runtime::new().run(&mut app)?;

    let solved = app.solved();
    if solved.is_empty() {
        println!("No puzzle solved this time.");
    }
    for (i, metrics) in solved.iter().enumerate() {
        println!(
            "Puzzle {}: solved in {} with {} rotations and {} drags",
            i + 1,
            util::format_time(metrics.time_seconds),
            metrics.rotations.unwrap_or(0),
            metrics.drags.unwrap_or(0),
        );
    }
    Ok(())
}
