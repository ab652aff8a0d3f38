//! Puzzle logic and game lifecycle.
//!
//! This module builds the gameplay on top of the core data structures:
//!
//! - [`generate_pattern`] - Random target pattern for a grid and difficulty tier
//! - [`shuffle_board`] - Scrambled starting arrangement of a target's blocks
//! - [`boards_match`] - Cell-by-cell completion check
//! - [`InteractionEngine`] - Click, tap and drag-to-swap gesture state machine
//! - [`GameMetrics`] - Start time, rotation and drag counters
//! - [`KohsGame`] - One puzzle from start to the end of the confirmation delay
//! - [`SessionRecorder`] - Where finished games are reported
//! - [`BoardSeed`] - Seed for deterministic board generation
//!
//! # Game Flow
//!
//! 1. Generate a target pattern and shuffle a copy of it for the player
//! 2. The player rotates blocks (click or tap) and swaps them (drag)
//! 3. After every change the player board is compared to the target
//! 4. On a match the session is recorded and, after a short delay, the game
//!    finishes
//!
//! # Example
//!
//! ```
//! use kohs_engine::{
//!     BoardSeed, Difficulty, GridSize, RandomSource, boards_match, generate_pattern,
//!     shuffle_board,
//! };
//!
//! let mut rng = RandomSource::with_seed(BoardSeed::from_bytes([7; 16]));
//! let target = generate_pattern(GridSize::Sixteen, Difficulty::Medium, &mut rng);
//! let player = shuffle_board(&target, &mut rng);
//!
//! assert_eq!(player.face_counts(), target.face_counts());
//! if boards_match(&target, &player) {
//!     println!("lucky shuffle");
//! }
//! ```

pub use self::{
    board_shuffler::*, completion::*, game_metrics::*, game_session::*, interaction::*,
    pattern_generator::*, random::*, recorder::*,
};

mod board_shuffler;
mod completion;
mod game_metrics;
mod game_session;
mod interaction;
mod pattern_generator;
mod random;
mod recorder;
