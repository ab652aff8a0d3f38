//! Per-user session history for the Kohs puzzle.
//!
//! This crate provides the [`SessionRecorder`](kohs_engine::SessionRecorder)
//! used by the game front-ends:
//!
//! - [`UserProfile`]: The persisted profile (user id and session list)
//! - [`ProfileStore`]: Where the profile lives (JSON file or memory)
//! - [`ProfileRecorder`]: Session ids, pending session and profile updates
//! - [`AnalyticsSummary`]: Aggregates over completed sessions
//! - [`GameCatalog`]: Games offered in the menu and whether they can be launched
//!
//! # Example
//!
//! ```
//! use kohs_engine::{GameType, SessionDifficulty, SessionMetrics, SessionRecorder as _};
//! use kohs_profile::{ProfileRecorder, ProfileStore};
//!
//! let mut recorder = ProfileRecorder::open(ProfileStore::memory());
//! recorder.start_session(GameType::Kohs, SessionDifficulty::Easy);
//! recorder
//!     .complete_session(SessionMetrics {
//!         time_seconds: 31.5,
//!         rotations: Some(12),
//!         drags: Some(4),
//!         errors: None,
//!     })
//!     .unwrap();
//!
//! let summary = recorder.analytics();
//! assert_eq!(summary.total_games, 1);
//! assert_eq!(summary.fastest_time, 31.5);
//! ```

pub use self::{analytics::*, catalog::*, profile::*, recorder::*, store::*};

mod analytics;
mod catalog;
mod profile;
mod recorder;
mod store;
