//! Contract between the puzzle engine and the session recorder.
//!
//! The engine only announces when a game starts and when it is solved; the
//! recorder owns ids, timestamps and persistence. Keeping this behind the
//! [`SessionRecorder`] trait lets the engine run without any storage backend.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Difficulty, GridSize};

/// Games known to the recorder. Only Kohs is playable; the others are listed
/// in the menu as coming soon.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::IsVariant, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum GameType {
    Kohs,
    Stroop,
    GoNoGo,
    TrailMaking,
}

impl GameType {
    pub const ALL: [Self; 4] = [Self::Kohs, Self::Stroop, Self::GoNoGo, Self::TrailMaking];

    /// Identifier used in session ids and stored records.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Kohs => "kohs",
            Self::Stroop => "stroop",
            Self::GoNoGo => "go-no-go",
            Self::TrailMaking => "trail-making",
        }
    }
}

impl fmt::Display for GameType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Difficulty label stored with a session.
///
/// Covers both the block-count labels and the tier labels that stored
/// sessions may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SessionDifficulty {
    #[serde(rename = "4-blocks")]
    FourBlocks,
    #[serde(rename = "16-blocks")]
    SixteenBlocks,
    Easy,
    Medium,
    Hard,
}

impl SessionDifficulty {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FourBlocks => "4-blocks",
            Self::SixteenBlocks => "16-blocks",
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }
}

impl fmt::Display for SessionDifficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Difficulty> for SessionDifficulty {
    fn from(value: Difficulty) -> Self {
        match value {
            Difficulty::Easy => Self::Easy,
            Difficulty::Medium => Self::Medium,
            Difficulty::Hard => Self::Hard,
        }
    }
}

impl From<GridSize> for SessionDifficulty {
    fn from(value: GridSize) -> Self {
        match value {
            GridSize::Four => Self::FourBlocks,
            GridSize::Sixteen => Self::SixteenBlocks,
        }
    }
}

/// Opaque identifier of a recorded session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(pub String);

/// Final metrics reported when a game is solved.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionMetrics {
    pub time_seconds: f64,
    pub rotations: Option<u32>,
    pub drags: Option<u32>,
    pub errors: Option<u32>,
}

/// A stored session, as persisted by the recorder and read by analytics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    pub id: SessionId,
    pub game_type: GameType,
    pub difficulty: SessionDifficulty,
    /// Start time in milliseconds since the Unix epoch.
    pub timestamp: i64,
    pub completed: bool,
    pub time_seconds: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotations: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drags: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum CompleteSessionError {
    #[display("no active session to complete")]
    NoActiveSession,
}

/// Capability the engine uses to report sessions.
///
/// Implementations own storage. They report failures to complete a session
/// through the returned error; the engine does not retry.
pub trait SessionRecorder {
    /// Opens a new, incomplete session and returns its id.
    fn start_session(&mut self, game_type: GameType, difficulty: SessionDifficulty) -> SessionId;

    /// Finalizes the open session with its metrics.
    ///
    /// Without an open session this is a no-op that returns
    /// [`CompleteSessionError::NoActiveSession`].
    fn complete_session(&mut self, metrics: SessionMetrics) -> Result<(), CompleteSessionError>;

    /// Returns every stored session, oldest first.
    fn sessions(&self) -> Vec<SessionRecord>;
}

impl<R> SessionRecorder for &mut R
where
    R: SessionRecorder + ?Sized,
{
    fn start_session(&mut self, game_type: GameType, difficulty: SessionDifficulty) -> SessionId {
        (**self).start_session(game_type, difficulty)
    }

    fn complete_session(&mut self, metrics: SessionMetrics) -> Result<(), CompleteSessionError> {
        (**self).complete_session(metrics)
    }

    fn sessions(&self) -> Vec<SessionRecord> {
        (**self).sessions()
    }
}
