use std::str::FromStr;

use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use crate::{Block, BlockId, Board, GridSize, MAX_BLOCKS};

use super::random::RandomSource;

/// Difficulty tier of a puzzle.
///
/// The tier only changes how often diagonal faces appear in the target
/// pattern; rotations are always drawn uniformly.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    derive_more::Display,
    derive_more::IsVariant,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    #[display("easy")]
    Easy,
    #[display("medium")]
    Medium,
    #[display("hard")]
    Hard,
}

#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("unknown difficulty: {_0} (expected easy, medium or hard)")]
pub struct ParseDifficultyError(#[error(not(source))] String);

impl Difficulty {
    pub const ALL: [Self; 3] = [Self::Easy, Self::Medium, Self::Hard];

    /// Probability that a cell draws a solid face instead of a diagonal one.
    ///
    /// | tier   | solid | diagonal |
    /// |--------|-------|----------|
    /// | easy   | 70%   | 30%      |
    /// | medium | 4/6   | 2/6      |
    /// | hard   | 30%   | 70%      |
    ///
    /// Medium matches a uniform draw over all six catalog faces.
    #[must_use]
    pub const fn solid_probability(self) -> f64 {
        match self {
            Self::Easy => 0.7,
            Self::Medium => 4.0 / 6.0,
            Self::Hard => 0.3,
        }
    }
}

impl FromStr for Difficulty {
    type Err = ParseDifficultyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|difficulty| difficulty.to_string().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseDifficultyError(s.to_owned()))
    }
}

/// Generates a target pattern covering every cell of `grid`.
///
/// Each cell independently draws a face (weighted by `difficulty`) and a
/// uniform rotation. Block ids are assigned sequentially in row-major order.
pub fn generate_pattern(grid: GridSize, difficulty: Difficulty, rng: &mut RandomSource) -> Board {
    let blocks = grid
        .cells()
        .zip(0..)
        .map(|(position, id)| {
            let face = rng.face(difficulty);
            let rotation = rng.rotation();
            Block::new(BlockId(id), position, face, rotation)
        })
        .collect::<ArrayVec<_, MAX_BLOCKS>>();
    Board::from_parts(grid, blocks)
}
