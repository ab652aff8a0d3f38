use std::{fmt, str::FromStr};

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{FaceIndex, Rotation};

use super::pattern_generator::Difficulty;

/// Seed for deterministic board generation.
///
/// A 128-bit seed, written as 32 hexadecimal characters. Two games started
/// from the same seed and configuration get the same target pattern and the
/// same starting arrangement, which makes puzzles reproducible for testing
/// and for replaying a reported game.
///
/// # Example
///
/// ```
/// use kohs_engine::BoardSeed;
/// use rand::Rng as _;
///
/// let seed: BoardSeed = rand::rng().random();
/// let parsed: BoardSeed = seed.to_string().parse().unwrap();
/// assert_eq!(seed, parsed);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardSeed([u8; 16]);

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("invalid hex seed: {reason}")]
pub struct ParseSeedError {
    #[error(not(source))]
    reason: String,
}

impl BoardSeed {
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for BoardSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", u128::from_be_bytes(self.0))
    }
}

impl FromStr for BoardSeed {
    type Err = ParseSeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 32 {
            return Err(ParseSeedError {
                reason: format!("expected 32 characters, got {}", s.len()),
            });
        }
        let num = u128::from_str_radix(s, 16).map_err(|e| ParseSeedError {
            reason: format!("{s} ({e})"),
        })?;
        Ok(Self(num.to_be_bytes()))
    }
}

impl Serialize for BoardSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for BoardSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        hex_str.parse().map_err(serde::de::Error::custom)
    }
}

/// Allows generating random `BoardSeed` values with `rng.random()`.
impl Distribution<BoardSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> BoardSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        BoardSeed(seed)
    }
}

/// The single source of randomness used by the engine.
///
/// Pattern generation and shuffling draw only through this type, so a game
/// is fully determined by its [`BoardSeed`] and configuration.
#[derive(Debug, Clone)]
pub struct RandomSource {
    rng: Pcg32,
}

impl Default for RandomSource {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSource {
    /// Creates a random source seeded from the thread-local generator.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(rand::rng().random())
    }

    #[must_use]
    pub fn with_seed(seed: BoardSeed) -> Self {
        Self {
            rng: Pcg32::from_seed(seed.0),
        }
    }

    /// Draws a face, weighting solid against diagonal faces by difficulty.
    ///
    /// Within each family the face is chosen uniformly.
    pub fn face(&mut self, difficulty: Difficulty) -> FaceIndex {
        if self.rng.random_bool(difficulty.solid_probability()) {
            FaceIndex::SOLID[self.rng.random_range(0..FaceIndex::SOLID.len())]
        } else {
            FaceIndex::DIAGONAL[self.rng.random_range(0..FaceIndex::DIAGONAL.len())]
        }
    }

    /// Draws a rotation uniformly from the four quarter turns.
    pub fn rotation(&mut self) -> Rotation {
        Rotation::ALL[self.rng.random_range(0..Rotation::ALL.len())]
    }

    /// Draws a Fisher–Yates swap partner, uniform in `[0, i]`.
    pub fn index_up_to(&mut self, i: usize) -> usize {
        self.rng.random_range(0..=i)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seed(byte: u8) -> BoardSeed {
        BoardSeed::from_bytes([byte; 16])
    }

    #[test]
    fn test_seed_hex_format() {
        let seed = BoardSeed::from_bytes([
            0x01, 0x23, 0x45, 0x67, 0x89, 0xAB, 0xCD, 0xEF, 0xFE, 0xDC, 0xBA, 0x98, 0x76, 0x54,
            0x32, 0x10,
        ]);
        assert_eq!(seed.to_string(), "0123456789abcdeffedcba9876543210");
        assert_eq!(
            serde_json::to_string(&seed).unwrap(),
            "\"0123456789abcdeffedcba9876543210\""
        );
        assert_eq!(
            "0123456789ABCDEFFEDCBA9876543210".parse::<BoardSeed>().unwrap(),
            seed
        );
    }

    #[test]
    fn test_seed_rejects_bad_input() {
        assert!("".parse::<BoardSeed>().is_err());
        assert!("0123456789abcdef0123456789abcde".parse::<BoardSeed>().is_err());
        let err = "ghijklmnopqrstuvwxyzghijklmnopqr"
            .parse::<BoardSeed>()
            .unwrap_err();
        assert!(err.to_string().contains("invalid hex"));
        assert!(serde_json::from_str::<BoardSeed>("\"abc\"").is_err());
    }

    #[test]
    fn test_same_seed_same_draws() {
        let mut a = RandomSource::with_seed(seed(0x5A));
        let mut b = RandomSource::with_seed(seed(0x5A));
        for i in 0..50 {
            assert_eq!(a.face(Difficulty::Medium), b.face(Difficulty::Medium));
            assert_eq!(a.rotation(), b.rotation());
            assert_eq!(a.index_up_to(i), b.index_up_to(i));
        }
    }

    #[test]
    fn test_index_up_to_is_inclusive() {
        let mut source = RandomSource::with_seed(seed(7));
        let mut seen = [false; 4];
        for _ in 0..500 {
            let i = source.index_up_to(3);
            assert!(i <= 3);
            seen[i] = true;
        }
        assert!(seen.iter().all(|&s| s), "every index in [0, 3] should appear");
    }

    #[test]
    #[expect(clippy::cast_precision_loss)]
    fn test_face_family_follows_difficulty() {
        const DRAWS: usize = 4000;
        let solid_share = |difficulty| {
            let mut source = RandomSource::with_seed(seed(42));
            let solid = (0..DRAWS)
                .filter(|_| source.face(difficulty).face().kind().is_solid())
                .count();
            solid as f64 / DRAWS as f64
        };

        assert!((solid_share(Difficulty::Easy) - 0.7).abs() < 0.05);
        assert!((solid_share(Difficulty::Medium) - 4.0 / 6.0).abs() < 0.05);
        assert!((solid_share(Difficulty::Hard) - 0.3).abs() < 0.05);
    }
}
