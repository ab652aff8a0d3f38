//! Core data structures for Kohs block puzzles.
//!
//! - [`Face`] / [`FACES`] - The global, read-only face catalog
//! - [`Rotation`] - Quarter-turn rotation of a block
//! - [`Block`] - A block's identity, position and rotation
//! - [`Board`] - A complete, validated arrangement of blocks on a grid

pub use self::{block::*, board::*, face::*, rotation::*};

pub(crate) mod block;
pub(crate) mod board;
pub(crate) mod face;
pub(crate) mod rotation;
