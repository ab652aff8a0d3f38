//! Kohs block design puzzle engine.
//!
//! The player reproduces a hidden pattern of colored blocks by rotating
//! blocks in place and swapping their positions. See [`core`] for the board
//! model and [`engine`] for the gameplay.

pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;
