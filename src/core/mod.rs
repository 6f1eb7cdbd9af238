//! Core game types: cards, board geometry, RNG.
//!
//! This module contains the building blocks that carry no turn logic.
//! The matcher and session in `crate::game` drive these types.

pub mod board;
pub mod card;
pub mod rng;

pub use board::{Board, BoardSize, MAX_AXIS, MIN_AXIS};
pub use card::{Card, TypeId};
pub use rng::{GameRng, GameRngState};
