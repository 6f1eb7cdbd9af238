//! Turn logic: the two-card matcher and the game session.
//!
//! - `matcher`: the flip-two-cards-and-evaluate state machine
//! - `session`: board + matcher + turn/match counters + save conversion

pub mod matcher;
pub mod session;

pub use matcher::{CardMatcher, FlipOutcome};
pub use session::{GameSession, TurnEvent};

use thiserror::Error;

/// Errors from selecting cards and resolving turns.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("board index {index} out of range (board has {cells} cells)")]
    OutOfBounds { index: usize, cells: usize },

    #[error("card {index} is locked (face-up or matched)")]
    CardLocked { index: usize },

    #[error("a mismatched pair is awaiting resolution")]
    MismatchUnresolved,

    #[error("no mismatched pair to resolve")]
    NothingToResolve,
}
