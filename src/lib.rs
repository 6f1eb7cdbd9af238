//! # pairs
//!
//! Core logic for a concentration (memory-matching) card game: a
//! rectangular board of face-down cards is revealed in pairs, matching
//! pairs stay face-up, and the game tracks turns and matches.
//!
//! ## Design Principles
//!
//! 1. **Front-end agnostic**: No rendering, input, or timers. Timed
//!    behavior (flipping a mismatch back after a delay) is surfaced as
//!    explicit state the caller resolves.
//!
//! 2. **Deterministic**: Board deals are driven by a seeded RNG, so the
//!    same seed always produces the same board.
//!
//! 3. **Typed errors everywhere**: Selecting a locked card or saving to a
//!    bad name is an error value, never a panic or a silent no-op.
//!
//! ## Modules
//!
//! - `core`: Cards, board geometry and dealing, RNG
//! - `game`: The two-card matcher and the game session
//! - `save`: JSON save format, validation, and the on-disk store
//! - `flow`: Menu / size-select / load-menu screen state machine

pub mod core;
pub mod flow;
pub mod game;
pub mod save;

// Re-export commonly used types
pub use crate::core::{Board, BoardSize, Card, GameRng, GameRngState, TypeId};

pub use crate::game::{CardMatcher, FlipOutcome, GameError, GameSession, TurnEvent};

pub use crate::save::{sanitize_name, CardState, GameSave, SaveError, SaveStore, SAVE_VERSION};

pub use crate::flow::{FlowError, GameFlow, Screen, PLAYABLE_SIZES};
