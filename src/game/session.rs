//! A full game in progress: board, matcher, and counters.
//!
//! ## Turns and matches
//!
//! One *turn* is a flip-two-cards-and-evaluate cycle. `turns_taken`
//! increments on every second-card evaluation, match or not;
//! `matches_found` increments only on matches. The game is won when
//! `matches_found` reaches the board's pair count.
//!
//! ## Persistence
//!
//! `to_save`/`from_save` convert to the JSON save format. Only board
//! layout, match flags, and counters persist; a pending selection or
//! unresolved mismatch is dropped, so unmatched cards always restore
//! face-down.

use super::matcher::{CardMatcher, FlipOutcome};
use super::GameError;
use crate::core::{Board, BoardSize, GameRng};
use crate::save::{GameSave, SaveError};

/// What a completed flip meant for the game.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnEvent {
    /// First card of the turn revealed.
    CardRevealed { index: usize },

    /// Pair found. `won` is set when it was the last pair.
    MatchFound { first: usize, second: usize, won: bool },

    /// Pair did not match; call [`GameSession::resolve_mismatch`] after the
    /// front end's reveal delay.
    Mismatch { first: usize, second: usize },
}

/// A game in progress.
#[derive(Clone, Debug)]
pub struct GameSession {
    board: Board,
    matcher: CardMatcher,
    matches_found: u32,
    turns_taken: u32,
}

impl GameSession {
    /// Deal a fresh board and start at zero turns and matches.
    #[must_use]
    pub fn new(size: BoardSize, seed: u64) -> Self {
        let mut rng = GameRng::new(seed);
        let board = Board::deal(size, &mut rng);
        log::info!("dealt {size} board (seed {seed})");

        Self {
            board,
            matcher: CardMatcher::new(),
            matches_found: 0,
            turns_taken: 0,
        }
    }

    /// The board being played.
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Pairs found so far.
    #[must_use]
    pub fn matches_found(&self) -> u32 {
        self.matches_found
    }

    /// Two-card evaluations taken so far.
    #[must_use]
    pub fn turns_taken(&self) -> u32 {
        self.turns_taken
    }

    /// Board indices currently flipped and pending evaluation.
    #[must_use]
    pub fn pending(&self) -> &[usize] {
        self.matcher.pending()
    }

    /// Is a mismatched pair waiting to be flipped back down?
    #[must_use]
    pub fn is_awaiting_resolve(&self) -> bool {
        self.matcher.is_awaiting_resolve()
    }

    /// Have all pairs been found?
    #[must_use]
    pub fn is_won(&self) -> bool {
        self.matches_found as usize == self.board.size().pair_count()
    }

    /// Flip the card at `index`.
    ///
    /// Counts a turn on every second-card evaluation and a match when the
    /// pair agrees. Selection errors leave all counters untouched.
    pub fn flip_card(&mut self, index: usize) -> Result<TurnEvent, GameError> {
        let outcome = self.matcher.select(&mut self.board, index)?;

        Ok(match outcome {
            FlipOutcome::FirstUp { index } => TurnEvent::CardRevealed { index },
            FlipOutcome::Matched { first, second } => {
                self.turns_taken += 1;
                self.matches_found += 1;
                let won = self.is_won();
                if won {
                    log::info!(
                        "board cleared in {} turns ({} matches)",
                        self.turns_taken,
                        self.matches_found
                    );
                }
                TurnEvent::MatchFound { first, second, won }
            }
            FlipOutcome::Mismatch { first, second } => {
                self.turns_taken += 1;
                TurnEvent::Mismatch { first, second }
            }
        })
    }

    /// Flip a mismatched pair back face-down.
    pub fn resolve_mismatch(&mut self) -> Result<(), GameError> {
        self.matcher.resolve_mismatch(&mut self.board)
    }

    /// Abandon the current board and re-deal the same size.
    pub fn restart(&mut self, seed: u64) {
        let size = self.board.size();
        let mut rng = GameRng::new(seed);
        self.board = Board::deal(size, &mut rng);
        self.matcher.reset();
        self.matches_found = 0;
        self.turns_taken = 0;
        log::info!("restarted {size} board (seed {seed})");
    }

    /// Snapshot the session as a save document.
    #[must_use]
    pub fn to_save(&self) -> GameSave {
        GameSave::new(self.matches_found, self.turns_taken, &self.board)
    }

    /// Rebuild a session from a validated save.
    pub fn from_save(save: &GameSave) -> Result<Self, SaveError> {
        let board = save.to_board()?;
        Ok(Self {
            board,
            matcher: CardMatcher::new(),
            matches_found: save.matches_found,
            turns_taken: save.turns_taken,
        })
    }
}
