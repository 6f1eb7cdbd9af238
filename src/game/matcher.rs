//! The two-card selection state machine.
//!
//! ## Invariant
//!
//! At most two cards are flipped-and-pending at a time. The pending buffer
//! holds board indices in selection order:
//!
//! - 0 pending: any unlocked card may be selected
//! - 1 pending: selecting a second card evaluates the pair immediately
//! - mismatch: both cards stay face-up until `resolve_mismatch` flips them
//!   back down; selections are rejected in between
//!
//! Front ends usually show a mismatch for a moment before hiding it again.
//! That wait belongs to the caller: the matcher parks in the mismatch state
//! and the front end calls `resolve_mismatch` when its delay elapses.

use smallvec::SmallVec;

use super::GameError;
use crate::core::Board;

/// Result of a successful card selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlipOutcome {
    /// First card of the pair revealed; waiting for the second.
    FirstUp { index: usize },

    /// Second card matched the first. Both are now locked face-up.
    Matched { first: usize, second: usize },

    /// Second card did not match. Both stay face-up until
    /// [`CardMatcher::resolve_mismatch`] is called.
    Mismatch { first: usize, second: usize },
}

/// Tracks which cards are pending evaluation.
#[derive(Clone, Debug, Default)]
pub struct CardMatcher {
    /// Board indices of pending cards, in selection order.
    pending: SmallVec<[usize; 2]>,
    /// Set after a mismatch until the caller resolves it.
    awaiting_resolve: bool,
}

impl CardMatcher {
    /// Create a matcher with nothing pending.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Board indices currently flipped and pending evaluation.
    #[must_use]
    pub fn pending(&self) -> &[usize] {
        &self.pending
    }

    /// Is a mismatched pair waiting to be flipped back down?
    #[must_use]
    pub fn is_awaiting_resolve(&self) -> bool {
        self.awaiting_resolve
    }

    /// Select a card by board index.
    ///
    /// Rejects out-of-range indices, locked cards, and any selection while
    /// a mismatch awaits resolution.
    pub fn select(&mut self, board: &mut Board, index: usize) -> Result<FlipOutcome, GameError> {
        if self.awaiting_resolve {
            return Err(GameError::MismatchUnresolved);
        }

        let cells = board.cell_count();
        let card = board
            .card_mut(index)
            .ok_or(GameError::OutOfBounds { index, cells })?;
        if card.is_locked() {
            return Err(GameError::CardLocked { index });
        }

        card.flip_up();
        self.pending.push(index);
        debug_assert!(self.pending.len() <= 2);

        if self.pending.len() < 2 {
            return Ok(FlipOutcome::FirstUp { index });
        }

        let first = self.pending[0];
        let second = self.pending[1];
        // Both indices were range-checked when selected.
        let first_type = board.card(first).map(|c| c.type_id);
        let second_type = board.card(second).map(|c| c.type_id);

        if first_type == second_type {
            if let Some(card) = board.card_mut(first) {
                card.mark_matched();
            }
            if let Some(card) = board.card_mut(second) {
                card.mark_matched();
            }
            self.pending.clear();
            log::debug!("matched pair at {first} and {second}");
            Ok(FlipOutcome::Matched { first, second })
        } else {
            self.awaiting_resolve = true;
            log::debug!("mismatch at {first} and {second}, awaiting resolve");
            Ok(FlipOutcome::Mismatch { first, second })
        }
    }

    /// Flip a mismatched pair back face-down and clear the pending buffer.
    ///
    /// Errors if no mismatch is awaiting resolution.
    pub fn resolve_mismatch(&mut self, board: &mut Board) -> Result<(), GameError> {
        if !self.awaiting_resolve {
            return Err(GameError::NothingToResolve);
        }

        for &index in &self.pending {
            if let Some(card) = board.card_mut(index) {
                card.flip_down();
            }
        }
        self.pending.clear();
        self.awaiting_resolve = false;
        Ok(())
    }

    /// Drop all pending state without touching the board.
    ///
    /// Used when the board itself is replaced (restart, load).
    pub fn reset(&mut self) {
        self.pending.clear();
        self.awaiting_resolve = false;
    }
}
