//! The persisted game state and its invariants.
//!
//! A save is a flat JSON document: counters, grid dimensions, and one
//! `CardState` per board cell in row-major order. `validate` enforces the
//! structural invariants before a save is handed back to the game, so a
//! hand-edited or truncated file fails `load` instead of producing a board
//! that can never be cleared.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::error::SaveError;
use super::SAVE_VERSION;
use crate::core::{Board, BoardSize, Card, TypeId};

/// Persisted state of a single card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardState {
    /// Position in row-major traversal order.
    pub board_index: u32,
    /// Card face identifier.
    pub type_id: u16,
    /// Has this card's pair been found?
    pub is_matched: bool,
}

/// A complete saved game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSave {
    /// Save format version for forward-compatibility checks.
    pub version: u32,

    /// Save timestamp (unix milliseconds).
    pub timestamp: u64,

    /// Pairs found so far.
    pub matches_found: u32,

    /// Two-card evaluations taken so far.
    pub turns_taken: u32,

    /// Grid width.
    pub columns: u8,

    /// Grid height.
    pub rows: u8,

    /// One entry per board cell, in board-index order.
    pub cards: Vec<CardState>,
}

impl GameSave {
    /// Assemble a save from game state. Stamps the current time.
    #[must_use]
    pub fn new(matches_found: u32, turns_taken: u32, board: &Board) -> Self {
        let cards = board
            .cards()
            .enumerate()
            .map(|(index, card)| CardState {
                board_index: index as u32,
                type_id: card.type_id.raw(),
                is_matched: card.is_matched,
            })
            .collect();

        Self {
            version: SAVE_VERSION,
            timestamp: current_timestamp(),
            matches_found,
            turns_taken,
            columns: board.size().columns,
            rows: board.size().rows,
            cards,
        }
    }

    /// The board dimensions recorded in this save.
    pub fn board_size(&self) -> Result<BoardSize, SaveError> {
        BoardSize::try_new(self.columns, self.rows)
            .ok_or_else(|| SaveError::Corrupted(format!("unsupported grid {}x{}", self.columns, self.rows)))
    }

    /// Refresh the timestamp before re-saving.
    pub fn update_timestamp(&mut self) {
        self.timestamp = current_timestamp();
    }

    /// Check the structural invariants.
    ///
    /// - card count fills the grid
    /// - every board index appears exactly once
    /// - every type appears exactly twice (one singleton allowed on odd grids)
    /// - matched cards come in complete pairs, totalling `matches_found`
    /// - at least one turn per match
    pub fn validate(&self) -> Result<(), SaveError> {
        let size = self.board_size()?;
        let cells = size.cell_count();

        if self.cards.len() != cells {
            return Err(SaveError::Corrupted(format!(
                "{} card states for a {} board ({} cells)",
                self.cards.len(),
                size,
                cells
            )));
        }

        let mut seen = vec![false; cells];
        for card in &self.cards {
            let index = card.board_index as usize;
            if index >= cells {
                return Err(SaveError::Corrupted(format!("board index {index} out of range")));
            }
            if seen[index] {
                return Err(SaveError::Corrupted(format!("duplicate board index {index}")));
            }
            seen[index] = true;
        }

        let mut total: FxHashMap<u16, u32> = FxHashMap::default();
        let mut matched: FxHashMap<u16, u32> = FxHashMap::default();
        for card in &self.cards {
            *total.entry(card.type_id).or_insert(0) += 1;
            if card.is_matched {
                *matched.entry(card.type_id).or_insert(0) += 1;
            }
        }

        let mut singletons = 0;
        for (&type_id, &count) in &total {
            match count {
                2 => {}
                1 => singletons += 1,
                n => {
                    return Err(SaveError::Corrupted(format!(
                        "type {type_id} appears {n} times"
                    )))
                }
            }
        }
        let expected_singletons = usize::from(size.has_singleton());
        if singletons != expected_singletons {
            return Err(SaveError::Corrupted(format!(
                "{singletons} unpaired types on a {size} board"
            )));
        }

        let mut matched_pairs = 0u32;
        for (&type_id, &count) in &matched {
            match count {
                2 => matched_pairs += 1,
                n => {
                    return Err(SaveError::Corrupted(format!(
                        "type {type_id} has {n} matched cards"
                    )))
                }
            }
        }
        if matched_pairs != self.matches_found {
            return Err(SaveError::Corrupted(format!(
                "matches_found is {} but {} pairs are matched",
                self.matches_found, matched_pairs
            )));
        }

        if self.turns_taken < self.matches_found {
            return Err(SaveError::Corrupted(format!(
                "{} turns cannot produce {} matches",
                self.turns_taken, self.matches_found
            )));
        }

        Ok(())
    }

    /// Rebuild the board this save describes.
    ///
    /// Pending (face-up, unmatched) cards are transient and never persisted,
    /// so every unmatched card restores face-down.
    pub fn to_board(&self) -> Result<Board, SaveError> {
        self.validate()?;
        let size = self.board_size()?;

        let mut cards = vec![Card::new(TypeId::new(0)); size.cell_count()];
        for state in &self.cards {
            let card = &mut cards[state.board_index as usize];
            card.type_id = TypeId::new(state.type_id);
            if state.is_matched {
                card.mark_matched();
            }
        }

        Ok(Board::from_cards(size, cards))
    }
}

fn current_timestamp() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GameRng;

    fn valid_save() -> GameSave {
        let mut rng = GameRng::new(42);
        let board = Board::deal(BoardSize::new(4, 4), &mut rng);
        GameSave::new(0, 0, &board)
    }

    #[test]
    fn test_fresh_save_validates() {
        let save = valid_save();
        assert_eq!(save.version, SAVE_VERSION);
        assert_eq!(save.cards.len(), 16);
        save.validate().unwrap();
    }

    #[test]
    fn test_board_roundtrip() {
        let mut rng = GameRng::new(42);
        let mut board = Board::deal(BoardSize::new(4, 4), &mut rng);

        // Match one pair
        let first_type = board.card(0).unwrap().type_id;
        for i in 0..board.cell_count() {
            if board.card(i).unwrap().type_id == first_type {
                board.card_mut(i).unwrap().mark_matched();
            }
        }

        let save = GameSave::new(1, 3, &board);
        save.validate().unwrap();

        let restored = save.to_board().unwrap();
        assert_eq!(restored.size(), board.size());
        assert_eq!(restored.matched_pairs(), 1);
        for (orig, rest) in board.cards().zip(restored.cards()) {
            assert_eq!(orig.type_id, rest.type_id);
            assert_eq!(orig.is_matched, rest.is_matched);
            // Matched cards restore face-up, everything else face-down
            assert_eq!(rest.face_up, rest.is_matched);
        }
    }

    #[test]
    fn test_validate_rejects_wrong_card_count() {
        let mut save = valid_save();
        save.cards.pop();
        assert!(matches!(save.validate(), Err(SaveError::Corrupted(_))));
    }

    #[test]
    fn test_validate_rejects_duplicate_index() {
        let mut save = valid_save();
        save.cards[1].board_index = 0;
        assert!(matches!(save.validate(), Err(SaveError::Corrupted(_))));
    }

    #[test]
    fn test_validate_rejects_tripled_type() {
        let mut save = valid_save();
        // Overwrite one card's type with another existing type
        let donor_type = save.cards[0].type_id;
        let victim = save
            .cards
            .iter()
            .position(|c| c.type_id != donor_type)
            .unwrap();
        save.cards[victim].type_id = donor_type;
        assert!(matches!(save.validate(), Err(SaveError::Corrupted(_))));
    }

    #[test]
    fn test_validate_rejects_half_matched_pair() {
        let mut save = valid_save();
        save.cards[0].is_matched = true;
        assert!(matches!(save.validate(), Err(SaveError::Corrupted(_))));
    }

    #[test]
    fn test_validate_rejects_inconsistent_match_count() {
        let mut save = valid_save();
        save.matches_found = 2;
        save.turns_taken = 5;
        assert!(matches!(save.validate(), Err(SaveError::Corrupted(_))));
    }

    #[test]
    fn test_validate_rejects_fewer_turns_than_matches() {
        let mut rng = GameRng::new(42);
        let mut board = Board::deal(BoardSize::new(2, 2), &mut rng);
        let first_type = board.card(0).unwrap().type_id;
        for i in 0..board.cell_count() {
            if board.card(i).unwrap().type_id == first_type {
                board.card_mut(i).unwrap().mark_matched();
            }
        }

        let save = GameSave::new(1, 0, &board);
        assert!(matches!(save.validate(), Err(SaveError::Corrupted(_))));
    }

    #[test]
    fn test_validate_accepts_odd_board_singleton() {
        let mut rng = GameRng::new(42);
        let board = Board::deal(BoardSize::new(3, 3), &mut rng);
        let save = GameSave::new(0, 0, &board);
        save.validate().unwrap();
    }

    #[test]
    fn test_save_serde_roundtrip() {
        let save = valid_save();
        let json = serde_json::to_string_pretty(&save).unwrap();
        let restored: GameSave = serde_json::from_str(&json).unwrap();
        assert_eq!(save, restored);
    }
}
