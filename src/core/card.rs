//! Card identity and per-card state.
//!
//! Every card on the board carries a `TypeId` shared with exactly one other
//! card (its pair), plus two mutable flags:
//! - `face_up`: the card is currently revealed
//! - `is_matched`: the card's pair has been found
//!
//! ## Locking
//!
//! A card is *locked* (non-selectable) while it is face-up. That covers both
//! a card pending evaluation and a card already matched, since matched cards
//! stay face-up for the rest of the game.

use serde::{Deserialize, Serialize};

/// Card face identifier. Two cards on a board share each type.
///
/// The game core doesn't interpret type IDs - they're opaque identifiers.
/// Front ends map them to artwork.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TypeId(pub u16);

impl TypeId {
    /// Create a new type ID.
    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }
}

impl std::fmt::Display for TypeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Type({})", self.0)
    }
}

/// A single card on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    /// Which face this card shows when revealed.
    pub type_id: TypeId,

    /// Has this card's pair been found?
    pub is_matched: bool,

    /// Is this card currently revealed?
    pub face_up: bool,
}

impl Card {
    /// Create a face-down, unmatched card.
    #[must_use]
    pub fn new(type_id: TypeId) -> Self {
        Self {
            type_id,
            is_matched: false,
            face_up: false,
        }
    }

    /// Check whether this card can be selected.
    ///
    /// Face-up cards are locked: either pending evaluation or matched.
    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.face_up
    }

    /// Reveal the card.
    pub fn flip_up(&mut self) {
        self.face_up = true;
    }

    /// Hide the card again (mismatch resolution).
    ///
    /// Matched cards never flip back down.
    pub fn flip_down(&mut self) {
        if !self.is_matched {
            self.face_up = false;
        }
    }

    /// Mark the card as matched. Matched cards stay face-up.
    pub fn mark_matched(&mut self) {
        self.is_matched = true;
        self.face_up = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_card_is_selectable() {
        let card = Card::new(TypeId::new(3));

        assert_eq!(card.type_id, TypeId::new(3));
        assert!(!card.face_up);
        assert!(!card.is_matched);
        assert!(!card.is_locked());
    }

    #[test]
    fn test_face_up_card_is_locked() {
        let mut card = Card::new(TypeId::new(0));
        card.flip_up();

        assert!(card.is_locked());
        assert!(!card.is_matched);
    }

    #[test]
    fn test_flip_down_unlocks() {
        let mut card = Card::new(TypeId::new(0));
        card.flip_up();
        card.flip_down();

        assert!(!card.is_locked());
    }

    #[test]
    fn test_matched_card_stays_face_up() {
        let mut card = Card::new(TypeId::new(0));
        card.flip_up();
        card.mark_matched();

        card.flip_down();

        assert!(card.face_up);
        assert!(card.is_matched);
        assert!(card.is_locked());
    }

    #[test]
    fn test_card_serialization() {
        let mut card = Card::new(TypeId::new(7));
        card.mark_matched();

        let json = serde_json::to_string(&card).unwrap();
        let deserialized: Card = serde_json::from_str(&json).unwrap();

        assert_eq!(card, deserialized);
    }
}
