//! Board geometry and dealing.
//!
//! ## Layout
//!
//! The board is a rectangular grid stored as a flat `Vec<Card>` in row-major
//! traversal order: index `row * columns + column`. The *board index* of a
//! card is its position in that order, and is the identity used by the
//! matcher and the save format.
//!
//! ## Dealing
//!
//! `Board::deal` builds one pair of cards per `pair_count` and shuffles them
//! across the grid with a seeded RNG. An odd cell count leaves exactly one
//! singleton card, which can be flipped but never matched.

use serde::{Deserialize, Serialize};

use super::card::{Card, TypeId};
use super::rng::GameRng;

/// Smallest supported board axis.
pub const MIN_AXIS: u8 = 2;
/// Largest supported board axis.
pub const MAX_AXIS: u8 = 16;

/// Rectangular board dimensions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoardSize {
    /// Grid width (cards per row).
    pub columns: u8,
    /// Grid height (rows of cards).
    pub rows: u8,
}

impl BoardSize {
    /// Create a board size.
    ///
    /// ## Panics
    ///
    /// Panics if either axis is outside `MIN_AXIS..=MAX_AXIS`.
    #[must_use]
    pub const fn new(columns: u8, rows: u8) -> Self {
        assert!(columns >= MIN_AXIS && columns <= MAX_AXIS, "columns out of range");
        assert!(rows >= MIN_AXIS && rows <= MAX_AXIS, "rows out of range");
        Self { columns, rows }
    }

    /// Create a board size, returning `None` if an axis is out of range.
    #[must_use]
    pub fn try_new(columns: u8, rows: u8) -> Option<Self> {
        if (MIN_AXIS..=MAX_AXIS).contains(&columns) && (MIN_AXIS..=MAX_AXIS).contains(&rows) {
            Some(Self { columns, rows })
        } else {
            None
        }
    }

    /// Total number of card slots.
    #[must_use]
    pub const fn cell_count(self) -> usize {
        self.columns as usize * self.rows as usize
    }

    /// Number of matchable pairs (floor of half the cells).
    #[must_use]
    pub const fn pair_count(self) -> usize {
        self.cell_count() / 2
    }

    /// Does this size leave one unpairable card?
    #[must_use]
    pub const fn has_singleton(self) -> bool {
        self.cell_count() % 2 == 1
    }
}

impl std::fmt::Display for BoardSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.columns, self.rows)
    }
}

/// The grid of cards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    size: BoardSize,
    cards: Vec<Card>,
}

impl Board {
    /// Deal a fresh board: one pair per `pair_count`, shuffled by `rng`.
    ///
    /// Type IDs are assigned `0..pair_count` (plus `pair_count` for the
    /// singleton on odd boards); the shuffle decides where each copy lands.
    #[must_use]
    pub fn deal(size: BoardSize, rng: &mut GameRng) -> Self {
        let mut cards = Vec::with_capacity(size.cell_count());

        for type_idx in 0..size.pair_count() {
            let type_id = TypeId::new(type_idx as u16);
            cards.push(Card::new(type_id));
            cards.push(Card::new(type_id));
        }
        if size.has_singleton() {
            cards.push(Card::new(TypeId::new(size.pair_count() as u16)));
        }

        rng.shuffle(&mut cards);

        Self { size, cards }
    }

    /// Rebuild a board from pre-built cards (save restore).
    ///
    /// ## Panics
    ///
    /// Panics if `cards.len()` doesn't match the size. Save data is
    /// validated before reaching this point.
    #[must_use]
    pub fn from_cards(size: BoardSize, cards: Vec<Card>) -> Self {
        assert_eq!(cards.len(), size.cell_count(), "card count must fill the grid");
        Self { size, cards }
    }

    /// Board dimensions.
    #[must_use]
    pub fn size(&self) -> BoardSize {
        self.size
    }

    /// Total number of cards.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.cards.len()
    }

    /// Get a card by board index.
    #[must_use]
    pub fn card(&self, index: usize) -> Option<&Card> {
        self.cards.get(index)
    }

    /// Get a mutable card by board index.
    pub fn card_mut(&mut self, index: usize) -> Option<&mut Card> {
        self.cards.get_mut(index)
    }

    /// Iterate over cards in board-index order.
    pub fn cards(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    /// Convert (column, row) coordinates to a board index.
    ///
    /// Returns `None` if either coordinate is off the grid.
    #[must_use]
    pub fn index_of(&self, column: u8, row: u8) -> Option<usize> {
        if column < self.size.columns && row < self.size.rows {
            Some(row as usize * self.size.columns as usize + column as usize)
        } else {
            None
        }
    }

    /// Convert a board index back to (column, row) coordinates.
    #[must_use]
    pub fn coords_of(&self, index: usize) -> Option<(u8, u8)> {
        if index < self.cell_count() {
            let columns = self.size.columns as usize;
            Some(((index % columns) as u8, (index / columns) as u8))
        } else {
            None
        }
    }

    /// Number of matched pairs currently on the board.
    #[must_use]
    pub fn matched_pairs(&self) -> usize {
        self.cards.iter().filter(|c| c.is_matched).count() / 2
    }

    /// Have all pairs been found?
    #[must_use]
    pub fn is_cleared(&self) -> bool {
        self.matched_pairs() == self.size.pair_count()
    }
}
