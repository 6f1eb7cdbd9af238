//! Saved-game persistence: JSON format, validation, and the on-disk store.

pub mod error;
pub mod format;
pub mod store;

pub use error::SaveError;
pub use format::{CardState, GameSave};
pub use store::{sanitize_name, SaveStore};

/// Current save format version.
pub const SAVE_VERSION: u32 = 1;
