use thiserror::Error;

#[derive(Error, Debug)]
pub enum SaveError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("no save named '{name}'")]
    NotFound { name: String },

    #[error("save version mismatch: found {found}, expected {expected}")]
    VersionMismatch { found: u32, expected: u32 },

    #[error("corrupted save data: {0}")]
    Corrupted(String),

    #[error("invalid save name '{name}'")]
    InvalidName { name: String },
}

impl SaveError {
    /// Can the front end sensibly retry or fall back after this error?
    pub fn is_recoverable(&self) -> bool {
        match self {
            SaveError::Io(_) => true,
            SaveError::NotFound { .. } => true,
            SaveError::InvalidName { .. } => true,
            SaveError::VersionMismatch { .. } => false,
            SaveError::Corrupted(_) => false,
            SaveError::Json(_) => false,
        }
    }
}
