//! Directory-backed JSON save store.
//!
//! One JSON document per save name, under a dedicated directory. Names are
//! sanitized against filesystem-invalid characters; the `.json` extension is
//! implicit. Writes are atomic: serialize to a temp file, fsync, rename.
//!
//! `list` follows log-and-continue: unreadable entries are logged and
//! skipped rather than failing the whole listing.

use std::fs::{remove_file, rename, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use super::error::SaveError;
use super::format::GameSave;
use super::SAVE_VERSION;

/// Characters replaced with `_` in save names.
///
/// Covers the reserved set on Windows; `/` also handles Unix.
const INVALID_CHARS: &[char] = &['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

const EXTENSION: &str = "json";

/// Replace filesystem-invalid characters in a user-chosen save name.
///
/// Errors if nothing usable remains (empty, whitespace, or dot-only names).
pub fn sanitize_name(name: &str) -> Result<String, SaveError> {
    let sanitized: String = name
        .trim()
        .chars()
        .map(|c| {
            if INVALID_CHARS.contains(&c) || c.is_control() {
                '_'
            } else {
                c
            }
        })
        .collect();

    if sanitized.is_empty() || sanitized.chars().all(|c| c == '.') {
        return Err(SaveError::InvalidName {
            name: name.to_string(),
        });
    }

    Ok(sanitized)
}

/// Key-value store of saved games on disk.
#[derive(Clone, Debug)]
pub struct SaveStore {
    dir: PathBuf,
}

impl SaveStore {
    /// Create a store rooted at `dir`. The directory is created lazily on
    /// the first save.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The directory this store writes into.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write a save under `name`, replacing any existing save of that name.
    pub fn save(&self, name: &str, save: &GameSave) -> Result<(), SaveError> {
        let path = self.path_for(name)?;
        std::fs::create_dir_all(&self.dir)?;

        let data = serde_json::to_vec_pretty(save)?;

        // Atomic save: write to temp file, then rename
        let temp_path = path.with_extension("json.tmp");
        {
            let mut file = File::create(&temp_path)?;
            file.write_all(&data)?;
            file.flush()?;
            file.sync_all()?;
        }
        rename(&temp_path, &path)?;

        log::info!("saved game '{}' ({} bytes)", name, data.len());
        Ok(())
    }

    /// Load the save stored under `name`.
    ///
    /// Fails with `NotFound` if no such save exists, `VersionMismatch` for
    /// saves written by a different format version, and `Corrupted` when the
    /// data violates the save invariants.
    pub fn load(&self, name: &str) -> Result<GameSave, SaveError> {
        let path = self.path_for(name)?;
        if !path.exists() {
            return Err(SaveError::NotFound {
                name: name.to_string(),
            });
        }

        let data = std::fs::read(&path)?;
        let save: GameSave = serde_json::from_slice(&data)?;

        if save.version != SAVE_VERSION {
            return Err(SaveError::VersionMismatch {
                found: save.version,
                expected: SAVE_VERSION,
            });
        }
        save.validate()?;

        log::info!("loaded game '{}' ({} bytes)", name, data.len());
        Ok(save)
    }

    /// Does a save exist under `name`?
    #[must_use]
    pub fn exists(&self, name: &str) -> bool {
        self.path_for(name).map(|p| p.exists()).unwrap_or(false)
    }

    /// Delete the save under `name`. Deleting a missing save is a no-op.
    pub fn delete(&self, name: &str) -> Result<(), SaveError> {
        let path = self.path_for(name)?;
        if path.exists() {
            remove_file(&path)?;
            log::info!("deleted save '{name}'");
        }
        Ok(())
    }

    /// List all save names, sorted.
    ///
    /// I/O failures are logged and skipped; a missing or unreadable
    /// directory yields an empty list.
    #[must_use]
    pub fn list(&self) -> Vec<String> {
        let entries = match std::fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(err) => {
                if err.kind() != std::io::ErrorKind::NotFound {
                    log::warn!("could not read save directory {:?}: {err}", self.dir);
                }
                return Vec::new();
            }
        };

        let mut names = Vec::new();
        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    log::warn!("skipping unreadable save entry: {err}");
                    continue;
                }
            };
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some(EXTENSION) {
                continue;
            }
            match path.file_stem().and_then(|s| s.to_str()) {
                Some(stem) => names.push(stem.to_string()),
                None => log::warn!("skipping save with non-UTF-8 name: {path:?}"),
            }
        }

        names.sort();
        names
    }

    fn path_for(&self, name: &str) -> Result<PathBuf, SaveError> {
        let sanitized = sanitize_name(name)?;
        Ok(self.dir.join(format!("{sanitized}.{EXTENSION}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_passthrough() {
        assert_eq!(sanitize_name("my save").unwrap(), "my save");
        assert_eq!(sanitize_name("  padded  ").unwrap(), "padded");
    }

    #[test]
    fn test_sanitize_replaces_invalid_chars() {
        assert_eq!(sanitize_name("a/b\\c:d").unwrap(), "a_b_c_d");
        assert_eq!(sanitize_name("quick?<save>").unwrap(), "quick__save_");
        assert_eq!(sanitize_name("tab\there").unwrap(), "tab_here");
    }

    #[test]
    fn test_sanitize_rejects_unusable_names() {
        assert!(matches!(sanitize_name(""), Err(SaveError::InvalidName { .. })));
        assert!(matches!(sanitize_name("   "), Err(SaveError::InvalidName { .. })));
        assert!(matches!(sanitize_name("."), Err(SaveError::InvalidName { .. })));
        assert!(matches!(sanitize_name(".."), Err(SaveError::InvalidName { .. })));
    }

    #[test]
    fn test_sanitized_name_has_no_separators() {
        let out = sanitize_name("../../etc/passwd").unwrap();
        assert!(!out.contains('/'));
        assert!(!out.contains('\\'));
    }
}
