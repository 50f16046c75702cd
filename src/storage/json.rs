//! JSON file-based favorites backend.
//!
//! Persists the favorites list as a single human-readable JSON file, using
//! atomic writes (write-to-temp + rename) so a crash mid-write never leaves a
//! corrupt slot behind. Reads load the entire file; writes serialize the
//! entire list. The favorites shortlist is small enough that neither matters.

use crate::domain::error::{Result, SpecScoutError};
use crate::domain::Favorite;
use crate::storage::backend::FavoritesBackend;
use std::path::PathBuf;

/// JSON file favorites backend.
///
/// The file holds a plain JSON array of `{ "id": ..., "label": ... }` entries
/// in insertion order. A missing file reads as an empty list; parent
/// directories are created on first write.
pub struct JsonFavorites {
    /// Path to the JSON file on disk.
    file_path: PathBuf,
}

impl JsonFavorites {
    /// Creates a backend bound to the given file path.
    ///
    /// The file is not touched until the first [`load`](FavoritesBackend::load)
    /// or [`save`](FavoritesBackend::save).
    #[must_use]
    pub fn new(file_path: PathBuf) -> Self {
        tracing::debug!(path = ?file_path, "initializing JSON favorites backend");
        Self { file_path }
    }
}

impl FavoritesBackend for JsonFavorites {
    fn load(&self) -> Result<Vec<Favorite>> {
        if !self.file_path.exists() {
            tracing::debug!(path = ?self.file_path, "no favorites file, starting empty");
            return Ok(Vec::new());
        }

        let contents = std::fs::read_to_string(&self.file_path)
            .map_err(|e| SpecScoutError::Persistence(format!("failed to read favorites: {e}")))?;

        let favorites: Vec<Favorite> = serde_json::from_str(&contents).map_err(|e| {
            SpecScoutError::Persistence(format!("failed to parse favorites JSON: {e}"))
        })?;

        tracing::debug!(count = favorites.len(), "loaded favorites");
        Ok(favorites)
    }

    fn save(&mut self, favorites: &[Favorite]) -> Result<()> {
        tracing::debug!(path = ?self.file_path, count = favorites.len(), "saving favorites");

        if let Some(parent) = self.file_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                SpecScoutError::Persistence(format!("failed to create favorites dir: {e}"))
            })?;
        }

        let json = serde_json::to_string_pretty(favorites)
            .map_err(|e| SpecScoutError::Persistence(format!("failed to serialize: {e}")))?;

        let tmp_path = self.file_path.with_extension("tmp");
        std::fs::write(&tmp_path, json)
            .map_err(|e| SpecScoutError::Persistence(format!("failed to write: {e}")))?;
        std::fs::rename(&tmp_path, &self.file_path)
            .map_err(|e| SpecScoutError::Persistence(format!("failed to rename: {e}")))?;

        tracing::debug!("favorites saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let backend = JsonFavorites::new(dir.path().join("favs.json"));
        assert!(backend.load().unwrap().is_empty());
    }

    #[test]
    fn save_then_load_round_trips_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let mut backend = JsonFavorites::new(dir.path().join("favs.json"));

        let favs = vec![
            Favorite::new("Q2", "second added first"),
            Favorite::new("Q1", "first added second"),
        ];
        backend.save(&favs).unwrap();

        let loaded = backend.load().unwrap();
        assert_eq!(loaded, favs);
    }

    #[test]
    fn malformed_file_is_a_persistence_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("favs.json");
        std::fs::write(&path, "{ not json").unwrap();

        let backend = JsonFavorites::new(path);
        let err = backend.load().unwrap_err();
        assert!(matches!(err, SpecScoutError::Persistence(_)));
    }

    #[test]
    fn save_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let mut backend = JsonFavorites::new(dir.path().join("nested/deeper/favs.json"));
        backend.save(&[Favorite::new("Q1", "x")]).unwrap();
        assert_eq!(backend.load().unwrap().len(), 1);
    }
}
