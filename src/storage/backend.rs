//! Favorites persistence abstraction.
//!
//! This module defines the [`FavoritesBackend`] trait that abstracts over the
//! persisted favorites slot. The favorites store owns all favorites semantics
//! (ordering, dedup, degradation on failure); a backend only moves the
//! serialized list in and out of its slot.
//!
//! # Design Philosophy
//!
//! The trait is deliberately whole-list: favorites are small (a shortlist, not
//! a dataset), so load-all/save-all keeps backends trivial and makes the
//! in-memory list the single source of truth between writes.

use crate::domain::error::Result;
use crate::domain::Favorite;

/// Abstraction over the persisted favorites slot.
///
/// # Implementations
///
/// - [`JsonFavorites`](crate::storage::JsonFavorites): single JSON file with
///   atomic writes (default)
/// - In-memory fakes in tests
pub trait FavoritesBackend: Send {
    /// Reads the full persisted favorites list.
    ///
    /// A missing slot is an empty list, not an error.
    ///
    /// # Errors
    ///
    /// Returns [`SpecScoutError::Persistence`](crate::domain::SpecScoutError::Persistence)
    /// when the slot exists but cannot be read or decoded. The store treats
    /// that as an empty list rather than failing startup.
    fn load(&self) -> Result<Vec<Favorite>>;

    /// Replaces the persisted favorites list.
    ///
    /// # Errors
    ///
    /// Returns [`SpecScoutError::Persistence`](crate::domain::SpecScoutError::Persistence)
    /// when the write fails. The caller keeps its in-memory state either way;
    /// persisted and in-memory state may diverge until the next successful write.
    fn save(&mut self, favorites: &[Favorite]) -> Result<()>;
}
