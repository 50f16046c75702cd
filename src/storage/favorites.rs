//! Favorites store: the durable shortlist of starred entities.
//!
//! [`FavoritesStore`] owns the in-memory favorites list and is the only
//! component that mutates the persisted slot. Every mutation is applied to
//! memory first and then persisted through the injected
//! [`FavoritesBackend`]; a failed write is reported to the caller but never
//! rolls back the in-memory change, so the UI stays consistent within the
//! session even when the disk is not cooperating.
//!
//! Invariant: the list never holds two entries with the same id. Insertion
//! order is display order.

use crate::domain::error::Result;
use crate::domain::Favorite;
use crate::storage::backend::FavoritesBackend;

/// Durable, insertion-ordered set of favorite entities.
///
/// Generic over the persistence backend so tests can run against an in-memory
/// fake. Reads at construction degrade to an empty list on any persistence
/// failure (a malformed or unreadable slot must not brick startup).
pub struct FavoritesStore<B: FavoritesBackend> {
    backend: B,
    favorites: Vec<Favorite>,
}

impl<B: FavoritesBackend> FavoritesStore<B> {
    /// Creates a store, loading the persisted list from the backend.
    ///
    /// A failed or malformed read logs a warning and starts empty; it is not
    /// an error for the caller.
    #[must_use]
    pub fn new(backend: B) -> Self {
        let favorites = match backend.load() {
            Ok(favorites) => favorites,
            Err(e) => {
                tracing::warn!(error = %e, "failed to load favorites, starting empty");
                Vec::new()
            }
        };

        tracing::debug!(count = favorites.len(), "favorites store initialized");
        Self { backend, favorites }
    }

    /// Current favorites in insertion order. No side effects.
    #[must_use]
    pub fn list(&self) -> &[Favorite] {
        &self.favorites
    }

    /// Whether the given entity id is favorited.
    #[must_use]
    pub fn is_favorite(&self, id: &str) -> bool {
        self.favorites.iter().any(|f| f.id == id)
    }

    /// Adds a favorite if absent and persists the list.
    ///
    /// Adding an id that is already present is a no-op, not an error, and
    /// triggers no write.
    ///
    /// # Errors
    ///
    /// Returns a persistence error when the write fails. The in-memory list
    /// still contains the new entry.
    pub fn add(&mut self, id: impl Into<String>, label: impl Into<String>) -> Result<()> {
        let id = id.into();
        if self.is_favorite(&id) {
            tracing::debug!(id = %id, "already a favorite, skipping");
            return Ok(());
        }

        self.favorites.push(Favorite::new(id, label));
        self.persist()
    }

    /// Removes a favorite if present and persists the list.
    ///
    /// Removing an absent id is a no-op, not an error, and triggers no write.
    ///
    /// # Errors
    ///
    /// Returns a persistence error when the write fails. The in-memory list
    /// no longer contains the entry.
    pub fn remove(&mut self, id: &str) -> Result<()> {
        let before = self.favorites.len();
        self.favorites.retain(|f| f.id != id);

        if self.favorites.len() == before {
            tracing::debug!(id = %id, "not a favorite, skipping");
            return Ok(());
        }

        self.persist()
    }

    /// Empties the favorites list and persists.
    ///
    /// # Errors
    ///
    /// Returns a persistence error when the write fails. The in-memory list
    /// is empty either way.
    pub fn clear(&mut self) -> Result<()> {
        self.favorites.clear();
        self.persist()
    }

    fn persist(&mut self) -> Result<()> {
        if let Err(e) = self.backend.save(&self.favorites) {
            tracing::warn!(error = %e, "favorites write failed, in-memory state kept");
            return Err(e);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::SpecScoutError;
    use crate::storage::JsonFavorites;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// In-memory backend with a switchable write-failure mode.
    struct MemoryBackend {
        stored: Vec<Favorite>,
        fail_writes: bool,
        writes: Arc<AtomicUsize>,
    }

    impl MemoryBackend {
        fn new() -> Self {
            Self {
                stored: Vec::new(),
                fail_writes: false,
                writes: Arc::new(AtomicUsize::new(0)),
            }
        }
    }

    impl FavoritesBackend for MemoryBackend {
        fn load(&self) -> crate::domain::Result<Vec<Favorite>> {
            Ok(self.stored.clone())
        }

        fn save(&mut self, favorites: &[Favorite]) -> crate::domain::Result<()> {
            self.writes.fetch_add(1, Ordering::SeqCst);
            if self.fail_writes {
                return Err(SpecScoutError::Persistence("disk full".to_string()));
            }
            self.stored = favorites.to_vec();
            Ok(())
        }
    }

    #[test]
    fn add_then_is_favorite() {
        let mut store = FavoritesStore::new(MemoryBackend::new());
        store.add("Q1", "Foo").unwrap();
        assert!(store.is_favorite("Q1"));
        assert!(!store.is_favorite("Q2"));
    }

    #[test]
    fn duplicate_add_keeps_single_entry() {
        let mut store = FavoritesStore::new(MemoryBackend::new());
        store.add("Q1", "Foo").unwrap();
        store.add("Q1", "Foo").unwrap();
        assert_eq!(store.list().len(), 1);
    }

    #[test]
    fn remove_then_not_favorite() {
        let mut store = FavoritesStore::new(MemoryBackend::new());
        store.add("Q1", "Foo").unwrap();
        store.remove("Q1").unwrap();
        assert!(!store.is_favorite("Q1"));
    }

    #[test]
    fn remove_absent_is_noop_without_write() {
        let backend = MemoryBackend::new();
        let writes = backend.writes.clone();
        let mut store = FavoritesStore::new(backend);

        store.remove("Q404").unwrap();
        assert_eq!(writes.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn clear_empties_nonempty_list() {
        let mut store = FavoritesStore::new(MemoryBackend::new());
        store.add("Q1", "Foo").unwrap();
        store.add("Q2", "Bar").unwrap();
        store.clear().unwrap();
        assert!(store.list().is_empty());
    }

    #[test]
    fn list_preserves_insertion_order() {
        let mut store = FavoritesStore::new(MemoryBackend::new());
        store.add("Q9", "z").unwrap();
        store.add("Q1", "a").unwrap();
        store.add("Q5", "m").unwrap();

        let ids: Vec<&str> = store.list().iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, vec!["Q9", "Q1", "Q5"]);
    }

    #[test]
    fn failed_write_keeps_in_memory_change() {
        let mut backend = MemoryBackend::new();
        backend.fail_writes = true;
        let mut store = FavoritesStore::new(backend);

        let result = store.add("Q1", "Foo");
        assert!(matches!(result, Err(SpecScoutError::Persistence(_))));
        assert!(store.is_favorite("Q1"));
    }

    #[test]
    fn survives_store_recreation_over_same_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("favs.json");

        let mut store = FavoritesStore::new(JsonFavorites::new(path.clone()));
        store.add("Q1", "Foo").unwrap();
        drop(store);

        let reloaded = FavoritesStore::new(JsonFavorites::new(path));
        assert!(reloaded.is_favorite("Q1"));
        assert_eq!(reloaded.list()[0].label, "Foo");
    }

    #[test]
    fn malformed_persisted_value_loads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("favs.json");
        std::fs::write(&path, "not json at all").unwrap();

        let store = FavoritesStore::new(JsonFavorites::new(path));
        assert!(store.list().is_empty());
    }
}
