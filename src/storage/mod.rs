//! Storage layer for the persisted favorites shortlist.
//!
//! This module provides the favorites store and its persistence abstraction.
//! The store owns favorites semantics (ordering, dedup, failure degradation);
//! backends only move the serialized list in and out of a slot.
//!
//! # Modules
//!
//! - `backend`: Persistence trait for backend implementations
//! - `json`: JSON file-based backend with atomic writes
//! - `favorites`: The favorites store itself

pub mod backend;
pub mod favorites;
pub mod json;

pub use backend::FavoritesBackend;
pub use favorites::FavoritesStore;
pub use json::JsonFavorites;
