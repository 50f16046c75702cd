//! Domain layer for SpecScout.
//!
//! This module contains the core domain types and error taxonomy for the
//! search pipeline, independent of HTTP, persistence, or terminal concerns.
//! Everything downstream (clients, orchestrator, view, storage) speaks in
//! these types.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`entity`]: Entity candidate, detail row, and favorite models

pub mod entity;
pub mod error;

pub use entity::{DetailRow, EntityCandidate, Favorite};
pub use error::{Result, SpecScoutError};
