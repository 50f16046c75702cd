//! SpecScout: search a public structured-data catalog for device models and
//! browse the enriched results.
//!
//! SpecScout queries a catalog's text-search endpoint for candidate entities,
//! enriches the hits with hardware attributes (manufacturer, cpu, cores,
//! memory, inception year, ...) through the catalog's SPARQL query service,
//! and lets the user browse the merged set with client-side filtering,
//! sorting, and a persisted favorites shortlist.
//!
//! # Architecture
//!
//! The crate follows a layered architecture pattern:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  CLI Shell (main.rs)                                │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │
//! │  - SearchOrchestrator: validation, language         │
//! │    fallback, batch enrichment                       │
//! │  - ResultView: filter/sort derivation, facets       │
//! └─────────────────────────────────────────────────────┘
//!         │                              │
//! ┌───────────────────┐        ┌───────────────────┐
//! │ Client Layer      │        │ Storage Layer     │
//! │ (client/)         │        │ (storage/)        │
//! │ - EntitySearch    │        │ - FavoritesStore  │
//! │ - EntityDetails   │        │ - JSON backend    │
//! └───────────────────┘        └───────────────────┘
//!         │                              │
//! ┌─────────────────────────────────────────────────────┐
//! │  Infrastructure & Domain Layers                     │
//! │  - Platform paths (infrastructure/)                 │
//! │  - Error taxonomy (domain/error)                    │
//! │  - Entity models (domain/entity)                    │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! The two network clients and the favorites backend are trait ports, so the
//! orchestration and storage layers are testable against in-memory fakes.
//!
//! # Search Flow
//!
//! 1. Validate the term locally (≥ 3 characters, no network below that)
//! 2. Text-search in the primary language; if empty, retry once in the
//!    fallback language (first non-empty wins, never merged)
//! 3. Keep the hit ids as the canonical relevance order
//! 4. Fetch attribute details for the whole id batch
//! 5. Hand rows + canonical order to the result view for derivation
//!
//! # Configuration
//!
//! An optional TOML file at `~/.config/specscout/config.toml`:
//!
//! ```toml
//! primary_language = "en"
//! fallback_language = "he"
//! search_limit = 12
//! search_timeout_secs = 15
//! details_timeout_secs = 20
//! trace_level = "info"
//! ```

pub mod app;
pub mod client;
pub mod domain;
pub mod infrastructure;
pub mod observability;
pub mod storage;

pub use app::{Criteria, ResultView, SearchOrchestrator, SearchOutcome, SortKey};
pub use domain::{DetailRow, EntityCandidate, Favorite, Result, SpecScoutError};
pub use storage::{FavoritesStore, JsonFavorites};

use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Application configuration, loaded from an optional TOML file.
///
/// Every field has a shipped default; an absent config file means defaults
/// across the board, while a present-but-malformed file is an error (silent
/// misconfiguration is worse than a startup failure).
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Text-search endpoint (MediaWiki action API).
    pub search_endpoint: String,

    /// Structured-data query endpoint (SPARQL).
    pub sparql_endpoint: String,

    /// Language of the first search attempt and preferred label language.
    pub primary_language: String,

    /// Language retried once when the primary search returns nothing, and
    /// secondary label language.
    pub fallback_language: String,

    /// Maximum candidates per search.
    pub search_limit: u32,

    /// Whole-request budget for the text search, in seconds.
    pub search_timeout_secs: u64,

    /// Whole-request budget for the details query, in seconds. Longer than
    /// the search budget: the details query is heavier.
    pub details_timeout_secs: u64,

    /// Maximum entity ids per details request; larger batches are split.
    pub details_chunk_size: usize,

    /// Tracing level when `RUST_LOG` is unset (`trace` .. `error`).
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            search_endpoint: "https://www.wikidata.org/w/api.php".to_string(),
            sparql_endpoint: "https://query.wikidata.org/sparql".to_string(),
            primary_language: "en".to_string(),
            fallback_language: "he".to_string(),
            search_limit: 12,
            search_timeout_secs: 15,
            details_timeout_secs: 20,
            details_chunk_size: 50,
            trace_level: None,
        }
    }
}

impl Config {
    /// Loads configuration from a TOML file, falling back to defaults when
    /// the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`SpecScoutError::Config`] when the file exists but cannot be
    /// read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = ?path, "no config file, using defaults");
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)
            .map_err(|e| SpecScoutError::Config(format!("failed to read config: {e}")))?;
        let config = toml::from_str(&contents)
            .map_err(|e| SpecScoutError::Config(format!("failed to parse config: {e}")))?;

        tracing::debug!(path = ?path, "config loaded");
        Ok(config)
    }

    /// Label-service language preference list, primary first.
    #[must_use]
    pub fn label_languages(&self) -> String {
        format!("{},{}", self.primary_language, self.fallback_language)
    }

    /// Text-search request budget.
    #[must_use]
    pub fn search_timeout(&self) -> Duration {
        Duration::from_secs(self.search_timeout_secs)
    }

    /// Details-query request budget.
    #[must_use]
    pub fn details_timeout(&self) -> Duration {
        Duration::from_secs(self.details_timeout_secs)
    }
}
