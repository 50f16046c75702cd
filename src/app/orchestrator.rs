//! Search orchestration: validation, language fallback, enrichment.
//!
//! [`SearchOrchestrator`] composes the two network ports into one search
//! operation and owns the canonical relevance order. A search is
//! all-or-nothing: any failing step propagates its error unchanged and no
//! partial row set escapes.
//!
//! # Language Fallback
//!
//! The catalog's canonical labels are not always in the UI language, so an
//! empty primary-language search is retried once in a fallback language.
//! Only one call's results are ever used: first non-empty wins, the two are
//! never merged.

use crate::client::{EntityDetails, EntitySearch};
use crate::domain::error::{Result, SpecScoutError};
use crate::domain::DetailRow;

/// Minimum search term length, in characters, before any network call.
pub const MIN_QUERY_CHARS: usize = 3;

/// The outcome of one search: enriched rows plus the relevance ranking.
///
/// The two are carried separately because the details service gives no
/// ordering promise; `canonical_order` is the search step's ranking and stays
/// immutable for the lifetime of this outcome.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub rows: Vec<DetailRow>,
    pub canonical_order: Vec<String>,
}

/// Composes entity search (with language fallback) and detail enrichment.
///
/// Generic over the two ports so tests can drive it with in-memory fakes.
pub struct SearchOrchestrator<S: EntitySearch, D: EntityDetails> {
    search: S,
    details: D,
    primary_language: String,
    fallback_language: String,
}

impl<S: EntitySearch, D: EntityDetails> SearchOrchestrator<S, D> {
    #[must_use]
    pub fn new(
        search: S,
        details: D,
        primary_language: impl Into<String>,
        fallback_language: impl Into<String>,
    ) -> Self {
        Self {
            search,
            details,
            primary_language: primary_language.into(),
            fallback_language: fallback_language.into(),
        }
    }

    /// Runs one full search: validate, search with fallback, enrich.
    ///
    /// # Errors
    ///
    /// - [`SpecScoutError::Validation`] for terms under [`MIN_QUERY_CHARS`]
    ///   characters after trimming; no network call is attempted.
    /// - Any client error (rate limit, timeout, network) propagates unchanged.
    pub async fn run_search(&self, term: &str) -> Result<SearchOutcome> {
        let term = term.trim();
        if term.chars().count() < MIN_QUERY_CHARS {
            return Err(SpecScoutError::Validation(format!(
                "search term must be at least {MIN_QUERY_CHARS} characters"
            )));
        }

        tracing::info!(term, "running search");

        let mut candidates = self.search.search(term, &self.primary_language).await?;
        if candidates.is_empty() {
            tracing::debug!(
                fallback = %self.fallback_language,
                "primary language empty, retrying in fallback"
            );
            candidates = self.search.search(term, &self.fallback_language).await?;
        }

        let canonical_order: Vec<String> =
            candidates.into_iter().map(|c| c.id).collect();

        let rows = self.details.fetch_details(&canonical_order).await?;

        tracing::info!(
            candidates = canonical_order.len(),
            rows = rows.len(),
            "search complete"
        );

        Ok(SearchOutcome {
            rows,
            canonical_order,
        })
    }
}
