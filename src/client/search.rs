//! Entity text-search client.
//!
//! Queries the catalog's text-search endpoint (`wbsearchentities`) for
//! candidate entities matching a free-text term in one language, returning
//! ranked id + label pairs. The response order is the relevance ranking the
//! rest of the pipeline preserves as canonical order.

use crate::client::{check_status, transport_error};
use crate::domain::error::Result;
use crate::domain::EntityCandidate;
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

/// Service name used in error values and log fields.
const SERVICE: &str = "entity search";

/// Awaitable port for free-text entity search.
///
/// Implemented by [`WikidataSearchClient`] for production and by in-memory
/// fakes in orchestrator tests.
#[async_trait]
pub trait EntitySearch: Send + Sync {
    /// Searches for entities matching `term` in the given language.
    ///
    /// Returns candidates in relevance order. Zero matches is an empty
    /// vector, not an error.
    ///
    /// # Errors
    ///
    /// Rate limiting, timeout, and transport failures map onto the
    /// corresponding [`SpecScoutError`](crate::domain::SpecScoutError) kinds.
    async fn search(&self, term: &str, language: &str) -> Result<Vec<EntityCandidate>>;
}

/// Query parameters for one `wbsearchentities` request.
///
/// `language` picks the index searched, `uselang` the label language of the
/// hits. Both are the same language here.
fn search_params(term: &str, language: &str, limit: u32) -> [(&'static str, String); 6] {
    [
        ("action", "wbsearchentities".to_string()),
        ("format", "json".to_string()),
        ("language", language.to_string()),
        ("uselang", language.to_string()),
        ("search", term.to_string()),
        ("limit", limit.to_string()),
    ]
}

/// Wire shape of a `wbsearchentities` response; fields beyond these ignored.
#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    search: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    id: String,
    #[serde(default)]
    label: Option<String>,
}

/// Client for the Wikidata `wbsearchentities` action API.
///
/// Carries the shorter of the two pipeline timeout budgets: the text search
/// is a light query and a slow answer is better surfaced early.
pub struct WikidataSearchClient {
    http: reqwest::Client,
    endpoint: String,
    limit: u32,
}

impl WikidataSearchClient {
    /// Creates a client for the given endpoint.
    ///
    /// `limit` caps the number of candidates per search; `timeout` is the
    /// whole-request budget.
    ///
    /// # Errors
    ///
    /// Returns a network error if the underlying HTTP client cannot be built.
    pub fn new(endpoint: impl Into<String>, limit: u32, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| crate::domain::SpecScoutError::Network(format!("http client: {e}")))?;

        Ok(Self {
            http,
            endpoint: endpoint.into(),
            limit,
        })
    }
}

#[async_trait]
impl EntitySearch for WikidataSearchClient {
    async fn search(&self, term: &str, language: &str) -> Result<Vec<EntityCandidate>> {
        tracing::debug!(term, language, limit = self.limit, "searching entities");

        let response = self
            .http
            .get(&self.endpoint)
            .query(&search_params(term, language, self.limit))
            .send()
            .await
            .map_err(|e| transport_error(SERVICE, &e))?;

        let response = check_status(SERVICE, response)?;

        let body: SearchResponse = response
            .json()
            .await
            .map_err(|e| transport_error(SERVICE, &e))?;

        let candidates: Vec<EntityCandidate> = body
            .search
            .into_iter()
            .map(|hit| {
                // Unlabeled entities exist; the id is the only handle we have.
                let label = hit.label.unwrap_or_else(|| hit.id.clone());
                EntityCandidate::new(hit.id, label)
            })
            .collect();

        tracing::debug!(count = candidates.len(), "search complete");
        Ok(candidates)
    }
}
