//! Network clients for the two external catalog endpoints.
//!
//! This module defines the two awaitable ports the pipeline depends on,
//! [`EntitySearch`] for free-text entity lookup and [`EntityDetails`] for
//! batched attribute enrichment, together with their reqwest-backed
//! implementations against the Wikidata APIs.
//!
//! The ports exist so the orchestrator can be exercised against in-memory
//! fakes; the implementations own the wire formats, the timeout budgets, and
//! the mapping from transport failures onto the error taxonomy.
//!
//! # Modules
//!
//! - `search`: text-search endpoint client (`wbsearchentities`)
//! - `details`: structured-data endpoint client (SPARQL batch query)

pub mod details;
pub mod search;

pub use details::{EntityDetails, WikidataDetailsClient};
pub use search::{EntitySearch, WikidataSearchClient};

use crate::domain::error::{Result, SpecScoutError};
use reqwest::StatusCode;

/// Maps a reqwest transport failure onto the error taxonomy.
///
/// Timeouts get their own kind so the UI can suggest retrying; everything
/// else is a generic network failure.
pub(crate) fn transport_error(service: &'static str, err: &reqwest::Error) -> SpecScoutError {
    if err.is_timeout() {
        SpecScoutError::Timeout { service }
    } else {
        SpecScoutError::Network(format!("{service}: {err}"))
    }
}

/// Rejects non-success responses, distinguishing throttling from the rest.
///
/// HTTP 429 becomes [`SpecScoutError::RateLimited`]; any other non-2xx status
/// is a generic network failure.
pub(crate) fn check_status(
    service: &'static str,
    response: reqwest::Response,
) -> Result<reqwest::Response> {
    let status = response.status();
    if status == StatusCode::TOO_MANY_REQUESTS {
        tracing::warn!(service, "rate limited by external service");
        return Err(SpecScoutError::RateLimited { service });
    }
    if !status.is_success() {
        return Err(SpecScoutError::Network(format!(
            "{service} returned HTTP {status}"
        )));
    }
    Ok(response)
}
