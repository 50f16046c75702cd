//! Error types for SpecScout.
//!
//! This module defines the centralized error type [`SpecScoutError`] and a type alias
//! [`Result`] for convenient error handling throughout the crate. All errors are
//! implemented using the `thiserror` crate for automatic `Error` trait implementation.
//!
//! The taxonomy separates the conditions a user acts on differently: a throttled
//! external service ([`SpecScoutError::RateLimited`]) calls for waiting, a timeout
//! for retrying, a validation failure for fixing the query. Callers match on the
//! variant to pick the message; nothing here is fatal to the process.

use thiserror::Error;

/// The main error type for SpecScout operations.
///
/// This enum consolidates all error conditions that can occur during a search
/// pipeline run or a favorites mutation. Variants map one-to-one onto the
/// distinct user-visible outcomes the CLI reports.
#[derive(Debug, Error)]
pub enum SpecScoutError {
    /// The search term failed local validation.
    ///
    /// Raised before any network request is attempted, e.g. for queries
    /// shorter than the minimum length. Never produced by the network layer.
    #[error("Invalid query: {0}")]
    Validation(String),

    /// An external service signalled request throttling (HTTP 429).
    ///
    /// Kept distinct from [`SpecScoutError::Network`] so the caller can tell
    /// the user to wait rather than to check their connection.
    #[error("Rate limited by {service}")]
    RateLimited {
        /// Name of the throttling service, for the user-facing message.
        service: &'static str,
    },

    /// A request exceeded its configured time budget.
    #[error("Request to {service} timed out")]
    Timeout {
        /// Name of the service that failed to answer in time.
        service: &'static str,
    },

    /// Transport failure or malformed response from an external service.
    ///
    /// Covers connection errors, unexpected HTTP statuses other than 429,
    /// and undecodable response bodies.
    #[error("Network error: {0}")]
    Network(String),

    /// Reading or writing the persisted favorites list failed.
    ///
    /// Never aborts a user action: the in-memory favorites state is still
    /// updated, and the store retries persistence on the next mutation.
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// Filesystem or I/O operation failed.
    ///
    /// Wraps errors from standard library I/O operations. Automatically converts
    /// from `std::io::Error` using the `#[from]` attribute.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file could not be parsed.
    #[error("Config error: {0}")]
    Config(String),
}

impl SpecScoutError {
    /// Returns true for errors a retry of the same user action may resolve.
    ///
    /// Validation and config errors need user input to change first; everything
    /// else is transient.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        !matches!(self, Self::Validation(_) | Self::Config(_))
    }
}

/// A convenient type alias for `Result<T, SpecScoutError>`.
///
/// This alias simplifies function signatures throughout the codebase.
pub type Result<T> = std::result::Result<T, SpecScoutError>;
