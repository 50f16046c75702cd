//! Application layer: the search pipeline and the result view.
//!
//! This module sits between the CLI shell and the client/storage layers. It
//! implements the search-merge-filter-sort flow:
//!
//! ```text
//! term → SearchOrchestrator → EntitySearch (language fallback)
//!                           → EntityDetails (batch)
//!      → ResultView::set_data → ResultView::derive (filter + sort) → renderer
//! ```
//!
//! # Modules
//!
//! - [`orchestrator`]: validation, language fallback, and enrichment flow
//! - [`view`]: result state, filter/sort criteria, derivation, facets

pub mod orchestrator;
pub mod view;

pub use orchestrator::{SearchOrchestrator, SearchOutcome, MIN_QUERY_CHARS};
pub use view::{Criteria, ResultView, SortKey, LAPTOP_CATEGORY_ID};
