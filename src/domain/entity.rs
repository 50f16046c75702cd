//! Catalog entity models.
//!
//! This module defines the core value types flowing through the search pipeline:
//! the lightweight [`EntityCandidate`] produced by the text-search step, the
//! enriched [`DetailRow`] produced by the structured-data step, and the
//! [`Favorite`] entries kept by the favorites store.
//!
//! All three are plain data: no mutation after creation, no behavior beyond
//! small derivation helpers. The pipeline owns ordering and dedup concerns,
//! not the types themselves.

use serde::{Deserialize, Serialize};

/// A lightweight search hit before enrichment.
///
/// Produced by the entity-search client in relevance order. The `id` is a
/// catalog-wide unique, opaque identifier (e.g. `Q2044`); the `label` is
/// display text in the language the search ran in. Candidates are discarded
/// once details have been fetched; only their ids survive as the canonical
/// relevance order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityCandidate {
    pub id: String,
    pub label: String,
}

impl EntityCandidate {
    #[must_use]
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}

/// An entity enriched with optional structured attributes.
///
/// One row per merged entity, identified by the same `id` as its candidate.
/// Every attribute is optional: the external catalog guarantees nothing beyond
/// the id itself, and a missing attribute is ordinary data, never an error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetailRow {
    /// Catalog identifier, shared with the originating candidate.
    pub id: String,

    /// Display label in the preferred language, if the catalog has one.
    pub label: Option<String>,

    /// Short free-text description.
    pub description: Option<String>,

    /// URL of a representative image.
    pub image_url: Option<String>,

    /// Manufacturer display label.
    pub manufacturer: Option<String>,

    /// Processor display label.
    pub cpu: Option<String>,

    /// Physical core count.
    pub cores: Option<u32>,

    /// Hardware thread count.
    pub threads: Option<u32>,

    /// Installed memory size, as reported by the catalog.
    pub ram: Option<String>,

    /// Inception timestamp, RFC 3339 as delivered by the catalog.
    pub inception: Option<String>,

    /// Category identifier (e.g. the laptop category `Q3962`).
    pub category_id: Option<String>,

    /// Category display label.
    pub category_label: Option<String>,
}

impl DetailRow {
    /// Creates an empty row carrying only the entity id.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Extracts the inception year from the raw inception timestamp.
    ///
    /// Returns `None` when the row has no inception date or the value does not
    /// parse. Used by the year sort keys, where a missing year always sorts at
    /// the year-deficient end.
    #[must_use]
    pub fn inception_year(&self) -> Option<i32> {
        use chrono::Datelike;

        let raw = self.inception.as_deref()?;
        if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(raw) {
            return Some(dt.year());
        }

        // Some catalog values carry reduced precision ("1998-00-00T..."),
        // which RFC 3339 parsing rejects. The leading year digits are still
        // meaningful.
        let digits: String = raw.chars().take_while(char::is_ascii_digit).collect();
        if digits.len() == 4 {
            digits.parse().ok()
        } else {
            None
        }
    }

    /// Display label with the id as fallback for unlabeled entities.
    #[must_use]
    pub fn display_label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.id)
    }

    /// Fills attributes still absent on `self` from another binding row
    /// for the same entity.
    ///
    /// The structured-data service may emit several attribute-binding rows for
    /// one entity (one per multi-valued attribute combination). The first
    /// binding wins per field; later bindings only contribute fields the row
    /// does not have yet.
    pub fn fill_missing_from(&mut self, other: &DetailRow) {
        debug_assert_eq!(self.id, other.id);

        fn fill<T: Clone>(slot: &mut Option<T>, value: &Option<T>) {
            if slot.is_none() {
                slot.clone_from(value);
            }
        }

        fill(&mut self.label, &other.label);
        fill(&mut self.description, &other.description);
        fill(&mut self.image_url, &other.image_url);
        fill(&mut self.manufacturer, &other.manufacturer);
        fill(&mut self.cpu, &other.cpu);
        fill(&mut self.cores, &other.cores);
        fill(&mut self.threads, &other.threads);
        fill(&mut self.ram, &other.ram);
        fill(&mut self.inception, &other.inception);
        fill(&mut self.category_id, &other.category_id);
        fill(&mut self.category_label, &other.category_label);
    }
}

/// A favorites entry: the minimal handle needed to re-run a search later.
///
/// Unique by `id` within the favorites list; insertion order defines display
/// order. Serialized as-is into the persisted favorites file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Favorite {
    pub id: String,
    pub label: String,
}

impl Favorite {
    #[must_use]
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inception_year_parses_rfc3339() {
        let mut row = DetailRow::new("Q1");
        row.inception = Some("1998-06-15T00:00:00Z".to_string());
        assert_eq!(row.inception_year(), Some(1998));
    }

    #[test]
    fn inception_year_handles_missing_and_garbage() {
        let mut row = DetailRow::new("Q1");
        assert_eq!(row.inception_year(), None);

        row.inception = Some("not a date".to_string());
        assert_eq!(row.inception_year(), None);
    }

    #[test]
    fn inception_year_falls_back_to_leading_digits() {
        let mut row = DetailRow::new("Q1");
        row.inception = Some("2003-00-00T00:00:00Z".to_string());
        assert_eq!(row.inception_year(), Some(2003));
    }

    #[test]
    fn display_label_falls_back_to_id() {
        let mut row = DetailRow::new("Q77");
        assert_eq!(row.display_label(), "Q77");

        row.label = Some("ThinkPad X220".to_string());
        assert_eq!(row.display_label(), "ThinkPad X220");
    }

    #[test]
    fn fill_missing_keeps_existing_values() {
        let mut first = DetailRow::new("Q1");
        first.manufacturer = Some("Lenovo".to_string());

        let mut second = DetailRow::new("Q1");
        second.manufacturer = Some("IBM".to_string());
        second.cores = Some(4);

        first.fill_missing_from(&second);
        assert_eq!(first.manufacturer.as_deref(), Some("Lenovo"));
        assert_eq!(first.cores, Some(4));
    }
}
