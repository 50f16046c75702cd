//! Result view state and filter/sort derivation.
//!
//! [`ResultView`] holds the last fetched row set, the canonical relevance
//! order from the search step, and the current filter/sort criteria. The
//! displayed sequence is derived on demand by [`ResultView::derive`], a pure
//! function of that state: criteria changes never refetch, and derivation
//! never mutates the stored rows or the canonical order.
//!
//! # Ordering Contract
//!
//! Every sort is stable, and every key has an explicit missing-value policy:
//! rows absent from the canonical order sort after all present ones, rows
//! without an inception year sort at the year-deficient end in both year
//! directions, and missing labels sort as the empty string. This keeps the
//! derived sequence deterministic for equal keys.

use crate::domain::DetailRow;
use std::collections::{BTreeSet, HashMap};

/// Category identifier the laptops-only filter matches against.
pub const LAPTOP_CATEGORY_ID: &str = "Q3962";

/// Sort key for the derived result sequence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
    /// Position in the canonical relevance order from the search step.
    #[default]
    Relevance,
    /// Inception year, newest first; dateless rows last.
    YearDesc,
    /// Inception year, oldest first; dateless rows first.
    YearAsc,
    /// Entity label ascending, case-insensitive; unlabeled rows first.
    NameAsc,
    /// Manufacturer label ascending, case-insensitive; unattributed rows first.
    ManufacturerAsc,
}

impl SortKey {
    /// Parses the user-facing key names used by the CLI.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "relevance" => Some(Self::Relevance),
            "year-desc" => Some(Self::YearDesc),
            "year-asc" => Some(Self::YearAsc),
            "name-asc" => Some(Self::NameAsc),
            "manufacturer-asc" => Some(Self::ManufacturerAsc),
            _ => None,
        }
    }
}

/// Current filter and sort configuration.
///
/// Pure configuration: changing it has no side effects, and re-deriving with
/// unchanged criteria is idempotent. Filters compose by logical AND.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Criteria {
    /// Keep only rows whose manufacturer label matches exactly.
    pub manufacturer: Option<String>,

    /// Keep only rows in the laptop category.
    pub laptops_only: bool,

    /// Ordering of the derived sequence.
    pub sort_key: SortKey,
}

/// Holds the last search result set and derives the displayed sequence.
///
/// `set_data` replaces rows and canonical order; criteria deliberately
/// persist across searches so an applied filter stays applied, matching the
/// original UI behavior.
#[derive(Debug, Default)]
pub struct ResultView {
    rows: Vec<DetailRow>,
    canonical_order: Vec<String>,
    pub criteria: Criteria,
}

impl ResultView {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the row set and its canonical relevance order.
    ///
    /// Criteria are untouched. The canonical order is immutable for the
    /// lifetime of this data set.
    pub fn set_data(&mut self, rows: Vec<DetailRow>, canonical_order: Vec<String>) {
        tracing::debug!(
            rows = rows.len(),
            canonical = canonical_order.len(),
            "result view updated"
        );
        self.rows = rows;
        self.canonical_order = canonical_order;
    }

    /// The raw row set from the last search, unfiltered and unsorted.
    #[must_use]
    pub fn rows(&self) -> &[DetailRow] {
        &self.rows
    }

    /// Derives the displayed sequence: filter, then stable sort.
    ///
    /// Always a subset/permutation of the last `set_data` rows; derivation
    /// fabricates nothing and drops nothing the filters did not exclude.
    #[must_use]
    pub fn derive(&self) -> Vec<DetailRow> {
        let mut rows: Vec<DetailRow> = self
            .rows
            .iter()
            .filter(|r| self.matches_filters(r))
            .cloned()
            .collect();

        match self.criteria.sort_key {
            SortKey::Relevance => {
                let position: HashMap<&str, usize> = self
                    .canonical_order
                    .iter()
                    .enumerate()
                    .map(|(i, id)| (id.as_str(), i))
                    .collect();
                // Ids the search step never ranked go after all ranked ones.
                rows.sort_by_key(|r| {
                    position.get(r.id.as_str()).copied().unwrap_or(usize::MAX)
                });
            }
            SortKey::YearDesc => {
                rows.sort_by_key(|r| {
                    std::cmp::Reverse(r.inception_year().unwrap_or(i32::MIN))
                });
            }
            SortKey::YearAsc => {
                rows.sort_by_key(|r| r.inception_year().unwrap_or(i32::MIN));
            }
            SortKey::NameAsc => {
                rows.sort_by_key(|r| {
                    r.label.as_deref().unwrap_or_default().to_lowercase()
                });
            }
            SortKey::ManufacturerAsc => {
                rows.sort_by_key(|r| {
                    r.manufacturer.as_deref().unwrap_or_default().to_lowercase()
                });
            }
        }

        rows
    }

    fn matches_filters(&self, row: &DetailRow) -> bool {
        if let Some(maker) = &self.criteria.manufacturer {
            if row.manufacturer.as_deref() != Some(maker.as_str()) {
                return false;
            }
        }
        if self.criteria.laptops_only
            && row.category_id.as_deref() != Some(LAPTOP_CATEGORY_ID)
        {
            return false;
        }
        true
    }

    /// Distinct manufacturer labels across a row set, sorted ascending.
    ///
    /// Feeds the manufacturer filter choices; pure, no view state involved.
    /// Ordered with the same case-insensitive key as the manufacturer sort,
    /// so the filter list and the sorted column agree.
    #[must_use]
    pub fn populate_facets(rows: &[DetailRow]) -> Vec<String> {
        let mut facets: Vec<String> = rows
            .iter()
            .filter_map(|r| r.manufacturer.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        facets.sort_by_key(|f| f.to_lowercase());
        facets
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: &str, label: &str, manufacturer: Option<&str>, year: Option<i32>) -> DetailRow {
        let mut r = DetailRow::new(id);
        r.label = Some(label.to_string());
        r.manufacturer = manufacturer.map(String::from);
        r.inception = year.map(|y| format!("{y}-01-01T00:00:00Z"));
        r
    }

    fn ids(rows: &[DetailRow]) -> Vec<&str> {
        rows.iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn relevance_sort_follows_canonical_order() {
        let mut view = ResultView::new();
        view.set_data(
            vec![
                row("Q3", "c", None, None),
                row("Q1", "a", None, None),
                row("Q2", "b", None, None),
            ],
            vec!["Q1".to_string(), "Q2".to_string(), "Q3".to_string()],
        );

        assert_eq!(ids(&view.derive()), vec!["Q1", "Q2", "Q3"]);
    }

    #[test]
    fn unranked_ids_sort_after_ranked_ones_preserving_order() {
        let mut view = ResultView::new();
        view.set_data(
            vec![
                row("Q8", "x", None, None),
                row("Q1", "a", None, None),
                row("Q9", "y", None, None),
            ],
            vec!["Q1".to_string()],
        );

        assert_eq!(ids(&view.derive()), vec!["Q1", "Q8", "Q9"]);
    }

    #[test]
    fn year_sorts_reverse_each_other_with_dateless_at_deficient_end() {
        let mut view = ResultView::new();
        view.set_data(
            vec![
                row("Q1", "a", None, Some(2011)),
                row("Q2", "b", None, None),
                row("Q3", "c", None, Some(1998)),
                row("Q4", "d", None, Some(2020)),
            ],
            vec![],
        );

        view.criteria.sort_key = SortKey::YearDesc;
        assert_eq!(ids(&view.derive()), vec!["Q4", "Q1", "Q3", "Q2"]);

        view.criteria.sort_key = SortKey::YearAsc;
        assert_eq!(ids(&view.derive()), vec!["Q2", "Q3", "Q1", "Q4"]);
    }

    #[test]
    fn year_sort_is_stable_for_equal_years() {
        let mut view = ResultView::new();
        view.set_data(
            vec![
                row("Q1", "a", None, Some(2011)),
                row("Q2", "b", None, Some(2011)),
                row("Q3", "c", None, Some(2011)),
            ],
            vec![],
        );

        view.criteria.sort_key = SortKey::YearAsc;
        assert_eq!(ids(&view.derive()), vec!["Q1", "Q2", "Q3"]);
    }

    #[test]
    fn name_sort_is_case_insensitive_with_unlabeled_first() {
        let mut view = ResultView::new();
        let mut unlabeled = DetailRow::new("Q0");
        unlabeled.label = None;
        view.set_data(
            vec![
                row("Q2", "beta", None, None),
                unlabeled,
                row("Q1", "Alpha", None, None),
            ],
            vec![],
        );

        view.criteria.sort_key = SortKey::NameAsc;
        assert_eq!(ids(&view.derive()), vec!["Q0", "Q1", "Q2"]);
    }

    #[test]
    fn manufacturer_filter_is_exact_match() {
        let mut view = ResultView::new();
        view.set_data(
            vec![
                row("Q1", "a", Some("Lenovo"), None),
                row("Q2", "b", Some("Dell"), None),
                row("Q3", "c", None, None),
            ],
            vec![],
        );

        view.criteria.manufacturer = Some("Lenovo".to_string());
        assert_eq!(ids(&view.derive()), vec!["Q1"]);
    }

    #[test]
    fn filters_compose_by_and() {
        let mut laptop = row("Q1", "a", Some("Lenovo"), None);
        laptop.category_id = Some(LAPTOP_CATEGORY_ID.to_string());
        let mut other_laptop = row("Q2", "b", Some("Dell"), None);
        other_laptop.category_id = Some(LAPTOP_CATEGORY_ID.to_string());
        let desktop = row("Q3", "c", Some("Lenovo"), None);

        let mut view = ResultView::new();
        view.set_data(vec![laptop, other_laptop, desktop], vec![]);
        view.criteria.manufacturer = Some("Lenovo".to_string());
        view.criteria.laptops_only = true;

        assert_eq!(ids(&view.derive()), vec!["Q1"]);
    }

    #[test]
    fn derive_is_subset_of_set_data_rows() {
        let mut view = ResultView::new();
        let input = vec![
            row("Q1", "a", Some("Lenovo"), Some(2011)),
            row("Q2", "b", None, None),
        ];
        view.set_data(input.clone(), vec!["Q2".to_string(), "Q1".to_string()]);
        view.criteria.laptops_only = true;

        let derived = view.derive();
        assert!(derived.iter().all(|d| input.iter().any(|r| r == d)));
    }

    #[test]
    fn criteria_persist_across_set_data() {
        let mut view = ResultView::new();
        view.criteria.manufacturer = Some("Lenovo".to_string());
        view.criteria.sort_key = SortKey::YearAsc;

        view.set_data(vec![row("Q1", "a", Some("Lenovo"), None)], vec![]);
        assert_eq!(view.criteria.manufacturer.as_deref(), Some("Lenovo"));
        assert_eq!(view.criteria.sort_key, SortKey::YearAsc);
    }

    #[test]
    fn facets_are_distinct_and_sorted() {
        let rows = vec![
            row("Q1", "a", Some("Lenovo"), None),
            row("Q2", "b", Some("Acer"), None),
            row("Q3", "c", Some("Lenovo"), None),
            row("Q4", "d", None, None),
        ];

        assert_eq!(
            ResultView::populate_facets(&rows),
            vec!["Acer".to_string(), "Lenovo".to_string()]
        );
    }

    #[test]
    fn facet_order_ignores_label_casing() {
        let rows = vec![
            row("Q1", "a", Some("apple"), None),
            row("Q2", "b", Some("ASUS"), None),
            row("Q3", "c", Some("Acer"), None),
        ];

        // Byte order would put the uppercase labels first.
        assert_eq!(
            ResultView::populate_facets(&rows),
            vec!["Acer".to_string(), "apple".to_string(), "ASUS".to_string()]
        );
    }

    #[test]
    fn sort_key_parses_cli_names() {
        assert_eq!(SortKey::parse("year-desc"), Some(SortKey::YearDesc));
        assert_eq!(SortKey::parse("relevance"), Some(SortKey::Relevance));
        assert_eq!(SortKey::parse("frobnicate"), None);
    }
}
