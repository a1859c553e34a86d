//! The inbound search request record.

use std::collections::{BTreeMap, BTreeSet};

/// Facet values selected by the user for one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FacetSelection {
    /// Discrete value selections, OR-ed together by the backend.
    Values(BTreeSet<String>),
    /// An inclusive range selection on a range facet.
    Range { start: i64, end: i64 },
}

/// One user search request, as handed over by the controller layer.
///
/// Everything is optional: an empty request is a browse of the whole
/// catalog with default sort and pagination.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchRequest {
    /// Free-text query. Empty or whitespace-only text means "browse all",
    /// which is a distinct mode rather than an error.
    pub query: Option<String>,
    /// Key of the search field to query through; `None` uses the global
    /// default handler without field-specific expansion.
    pub search_field: Option<String>,
    /// Facet selections keyed by facet field.
    pub facet_selections: BTreeMap<String, FacetSelection>,
    /// Requested sort label; unknown labels fall back to the default.
    pub sort: Option<String>,
    /// 1-based page number.
    pub page: Option<usize>,
    /// Rows per page, overriding the configured default.
    pub rows: Option<usize>,
}

impl SearchRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    pub fn with_search_field(mut self, key: impl Into<String>) -> Self {
        self.search_field = Some(key.into());
        self
    }

    /// Select discrete facet values for `field`, merging with any previous
    /// selection on the same field.
    pub fn select(
        mut self,
        field: impl Into<String>,
        values: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        let entry = self
            .facet_selections
            .entry(field.into())
            .or_insert_with(|| FacetSelection::Values(BTreeSet::new()));
        if let FacetSelection::Values(existing) = entry {
            existing.extend(values.into_iter().map(Into::into));
        } else {
            *entry = FacetSelection::Values(values.into_iter().map(Into::into).collect());
        }
        self
    }

    /// Select an inclusive range on a range facet, replacing any previous
    /// selection on the same field.
    pub fn select_range(mut self, field: impl Into<String>, start: i64, end: i64) -> Self {
        self.facet_selections
            .insert(field.into(), FacetSelection::Range { start, end });
        self
    }

    pub fn with_sort(mut self, label: impl Into<String>) -> Self {
        self.sort = Some(label.into());
        self
    }

    pub fn with_page(mut self, page: usize) -> Self {
        self.page = Some(page);
        self
    }

    pub fn with_rows(mut self, rows: usize) -> Self {
        self.rows = Some(rows);
        self
    }

    /// The trimmed query text, or `None` for browse-all requests.
    pub fn terms(&self) -> Option<&str> {
        self.query
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitespace_query_is_browse_all() {
        assert_eq!(SearchRequest::new().terms(), None);
        assert_eq!(SearchRequest::new().with_query("   ").terms(), None);
        assert_eq!(
            SearchRequest::new().with_query("  hamlet ").terms(),
            Some("hamlet")
        );
    }

    #[test]
    fn select_merges_values_per_field() {
        let request = SearchRequest::new()
            .select("genre", ["Tragedy"])
            .select("genre", ["Comedy"])
            .select_range("pub_year", 1590, 1613);

        match request.facet_selections.get("genre").unwrap() {
            FacetSelection::Values(values) => {
                let values: Vec<_> = values.iter().map(String::as_str).collect();
                assert_eq!(values, vec!["Comedy", "Tragedy"]);
            }
            other => panic!("expected values selection, got {other:?}"),
        }
        assert_eq!(
            request.facet_selections.get("pub_year"),
            Some(&FacetSelection::Range {
                start: 1590,
                end: 1613
            })
        );
    }

    #[test]
    fn range_selection_replaces_value_selection() {
        let request = SearchRequest::new()
            .select("pub_year", ["1600"])
            .select_range("pub_year", 1590, 1613);
        assert!(matches!(
            request.facet_selections.get("pub_year"),
            Some(FacetSelection::Range { .. })
        ));
    }
}
