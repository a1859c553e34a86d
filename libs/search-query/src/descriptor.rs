//! The outbound query descriptor.
//!
//! One descriptor is the complete, immutable result of assembling a search
//! request against a configuration snapshot. It is the hand-off record to
//! the search-engine client and serializes deterministically: maps are
//! ordered, facet fragments follow registration order, and filters follow
//! field-key order.

use std::collections::BTreeMap;

use quire_config::{FacetOrder, RangeBounds};
use serde::Serialize;

/// How the query text is interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "mode", content = "text")]
pub enum QueryMode {
    /// Free-text terms.
    Terms(String),
    /// No query text: browse the whole catalog.
    BrowseAll,
}

impl QueryMode {
    pub fn is_terms(&self) -> bool {
        matches!(self, Self::Terms(_))
    }
}

/// Limit policy compiled for one facet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "policy")]
pub enum FacetLimitPolicy {
    /// No limit parameter; display everything the backend returns.
    All,
    /// Request one value more than is displayed so the consumer can tell
    /// whether a "more" affordance is needed.
    Explicit { request: usize, display: usize },
    /// No limit parameter of our own; the consumer reads the effective
    /// limit from the backend's echoed parameters and displays one fewer.
    Sniffed,
}

/// Discrete-value or range faceting for one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum FacetKind {
    Discrete,
    /// Bucketed ranges; bounds are derived from backend index statistics
    /// when not given explicitly.
    Range { bounds: Option<RangeBounds> },
}

/// The compiled facet request for one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FacetFragment {
    pub field: String,
    pub kind: FacetKind,
    pub limit: FacetLimitPolicy,
    pub order: FacetOrder,
}

/// A filter derived from the request's facet selections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum FacetFilter {
    /// Discrete values, OR-ed together by the backend.
    Values { field: String, values: Vec<String> },
    /// Inclusive range filter.
    Range { field: String, start: i64, end: i64 },
}

/// Non-fatal degradations recorded during assembly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum DescriptorWarning {
    /// A sniffed facet limit was dropped: the backend does not echo
    /// effective parameters.
    SniffUnsupported { field: String },
    /// The request selected values on an undeclared facet; ignored.
    UnknownFacetSelection { field: String },
    /// The requested sort label is not registered; the default was used.
    UnknownSort { requested: String, fallback: String },
}

/// One complete, backend-ready query descriptor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryDescriptor {
    /// Backend request handler to address.
    pub request_handler: String,
    pub query: QueryMode,
    /// Backend request parameters: global defaults with the search field's
    /// overrides merged on top.
    pub parameters: BTreeMap<String, String>,
    /// Query-language-local substitutions for the selected search field.
    pub local_parameters: BTreeMap<String, String>,
    /// Per-facet request fragments, in facet registration order.
    pub facets: Vec<FacetFragment>,
    /// When set, the backend must facet on exactly these fields instead of
    /// adding backend-side defaults.
    pub facet_allow_list: Option<Vec<String>>,
    /// Filters from the request's facet selections, in field-key order.
    pub filters: Vec<FacetFilter>,
    /// Composed multi-key sort expression.
    pub sort: String,
    /// Zero-based offset of the first row.
    pub start: usize,
    /// Rows per page.
    pub rows: usize,
    /// Whether to request spelling-suggestion data from the backend.
    pub spellcheck: bool,
    /// Degradations the consumer may want to surface or log.
    pub warnings: Vec<DescriptorWarning>,
}
