//! Typed field descriptors.
//!
//! A catalog configuration declares four kinds of fields:
//! - [`FacetField`]: categorical or range breakdowns offered for filtering
//! - [`DisplayField`]: fields shown in result lists (index) or detail pages
//!   (show), in declaration order
//! - [`SearchField`]: user-selectable search targets with per-field request
//!   parameters layered over the global defaults
//!
//! Field keys appear in URLs and are immutable once deployed — changing one
//! breaks bookmarked searches. Labels may be omitted and are then derived
//! from the key.

use std::collections::BTreeMap;

use serde::Serialize;

/// Declared value type of a facet field.
///
/// Only `Integer` and `Date` fields can be faceted as ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldType {
    #[default]
    Text,
    Integer,
    Date,
}

impl FieldType {
    pub fn is_range_compatible(self) -> bool {
        matches!(self, Self::Integer | Self::Date)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Integer => "integer",
            Self::Date => "date",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "text" => Some(Self::Text),
            "integer" | "int" => Some(Self::Integer),
            "date" => Some(Self::Date),
            _ => None,
        }
    }
}

/// How many values a facet requests from the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FacetLimit {
    /// No limit parameter; every value the backend returns is displayed.
    #[default]
    All,
    /// Display `n` values. The compiled fragment requests `n + 1` so the
    /// consumer can tell whether a "more" affordance is needed.
    Display(usize),
    /// Send no limit parameter of our own; trust the limit the backend
    /// echoes back in its response and display `limit - 1`. Only usable
    /// against backends that echo effective request parameters.
    Sniff,
}

/// Ordering of facet values in the response.
///
/// Serializes into compiled facet fragments, hence the derive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FacetOrder {
    /// Most-populated value first.
    #[default]
    Count,
    /// Lexicographic by value key.
    Index,
}

impl FacetOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Count => "count",
            Self::Index => "index",
        }
    }
}

/// Explicit bucket bounds for a range facet.
///
/// When absent, the consumer derives bounds from backend index statistics.
/// `Date` facets use year-granularity integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RangeBounds {
    pub start: i64,
    pub end: i64,
    pub gap: i64,
}

/// A field offered as a facet in the sidebar.
#[derive(Debug, Clone, PartialEq)]
pub struct FacetField {
    pub key: String,
    pub label: String,
    pub limit: FacetLimit,
    pub order: FacetOrder,
    pub field_type: FieldType,
    /// Facet as bucketed ranges instead of discrete values.
    pub range: bool,
    pub range_bounds: Option<RangeBounds>,
    /// Hidden facets are kept out of compiled requests entirely.
    pub visible: bool,
}

impl FacetField {
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            limit: FacetLimit::All,
            order: FacetOrder::Count,
            field_type: FieldType::Text,
            range: false,
            range_bounds: None,
            visible: true,
        }
    }

    /// Construct with a label derived from the key.
    pub fn keyed(key: impl Into<String>) -> Self {
        let key = key.into();
        let label = humanize(&key);
        Self::new(key, label)
    }

    pub fn limit(mut self, n: usize) -> Self {
        self.limit = FacetLimit::Display(n);
        self
    }

    pub fn sniffed_limit(mut self) -> Self {
        self.limit = FacetLimit::Sniff;
        self
    }

    pub fn order(mut self, order: FacetOrder) -> Self {
        self.order = order;
        self
    }

    pub fn typed(mut self, field_type: FieldType) -> Self {
        self.field_type = field_type;
        self
    }

    pub fn range(mut self) -> Self {
        self.range = true;
        self
    }

    pub fn bounds(mut self, start: i64, end: i64, gap: i64) -> Self {
        self.range_bounds = Some(RangeBounds { start, end, gap });
        self
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }
}

/// A field shown in the result list or on the detail page.
///
/// Registration order is display order.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayField {
    pub key: String,
    pub label: String,
}

impl DisplayField {
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
        }
    }

    /// Construct with a label derived from the key.
    pub fn keyed(key: impl Into<String>) -> Self {
        let key = key.into();
        let label = humanize(&key);
        Self { key, label }
    }
}

/// A user-selectable search target.
///
/// A search field is typically a weighted aggregate of several underlying
/// index fields; the aggregation itself lives in the backend's request
/// handler, referenced here through `local_parameters` substitutions such
/// as `qf = "$title_qf"`.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchField {
    pub key: String,
    pub label: String,
    /// Request handler override; inherits the global default when `None`.
    pub handler: Option<String>,
    /// Backend request parameters sent as ordinary query parameters,
    /// e.g. a spell-check dictionary hint. Merged over the global
    /// defaults, field value winning per key.
    pub parameters: BTreeMap<String, String>,
    /// Query-language-local substitutions applied inside the query itself.
    pub local_parameters: BTreeMap<String, String>,
}

impl SearchField {
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            handler: None,
            parameters: BTreeMap::new(),
            local_parameters: BTreeMap::new(),
        }
    }

    /// Construct with a label derived from the key.
    pub fn keyed(key: impl Into<String>) -> Self {
        let key = key.into();
        let label = humanize(&key);
        Self::new(key, label)
    }

    pub fn handler(mut self, handler: impl Into<String>) -> Self {
        self.handler = Some(handler.into());
        self
    }

    pub fn parameter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.parameters.insert(key.into(), value.into());
        self
    }

    pub fn local_parameter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.local_parameters.insert(key.into(), value.into());
        self
    }
}

/// Derive a display label from a field key: underscores and dashes become
/// spaces, each word is capitalized. `pub_year` → `Pub Year`.
pub fn humanize(key: &str) -> String {
    key.split(['_', '-'])
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn humanize_splits_and_capitalizes() {
        assert_eq!(humanize("pub_year"), "Pub Year");
        assert_eq!(humanize("author"), "Author");
        assert_eq!(humanize("q-who"), "Q Who");
        assert_eq!(humanize("__x"), "X");
    }

    #[test]
    fn keyed_constructors_derive_labels() {
        assert_eq!(FacetField::keyed("author_gender").label, "Author Gender");
        assert_eq!(DisplayField::keyed("chap").label, "Chap");
        assert_eq!(SearchField::keyed("all_fields").label, "All Fields");
    }

    #[test]
    fn facet_builder_chains() {
        let f = FacetField::new("pub_year", "Publication Year")
            .limit(5)
            .typed(FieldType::Integer)
            .range()
            .bounds(1500, 2000, 10);
        assert_eq!(f.limit, FacetLimit::Display(5));
        assert!(f.range);
        assert_eq!(
            f.range_bounds,
            Some(RangeBounds {
                start: 1500,
                end: 2000,
                gap: 10
            })
        );
        assert!(f.visible);
    }

    #[test]
    fn only_integer_and_date_are_range_compatible() {
        assert!(!FieldType::Text.is_range_compatible());
        assert!(FieldType::Integer.is_range_compatible());
        assert!(FieldType::Date.is_range_compatible());
    }

    #[test]
    fn search_field_collects_parameters() {
        let f = SearchField::new("title", "Title")
            .parameter("spellcheck.dictionary", "title")
            .local_parameter("qf", "$title_qf")
            .local_parameter("pf", "$title_pf");
        assert!(f.handler.is_none());
        assert_eq!(
            f.parameters.get("spellcheck.dictionary").map(String::as_str),
            Some("title")
        );
        assert_eq!(f.local_parameters.len(), 2);
    }
}
