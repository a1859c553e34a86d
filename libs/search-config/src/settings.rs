//! Global request defaults and view decoration.

use std::collections::BTreeMap;

/// Defaults applied to every search-like request unless a field or request
/// overrides them.
#[derive(Debug, Clone, PartialEq)]
pub struct GlobalDefaults {
    /// Backend request handler used when a search field has no override.
    pub request_handler: String,
    /// Rows per page when the request does not say otherwise.
    pub page_size: usize,
    /// Above this many results, spelling suggestions are not worth showing.
    pub spell_max: usize,
    /// Backend parameters sent on every request; per-field parameters are
    /// merged over these, field value winning per key.
    pub parameters: BTreeMap<String, String>,
    /// Whether the backend echoes effective request parameters back in its
    /// response. Sniffed facet limits require this.
    pub echo_params: bool,
    /// Restrict faceting to exactly the registered facet fields instead of
    /// letting backend-side defaults add undeclared ones.
    pub restrict_facets: bool,
}

impl Default for GlobalDefaults {
    fn default() -> Self {
        Self {
            request_handler: "search".to_string(),
            page_size: 10,
            spell_max: 5,
            parameters: BTreeMap::new(),
            echo_params: false,
            restrict_facets: true,
        }
    }
}

/// Which fields decorate entries in the result list.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexViewSpec {
    /// Field whose value links to the detail page.
    pub link_field: String,
    /// Field that names each record's display type, if any.
    pub display_type_field: Option<String>,
}

impl Default for IndexViewSpec {
    fn default() -> Self {
        Self {
            link_field: "id".to_string(),
            display_type_field: None,
        }
    }
}

/// Which fields decorate the detail page.
#[derive(Debug, Clone, PartialEq)]
pub struct ShowViewSpec {
    /// Field rendered as the page title.
    pub title_field: String,
    /// Field rendered as the page heading.
    pub heading_field: String,
    /// Field that names the record's display type, if any.
    pub display_type_field: Option<String>,
}

impl Default for ShowViewSpec {
    fn default() -> Self {
        Self {
            title_field: "id".to_string(),
            heading_field: "id".to_string(),
            display_type_field: None,
        }
    }
}
