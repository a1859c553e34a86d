//! Query parameter compilation.
//!
//! Turns the user's query text and (optionally) a selected search field
//! into the handler name and parameter maps of the descriptor. The merge is
//! shallow and override-wins: a field's value for a key always replaces the
//! global default for that key, and global keys the field does not touch
//! pass through unchanged.

use std::collections::BTreeMap;

use quire_config::{SearchConfig, SearchField};

use crate::descriptor::QueryMode;

/// The compiled query half of a descriptor.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledQuery {
    pub request_handler: String,
    pub query: QueryMode,
    pub parameters: BTreeMap<String, String>,
    pub local_parameters: BTreeMap<String, String>,
}

/// Compile the query parameters for a request.
///
/// `field` is the already-resolved search field, or `None` for a default
/// search; `terms` is the trimmed query text, or `None` for browse-all.
pub fn compile(
    config: &SearchConfig,
    field: Option<&SearchField>,
    terms: Option<&str>,
) -> CompiledQuery {
    let mut parameters = config.defaults.parameters.clone();
    let mut local_parameters = BTreeMap::new();
    let mut request_handler = config.defaults.request_handler.clone();

    if let Some(field) = field {
        if let Some(handler) = &field.handler {
            request_handler = handler.clone();
        }
        for (key, value) in &field.parameters {
            parameters.insert(key.clone(), value.clone());
        }
        local_parameters = field.local_parameters.clone();
    }

    let query = match terms {
        Some(text) => QueryMode::Terms(text.to_string()),
        None => QueryMode::BrowseAll,
    };

    CompiledQuery {
        request_handler,
        query,
        parameters,
        local_parameters,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quire_config::{GlobalDefaults, SearchConfig, SearchField, SortField, SortKey};

    fn config() -> SearchConfig {
        let mut defaults = GlobalDefaults::default();
        defaults.parameters.insert("qf".into(), "text_qf".into());
        defaults.parameters.insert("pf".into(), "text_pf".into());
        SearchConfig::builder()
            .defaults(defaults)
            .add_search_field(SearchField::keyed("all_fields"))
            .add_search_field(
                SearchField::keyed("title")
                    .parameter("pf", "title_pf")
                    .parameter("spellcheck.dictionary", "title")
                    .local_parameter("qf", "$title_qf"),
            )
            .add_search_field(SearchField::keyed("notes").handler("notes_handler"))
            .add_sort_field(SortField::new("relevance", vec![SortKey::relevance()]))
            .build()
            .unwrap()
    }

    #[test]
    fn default_search_uses_global_handler_and_parameters() {
        let config = config();
        let compiled = compile(&config, None, Some("hamlet"));
        assert_eq!(compiled.request_handler, "search");
        assert_eq!(compiled.query, QueryMode::Terms("hamlet".into()));
        assert_eq!(compiled.parameters.get("qf").map(String::as_str), Some("text_qf"));
        assert!(compiled.local_parameters.is_empty());
    }

    #[test]
    fn field_overrides_win_and_untouched_globals_pass_through() {
        let config = config();
        let title = config.search_fields.lookup("title").unwrap();
        let compiled = compile(&config, Some(title), Some("hamlet"));

        // Field value replaces the global "pf"; global "qf" passes through.
        assert_eq!(compiled.parameters.get("pf").map(String::as_str), Some("title_pf"));
        assert_eq!(compiled.parameters.get("qf").map(String::as_str), Some("text_qf"));
        assert_eq!(
            compiled.parameters.get("spellcheck.dictionary").map(String::as_str),
            Some("title")
        );
        assert_eq!(
            compiled.local_parameters.get("qf").map(String::as_str),
            Some("$title_qf")
        );
    }

    #[test]
    fn handler_override_replaces_inherited_handler() {
        let config = config();
        let notes = config.search_fields.lookup("notes").unwrap();
        let compiled = compile(&config, Some(notes), None);
        assert_eq!(compiled.request_handler, "notes_handler");
        assert_eq!(compiled.query, QueryMode::BrowseAll);
    }
}
