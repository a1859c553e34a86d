//! Request assembly.
//!
//! Composes the query compiler, facet compiler, and sort resolver with
//! pagination into one descriptor. Assembly either succeeds completely or
//! fails with [`QueryError::Assembly`] wrapping the first sub-component
//! failure — a partial descriptor is never returned.

use quire_config::SearchConfig;

use crate::descriptor::{DescriptorWarning, FacetFilter, QueryDescriptor};
use crate::error::{QueryError, Result};
use crate::request::{FacetSelection, SearchRequest};
use crate::{facets, query_params, sort};

/// Assemble one backend-ready descriptor for `request`.
pub fn assemble(config: &SearchConfig, request: &SearchRequest) -> Result<QueryDescriptor> {
    try_assemble(config, request).map_err(|e| QueryError::Assembly(Box::new(e)))
}

fn try_assemble(config: &SearchConfig, request: &SearchRequest) -> Result<QueryDescriptor> {
    let search_field = match &request.search_field {
        None => None,
        Some(key) => Some(config.search_fields.lookup(key).ok_or_else(|| {
            QueryError::UnknownField { key: key.clone() }
        })?),
    };

    let query = query_params::compile(config, search_field, request.terms());
    let compiled_facets = facets::compile(config)?;
    let mut warnings = compiled_facets.warnings;

    let mut filters = Vec::new();
    for (field, selection) in &request.facet_selections {
        if config.facet_fields.lookup(field).is_none() {
            tracing::warn!(field = %field, "ignoring selection on undeclared facet");
            warnings.push(DescriptorWarning::UnknownFacetSelection {
                field: field.clone(),
            });
            continue;
        }
        filters.push(match selection {
            FacetSelection::Values(values) => FacetFilter::Values {
                field: field.clone(),
                values: values.iter().cloned().collect(),
            },
            FacetSelection::Range { start, end } => FacetFilter::Range {
                field: field.clone(),
                start: *start,
                end: *end,
            },
        });
    }

    let resolved_sort = sort::resolve(config, request.sort.as_deref());
    if let Some(requested) = resolved_sort.fallback_from {
        let fallback = config.default_sort_label().unwrap_or_default().to_string();
        tracing::warn!(
            requested = %requested,
            fallback = %fallback,
            "unknown sort label, using default"
        );
        warnings.push(DescriptorWarning::UnknownSort {
            requested,
            fallback,
        });
    }

    let rows = request.rows.unwrap_or(config.defaults.page_size);
    let page = request.page.unwrap_or(1).max(1);
    let start = (page - 1) * rows;

    let spellcheck = query.query.is_terms();

    Ok(QueryDescriptor {
        request_handler: query.request_handler,
        query: query.query,
        parameters: query.parameters,
        local_parameters: query.local_parameters,
        facets: compiled_facets.fragments,
        facet_allow_list: compiled_facets.allow_list,
        filters,
        sort: resolved_sort.expression,
        start,
        rows,
        spellcheck,
        warnings,
    })
}
