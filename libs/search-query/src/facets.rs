//! Facet parameter compilation.
//!
//! Emits one request fragment per visible facet. Per-facet failures do not
//! poison the rest of the request: a facet that cannot compile becomes a
//! warning attached to the descriptor and the remaining facets still go
//! out. Only when every facet fails is the whole compilation an error.

use quire_config::{FacetField, FacetLimit, GlobalDefaults, SearchConfig};

use crate::descriptor::{DescriptorWarning, FacetFragment, FacetKind, FacetLimitPolicy};
use crate::error::{QueryError, Result};

/// The compiled facet half of a descriptor.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledFacets {
    pub fragments: Vec<FacetFragment>,
    /// `Some` when the engine-wide allow-list policy is on: the backend must
    /// facet on exactly these fields.
    pub allow_list: Option<Vec<String>>,
    pub warnings: Vec<DescriptorWarning>,
}

/// Compile request fragments for every visible facet.
///
/// A facet that fails to compile is dropped and recorded as a warning; the
/// request only fails when no facet survives.
pub fn compile(config: &SearchConfig) -> Result<CompiledFacets> {
    let mut fragments = Vec::new();
    let mut warnings = Vec::new();
    let mut visible = 0usize;

    for facet in config.facet_fields.iter() {
        if !facet.visible {
            continue;
        }
        visible += 1;

        match compile_field(facet, &config.defaults) {
            Ok(fragment) => fragments.push(fragment),
            Err(QueryError::SniffUnsupported { field }) => {
                tracing::warn!(
                    field = %field,
                    "dropping sniffed facet limit: backend does not echo parameters"
                );
                warnings.push(DescriptorWarning::SniffUnsupported { field });
            }
            Err(other) => return Err(other),
        }
    }

    if visible > 0 && fragments.is_empty() {
        return Err(QueryError::AllFacetsFailed);
    }

    let allow_list = config
        .defaults
        .restrict_facets
        .then(|| fragments.iter().map(|f| f.field.clone()).collect());

    Ok(CompiledFacets {
        fragments,
        allow_list,
        warnings,
    })
}

/// Compile the request fragment for one facet.
fn compile_field(facet: &FacetField, defaults: &GlobalDefaults) -> Result<FacetFragment> {
    let limit = match facet.limit {
        FacetLimit::All => FacetLimitPolicy::All,
        FacetLimit::Display(n) => FacetLimitPolicy::Explicit {
            request: n + 1,
            display: n,
        },
        FacetLimit::Sniff => {
            if !defaults.echo_params {
                return Err(QueryError::SniffUnsupported {
                    field: facet.key.clone(),
                });
            }
            FacetLimitPolicy::Sniffed
        }
    };

    let kind = if facet.range {
        FacetKind::Range {
            bounds: facet.range_bounds,
        }
    } else {
        FacetKind::Discrete
    };

    Ok(FacetFragment {
        field: facet.key.clone(),
        kind,
        limit,
        order: facet.order,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use quire_config::{
        FacetField, FacetOrder, FieldType, GlobalDefaults, SearchConfig, SearchField, SortField,
        SortKey,
    };

    fn builder(echo_params: bool, restrict_facets: bool) -> quire_config::SearchConfigBuilder {
        let mut defaults = GlobalDefaults::default();
        defaults.echo_params = echo_params;
        defaults.restrict_facets = restrict_facets;
        SearchConfig::builder()
            .defaults(defaults)
            .add_search_field(SearchField::keyed("all_fields"))
            .add_sort_field(SortField::new("relevance", vec![SortKey::relevance()]))
    }

    #[test]
    fn explicit_limit_requests_one_more_than_displayed() {
        let config = builder(false, true)
            .add_facet_field(FacetField::keyed("genre").limit(5))
            .build()
            .unwrap();
        let compiled = compile(&config).unwrap();
        assert_eq!(
            compiled.fragments[0].limit,
            FacetLimitPolicy::Explicit {
                request: 6,
                display: 5
            }
        );
    }

    #[test]
    fn unlimited_facet_emits_no_limit_parameter() {
        let config = builder(false, true)
            .add_facet_field(FacetField::keyed("author"))
            .build()
            .unwrap();
        let compiled = compile(&config).unwrap();
        assert_eq!(compiled.fragments[0].limit, FacetLimitPolicy::All);
        assert_eq!(compiled.fragments[0].kind, FacetKind::Discrete);
        assert_eq!(compiled.fragments[0].order, FacetOrder::Count);
    }

    #[test]
    fn sniffed_limit_requires_parameter_echoing() {
        let config = builder(true, true)
            .add_facet_field(FacetField::keyed("chap").sniffed_limit())
            .build()
            .unwrap();
        let compiled = compile(&config).unwrap();
        assert_eq!(compiled.fragments[0].limit, FacetLimitPolicy::Sniffed);
        assert!(compiled.warnings.is_empty());
    }

    #[test]
    fn sniff_failure_is_isolated_to_its_facet() {
        let config = builder(false, true)
            .add_facet_field(FacetField::keyed("chap").sniffed_limit())
            .add_facet_field(FacetField::keyed("genre").limit(3))
            .build()
            .unwrap();
        let compiled = compile(&config).unwrap();

        let fields: Vec<_> = compiled.fragments.iter().map(|f| f.field.as_str()).collect();
        assert_eq!(fields, vec!["genre"]);
        assert_eq!(
            compiled.warnings,
            vec![DescriptorWarning::SniffUnsupported {
                field: "chap".into()
            }]
        );
        // The dropped facet is also absent from the allow-list.
        assert_eq!(compiled.allow_list, Some(vec!["genre".into()]));
    }

    #[test]
    fn all_facets_failing_fails_the_compilation() {
        let config = builder(false, true)
            .add_facet_field(FacetField::keyed("chap").sniffed_limit())
            .build()
            .unwrap();
        assert!(matches!(compile(&config), Err(QueryError::AllFacetsFailed)));
    }

    #[test]
    fn hidden_facets_are_not_requested() {
        let config = builder(false, true)
            .add_facet_field(FacetField::keyed("author"))
            .add_facet_field(FacetField::keyed("q_age").hidden())
            .build()
            .unwrap();
        let compiled = compile(&config).unwrap();
        let fields: Vec<_> = compiled.fragments.iter().map(|f| f.field.as_str()).collect();
        assert_eq!(fields, vec!["author"]);
    }

    #[test]
    fn range_facet_compiles_to_range_fragment() {
        let config = builder(false, true)
            .add_facet_field(
                FacetField::keyed("pub_year")
                    .typed(FieldType::Integer)
                    .range()
                    .bounds(1500, 2000, 10),
            )
            .build()
            .unwrap();
        let compiled = compile(&config).unwrap();
        match &compiled.fragments[0].kind {
            FacetKind::Range { bounds } => {
                let bounds = bounds.expect("explicit bounds");
                assert_eq!((bounds.start, bounds.end, bounds.gap), (1500, 2000, 10));
            }
            other => panic!("expected range fragment, got {other:?}"),
        }
    }

    #[test]
    fn allow_list_follows_the_engine_wide_policy() {
        let restricted = builder(false, true)
            .add_facet_field(FacetField::keyed("author"))
            .build()
            .unwrap();
        assert_eq!(
            compile(&restricted).unwrap().allow_list,
            Some(vec!["author".into()])
        );

        let open = builder(false, false)
            .add_facet_field(FacetField::keyed("author"))
            .build()
            .unwrap();
        assert_eq!(compile(&open).unwrap().allow_list, None);
    }

    #[test]
    fn no_facets_configured_is_fine() {
        let config = builder(false, true).build().unwrap();
        let compiled = compile(&config).unwrap();
        assert!(compiled.fragments.is_empty());
        assert_eq!(compiled.allow_list, Some(Vec::new()));
    }
}
