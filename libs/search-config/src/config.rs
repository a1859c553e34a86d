//! The immutable configuration aggregate and its builder.

use crate::error::{ConfigError, Result};
use crate::fields::{DisplayField, FacetField, SearchField};
use crate::registry::{FieldRegistry, SortRegistry};
use crate::settings::{GlobalDefaults, IndexViewSpec, ShowViewSpec};
use crate::sorts::SortField;

/// A complete, validated catalog search configuration.
///
/// Built once via [`SearchConfigBuilder`] or [`crate::loader`], then shared
/// read-only for the lifetime of the process. Request handling only consults
/// it; reloads replace the whole value through [`crate::ConfigHandle`].
#[derive(Debug, Clone)]
pub struct SearchConfig {
    pub defaults: GlobalDefaults,
    pub index_view: IndexViewSpec,
    pub show_view: ShowViewSpec,
    pub facet_fields: FieldRegistry<FacetField>,
    pub index_fields: FieldRegistry<DisplayField>,
    pub show_fields: FieldRegistry<DisplayField>,
    pub search_fields: FieldRegistry<SearchField>,
    pub sorts: SortRegistry,
    default_sort: Option<String>,
}

impl SearchConfig {
    pub fn builder() -> SearchConfigBuilder {
        SearchConfigBuilder::new()
    }

    /// The label requests fall back to when they omit a sort or name an
    /// unknown one. Defaults to the first registered sort.
    pub fn default_sort_label(&self) -> Option<&str> {
        self.default_sort
            .as_deref()
            .or_else(|| self.sorts.labels().next())
    }

    /// The composed expression of the default sort.
    pub fn default_sort_expression(&self) -> Option<&str> {
        self.default_sort_label()
            .and_then(|label| self.sorts.resolve(label))
    }
}

/// Collects field and sort declarations, then validates them as a whole.
///
/// Declaration order is preserved: it is the display order for index and
/// show fields and the pulldown order for facets, search fields, and sorts.
#[derive(Debug, Default)]
pub struct SearchConfigBuilder {
    defaults: GlobalDefaults,
    index_view: IndexViewSpec,
    show_view: ShowViewSpec,
    facet_fields: Vec<FacetField>,
    index_fields: Vec<DisplayField>,
    show_fields: Vec<DisplayField>,
    search_fields: Vec<SearchField>,
    sorts: Vec<SortField>,
    default_sort: Option<String>,
}

impl SearchConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn defaults(mut self, defaults: GlobalDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn index_view(mut self, view: IndexViewSpec) -> Self {
        self.index_view = view;
        self
    }

    pub fn show_view(mut self, view: ShowViewSpec) -> Self {
        self.show_view = view;
        self
    }

    pub fn add_facet_field(mut self, field: FacetField) -> Self {
        self.facet_fields.push(field);
        self
    }

    pub fn add_index_field(mut self, field: DisplayField) -> Self {
        self.index_fields.push(field);
        self
    }

    pub fn add_show_field(mut self, field: DisplayField) -> Self {
        self.show_fields.push(field);
        self
    }

    pub fn add_search_field(mut self, field: SearchField) -> Self {
        self.search_fields.push(field);
        self
    }

    pub fn add_sort_field(mut self, sort: SortField) -> Self {
        self.sorts.push(sort);
        self
    }

    pub fn default_sort(mut self, label: impl Into<String>) -> Self {
        self.default_sort = Some(label.into());
        self
    }

    /// Validate every declaration and produce the immutable configuration.
    ///
    /// The first failing declaration aborts the build; a partially-valid
    /// configuration is never returned.
    pub fn build(self) -> Result<SearchConfig> {
        let mut facet_fields = FieldRegistry::new("facet");
        for field in self.facet_fields {
            facet_fields.register(field)?;
        }

        let mut index_fields = FieldRegistry::new("index");
        for field in self.index_fields {
            index_fields.register(field)?;
        }

        let mut show_fields = FieldRegistry::new("show");
        for field in self.show_fields {
            show_fields.register(field)?;
        }

        let mut search_fields = FieldRegistry::new("search");
        for field in self.search_fields {
            search_fields.register(field)?;
        }

        let mut sorts = SortRegistry::new();
        for sort in self.sorts {
            sorts.register(sort)?;
        }

        if let Some(label) = &self.default_sort {
            if sorts.resolve(label).is_none() {
                return Err(ConfigError::UnknownDefaultSort {
                    label: label.clone(),
                });
            }
        }

        Ok(SearchConfig {
            defaults: self.defaults,
            index_view: self.index_view,
            show_view: self.show_view,
            facet_fields,
            index_fields,
            show_fields,
            search_fields,
            sorts,
            default_sort: self.default_sort,
        })
    }
}
