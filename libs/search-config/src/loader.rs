//! Declarative configuration loading.
//!
//! Configurations are TOML documents layered with `QUIRE_`-prefixed
//! environment overrides, deserialized into raw mirror structs and then
//! validated through [`SearchConfigBuilder`]. Keeping the serde surface
//! separate from the validated model means a file that parses can still be
//! rejected, with a precise error, before anything consults it.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use crate::config::{SearchConfig, SearchConfigBuilder};
use crate::error::{ConfigError, Result};
use crate::fields::{DisplayField, FacetField, FacetOrder, FieldType, SearchField};
use crate::settings::{GlobalDefaults, IndexViewSpec, ShowViewSpec};
use crate::sorts::{SortDirection, SortField, SortKey};

/// Prefix for environment-variable overrides, e.g.
/// `QUIRE_DEFAULTS__PAGE_SIZE=20`.
pub const ENV_PREFIX: &str = "QUIRE";

/// Load and validate a configuration from a TOML file plus environment
/// overrides.
pub fn from_file(path: impl AsRef<Path>) -> Result<SearchConfig> {
    let raw: ConfigFile = config::Config::builder()
        .add_source(config::File::from(path.as_ref()))
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?
        .try_deserialize()?;
    raw.into_config()
}

/// Load and validate a configuration from an inline TOML document.
///
/// No environment layering; intended for tests and embedded defaults.
pub fn from_toml_str(document: &str) -> Result<SearchConfig> {
    let raw: ConfigFile = config::Config::builder()
        .add_source(config::File::from_str(document, config::FileFormat::Toml))
        .build()?
        .try_deserialize()?;
    raw.into_config()
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    #[serde(default)]
    defaults: DefaultsFile,
    index_view: Option<IndexViewFile>,
    show_view: Option<ShowViewFile>,
    #[serde(default)]
    facet_fields: Vec<FacetFieldFile>,
    #[serde(default)]
    index_fields: Vec<DisplayFieldFile>,
    #[serde(default)]
    show_fields: Vec<DisplayFieldFile>,
    #[serde(default)]
    search_fields: Vec<SearchFieldFile>,
    #[serde(default)]
    sort_fields: Vec<SortFieldFile>,
    default_sort: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct DefaultsFile {
    request_handler: Option<String>,
    page_size: Option<usize>,
    spell_max: Option<usize>,
    #[serde(default)]
    parameters: BTreeMap<String, String>,
    echo_params: Option<bool>,
    restrict_facets: Option<bool>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct IndexViewFile {
    link_field: Option<String>,
    display_type_field: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ShowViewFile {
    title_field: Option<String>,
    heading_field: Option<String>,
    display_type_field: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FacetFieldFile {
    key: String,
    label: Option<String>,
    limit: Option<FacetLimitFile>,
    sort: Option<String>,
    #[serde(rename = "type")]
    field_type: Option<String>,
    #[serde(default)]
    range: bool,
    bounds: Option<RangeBoundsFile>,
    visible: Option<bool>,
}

/// `limit = 5` requests a fixed display limit; `limit = "sniff"` trusts the
/// backend-echoed limit; omitting it requests all values.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum FacetLimitFile {
    Count(usize),
    Mode(String),
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RangeBoundsFile {
    start: i64,
    end: i64,
    gap: i64,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct DisplayFieldFile {
    key: String,
    label: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SearchFieldFile {
    key: String,
    label: Option<String>,
    handler: Option<String>,
    #[serde(default)]
    parameters: BTreeMap<String, String>,
    #[serde(default)]
    local_parameters: BTreeMap<String, String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SortFieldFile {
    label: String,
    #[serde(default)]
    keys: Vec<SortKeyFile>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SortKeyFile {
    field: String,
    direction: Option<String>,
}

impl ConfigFile {
    fn into_config(self) -> Result<SearchConfig> {
        let mut builder = SearchConfigBuilder::new()
            .defaults(self.defaults.into_defaults())
            .index_view(self.index_view.map(IndexViewFile::into_spec).unwrap_or_default())
            .show_view(self.show_view.map(ShowViewFile::into_spec).unwrap_or_default());

        for raw in self.facet_fields {
            builder = builder.add_facet_field(raw.into_field()?);
        }
        for raw in self.index_fields {
            builder = builder.add_index_field(raw.into_field());
        }
        for raw in self.show_fields {
            builder = builder.add_show_field(raw.into_field());
        }
        for raw in self.search_fields {
            builder = builder.add_search_field(raw.into_field());
        }
        for raw in self.sort_fields {
            builder = builder.add_sort_field(raw.into_field()?);
        }
        if let Some(label) = self.default_sort {
            builder = builder.default_sort(label);
        }
        builder.build()
    }
}

impl DefaultsFile {
    fn into_defaults(self) -> GlobalDefaults {
        let mut defaults = GlobalDefaults::default();
        if let Some(handler) = self.request_handler {
            defaults.request_handler = handler;
        }
        if let Some(page_size) = self.page_size {
            defaults.page_size = page_size;
        }
        if let Some(spell_max) = self.spell_max {
            defaults.spell_max = spell_max;
        }
        defaults.parameters = self.parameters;
        if let Some(echo_params) = self.echo_params {
            defaults.echo_params = echo_params;
        }
        if let Some(restrict_facets) = self.restrict_facets {
            defaults.restrict_facets = restrict_facets;
        }
        defaults
    }
}

impl IndexViewFile {
    fn into_spec(self) -> IndexViewSpec {
        let mut spec = IndexViewSpec::default();
        if let Some(link_field) = self.link_field {
            spec.link_field = link_field;
        }
        spec.display_type_field = self.display_type_field;
        spec
    }
}

impl ShowViewFile {
    fn into_spec(self) -> ShowViewSpec {
        let mut spec = ShowViewSpec::default();
        if let Some(title_field) = self.title_field {
            spec.title_field = title_field;
        }
        if let Some(heading_field) = self.heading_field {
            spec.heading_field = heading_field;
        }
        spec.display_type_field = self.display_type_field;
        spec
    }
}

impl FacetFieldFile {
    fn into_field(self) -> Result<FacetField> {
        let mut field = match self.label {
            Some(label) => FacetField::new(self.key.clone(), label),
            None => FacetField::keyed(self.key.clone()),
        };

        match self.limit {
            None => {}
            Some(FacetLimitFile::Count(n)) => field = field.limit(n),
            Some(FacetLimitFile::Mode(mode)) => match mode.as_str() {
                "sniff" => field = field.sniffed_limit(),
                "all" => {}
                other => {
                    return Err(ConfigError::UnrecognizedValue {
                        key: self.key,
                        what: "facet limit",
                        value: other.to_string(),
                    });
                }
            },
        }

        if let Some(sort) = self.sort {
            field = match sort.as_str() {
                "count" => field.order(FacetOrder::Count),
                "index" => field.order(FacetOrder::Index),
                other => {
                    return Err(ConfigError::UnrecognizedValue {
                        key: self.key,
                        what: "facet sort",
                        value: other.to_string(),
                    });
                }
            };
        }

        if let Some(raw_type) = self.field_type {
            let field_type = FieldType::parse(&raw_type).ok_or_else(|| {
                ConfigError::UnrecognizedValue {
                    key: self.key.clone(),
                    what: "field type",
                    value: raw_type.clone(),
                }
            })?;
            field = field.typed(field_type);
        }

        if self.range {
            field = field.range();
        }
        if let Some(bounds) = self.bounds {
            field = field.bounds(bounds.start, bounds.end, bounds.gap);
        }
        if self.visible == Some(false) {
            field = field.hidden();
        }
        Ok(field)
    }
}

impl DisplayFieldFile {
    fn into_field(self) -> DisplayField {
        match self.label {
            Some(label) => DisplayField::new(self.key, label),
            None => DisplayField::keyed(self.key),
        }
    }
}

impl SearchFieldFile {
    fn into_field(self) -> SearchField {
        let mut field = match self.label {
            Some(label) => SearchField::new(self.key, label),
            None => SearchField::keyed(self.key),
        };
        if let Some(handler) = self.handler {
            field = field.handler(handler);
        }
        field.parameters = self.parameters;
        field.local_parameters = self.local_parameters;
        field
    }
}

impl SortFieldFile {
    fn into_field(self) -> Result<SortField> {
        let mut keys = Vec::with_capacity(self.keys.len());
        for raw in self.keys {
            let direction = match raw.direction {
                None => None,
                Some(value) => Some(SortDirection::parse(&value).ok_or_else(|| {
                    ConfigError::UnrecognizedValue {
                        key: raw.field.clone(),
                        what: "sort direction",
                        value,
                    }
                })?),
            };
            keys.push(SortKey {
                field: raw.field,
                direction,
            });
        }
        Ok(SortField::new(self.label, keys))
    }
}
