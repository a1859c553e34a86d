//! Declarative catalog search configuration.
//!
//! This crate holds the configuration half of the search engine:
//! - Typed descriptors for facet, display, and search fields
//! - Named multi-key sort specifications, composed at load time
//! - Global request defaults (handler, page size, suggestion threshold)
//! - Registries with stable iteration order and key validation
//!
//! A [`SearchConfig`] is built once — from a TOML file via [`loader`] or in
//! code via [`SearchConfigBuilder`] — validated, and then shared read-only
//! across arbitrarily many concurrent requests. Reloads go through
//! [`ConfigHandle`], which swaps the whole registry set atomically; nothing
//! ever mutates a live configuration in place.

pub mod config;
pub mod error;
pub mod fields;
pub mod handle;
pub mod loader;
pub mod registry;
pub mod settings;
pub mod sorts;

pub use config::{SearchConfig, SearchConfigBuilder};
pub use error::{ConfigError, Result};
pub use fields::{
    DisplayField, FacetField, FacetLimit, FacetOrder, FieldType, RangeBounds, SearchField,
};
pub use handle::ConfigHandle;
pub use registry::{FieldRegistry, SortRegistry};
pub use settings::{GlobalDefaults, IndexViewSpec, ShowViewSpec};
pub use sorts::{SortDirection, SortField, SortKey};
