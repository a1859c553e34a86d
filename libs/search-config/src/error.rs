//! Error types for configuration loading and validation.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Failures raised while building or loading a search configuration.
///
/// All variants are fatal at load time: a configuration that fails
/// validation must abort startup rather than serve requests against a
/// partially-usable registry set.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("duplicate {category} field key: {key}")]
    DuplicateKey { category: &'static str, key: String },

    #[error("sort \"{label}\" has no sort keys")]
    EmptySortSpec { label: String },

    #[error("duplicate sort label: {label}")]
    DuplicateSort { label: String },

    #[error("facet field \"{key}\" is declared as a range but has type {field_type}")]
    InvalidRangeField { key: String, field_type: String },

    #[error("{category} field \"{key}\" has an empty label")]
    EmptyLabel { category: &'static str, key: String },

    #[error("field key must not be empty")]
    EmptyKey,

    #[error("sort direction is only optional for the relevance field, not \"{field}\"")]
    MissingSortDirection { field: String },

    #[error("default sort \"{label}\" is not a registered sort")]
    UnknownDefaultSort { label: String },

    #[error("field \"{key}\": unrecognized {what} \"{value}\"")]
    UnrecognizedValue {
        key: String,
        what: &'static str,
        value: String,
    },

    #[error("configuration source error: {0}")]
    Source(#[from] config::ConfigError),
}
