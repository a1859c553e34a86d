//! Error types for request-time query assembly.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, QueryError>;

/// Failures raised while assembling a query descriptor.
///
/// These are per-request: the caller reports them back to its client and
/// degrades gracefully rather than aborting the process. Unknown sort labels
/// and unknown facet selections never surface here at all — they fall back
/// to defaults and become warnings on the descriptor.
#[derive(Error, Debug)]
pub enum QueryError {
    #[error("unknown search field: {key}")]
    UnknownField { key: String },

    #[error("facet \"{field}\" uses a sniffed limit but the backend does not echo parameters")]
    SniffUnsupported { field: String },

    #[error("every configured facet failed to compile")]
    AllFacetsFailed,

    #[error("query assembly failed: {0}")]
    Assembly(#[source] Box<QueryError>),
}
