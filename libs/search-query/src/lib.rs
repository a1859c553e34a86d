//! Per-request query assembly.
//!
//! This crate is the request half of the search engine: given an immutable
//! [`SearchConfig`](quire_config::SearchConfig) snapshot and one inbound
//! [`SearchRequest`], it deterministically compiles one backend-agnostic
//! [`QueryDescriptor`] — request handler and merged parameters, per-facet
//! request fragments, composed sort expression, pagination, and a
//! spell-check flag. Assembly is stateless and lock-free; the same request
//! against the same snapshot always yields an identical descriptor.
//!
//! The descriptor is consumed by an external search-engine client; nothing
//! here talks to the network.

pub mod assembler;
pub mod descriptor;
pub mod error;
pub mod facets;
pub mod query_params;
pub mod request;
pub mod sort;
pub mod suggest;

pub use assembler::assemble;
pub use descriptor::{
    DescriptorWarning, FacetFilter, FacetFragment, FacetKind, FacetLimitPolicy, QueryDescriptor,
    QueryMode,
};
pub use error::{QueryError, Result};
pub use request::{FacetSelection, SearchRequest};
pub use suggest::SuggestionGate;
