//! Elasticsearch query construction for openquery
//!
//! The engine-facing half of query building:
//! - [`MappingLookup`] — the single capability required from the execution
//!   client: report a field's engine-side type within an index
//! - [`SortChecker`] / [`SortabilityCache`] — memoized, fail-closed field
//!   sortability decisions
//! - [`build_sort`] — sort-expression validation with the `,_id` tiebreaker
//! - [`QueryDocument`] / [`build_query`] — assembly of the final search body
//!   (free-text clause, count aggregations, pagination cursor)
//!
//! Construction either fully succeeds or returns a validation error; no
//! partial documents are ever produced.

#![forbid(unsafe_code)]

pub mod builder;
pub mod document;
pub mod mapping;
pub mod sort;
pub mod sortability;

pub use builder::{SearchPlan, TERMS_SIZE_HEADROOM, build_query, build_search_plan};
pub use document::{Aggregation, QueryClause, QueryDocument};
pub use mapping::{MappingError, MappingLookup, StaticMappingLookup};
pub use sort::{ID_TIEBREAKER, build_sort};
pub use sortability::{
    SORTABLE_TYPES, SortChecker, SortabilityCache, SortabilityCacheConfig, SortabilityMetrics,
};
