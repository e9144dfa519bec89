//! Parameter model and input validation for openquery
//!
//! This crate holds the engine-independent half of query construction:
//! - [`QueryParams`] — the five recognized caller options, typed and immutable
//! - [`is_supported_query_string`] — character-class containment check, the
//!   sole injection defense for `search` and `sort` input
//! - [`rewrite_legacy_missing`] — rewrites the removed `_missing_:` operator
//!   into an equivalent negated-existence expression
//! - [`DATE_FIELDS`] — fields known to be date-typed without a mapping lookup
//! - [`QueryError`] — typed validation errors safe to echo to callers

#![forbid(unsafe_code)]

pub mod error;
pub mod fields;
pub mod params;
pub mod rewrite;
pub mod validate;

pub use error::{QueryError, QueryResult};
pub use fields::{DATE_FIELDS, is_date_field, is_exact_field};
pub use params::{DEFAULT_COUNT_LIMIT, MAX_COUNT_LIMIT, QueryParams};
pub use rewrite::rewrite_legacy_missing;
pub use validate::is_supported_query_string;
