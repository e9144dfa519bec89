//! Caller query parameters
//!
//! [`QueryParams`] enumerates the five recognized options with explicit
//! optionality and types. Instances are read-only once constructed: the
//! builders downstream read params and produce a new query document, never
//! writing back into the input.

use serde::{Deserialize, Serialize};

use crate::error::{QueryError, QueryResult};

/// Documented maximum for the `limit` parameter.
///
/// The terms-aggregation headroom in the query builder is tuned against this
/// value; raising it requires revisiting that headroom.
pub const MAX_COUNT_LIMIT: u32 = 1000;

/// Aggregation size used when the caller supplies no `limit`.
pub const DEFAULT_COUNT_LIMIT: u32 = 100;

/// The recognized query parameters of a single request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryParams {
    /// Free-text query string.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    /// Field name to aggregate on; selects count mode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<String>,
    /// Sort expression, `field[:asc|desc]`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
    /// Positive integer bounding aggregation size.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    /// Opaque `;`-delimited `key=value` pagination cursor.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_after: Option<String>,
}

impl QueryParams {
    /// Create empty params (match-all semantics downstream).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the free-text search string.
    #[must_use]
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    /// Set the count (aggregation) field.
    #[must_use]
    pub fn with_count(mut self, count: impl Into<String>) -> Self {
        self.count = Some(count.into());
        self
    }

    /// Set the sort expression.
    #[must_use]
    pub fn with_sort(mut self, sort: impl Into<String>) -> Self {
        self.sort = Some(sort.into());
        self
    }

    /// Set the aggregation limit.
    #[must_use]
    pub const fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Set the pagination cursor.
    #[must_use]
    pub fn with_search_after(mut self, cursor: impl Into<String>) -> Self {
        self.search_after = Some(cursor.into());
        self
    }

    /// The effective aggregation limit: the caller's `limit` clamped to
    /// [`MAX_COUNT_LIMIT`], defaulting to [`DEFAULT_COUNT_LIMIT`].
    ///
    /// `from_pairs` already rejects out-of-range values at the boundary;
    /// the clamp keeps programmatically constructed params within the
    /// documented maximum as well, so downstream size arithmetic cannot
    /// overflow.
    #[must_use]
    pub const fn effective_limit(&self) -> u32 {
        match self.limit {
            Some(limit) if limit > MAX_COUNT_LIMIT => MAX_COUNT_LIMIT,
            Some(limit) => limit,
            None => DEFAULT_COUNT_LIMIT,
        }
    }

    /// Parse raw HTTP key/value pairs into typed params.
    ///
    /// Recognizes exactly the five documented keys; everything else (api
    /// keys, pretty-printing flags, other transport concerns) is ignored.
    /// `limit` must be an integer in `1..=MAX_COUNT_LIMIT`.
    pub fn from_pairs<'a, I>(pairs: I) -> QueryResult<Self>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut params = Self::default();
        for (key, value) in pairs {
            match key {
                "search" => params.search = Some(value.to_owned()),
                "count" => params.count = Some(value.to_owned()),
                "sort" => params.sort = Some(value.to_owned()),
                "search_after" => params.search_after = Some(value.to_owned()),
                "limit" => params.limit = Some(parse_limit(value)?),
                _ => {}
            }
        }
        Ok(params)
    }
}

fn parse_limit(value: &str) -> QueryResult<u32> {
    match value.trim().parse::<u32>() {
        Ok(n) if (1..=MAX_COUNT_LIMIT).contains(&n) => Ok(n),
        _ => Err(QueryError::InvalidLimit {
            value: value.to_owned(),
            max: MAX_COUNT_LIMIT,
        }),
    }
}
