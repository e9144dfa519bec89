//! Validation error types
//!
//! Everything here is a caller error: input was rejected before any request
//! reached the search cluster. Messages echo the offending value, so the echo
//! is HTML-escaped at display time to stay safe in any caller surface.

use thiserror::Error;

/// Result type alias for query construction.
pub type QueryResult<T> = std::result::Result<T, QueryError>;

/// Errors that reject caller input during query construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// The `search` parameter contained characters outside the supported set.
    #[error("search parameter contains unsupported characters: {}", escape_html(.value))]
    UnsupportedSearch {
        /// The rejected search string, verbatim.
        value: String,
    },

    /// The `sort` parameter contained characters outside the supported set.
    #[error("sort parameter contains unsupported characters: {}", escape_html(.value))]
    UnsupportedSort {
        /// The rejected sort expression, verbatim.
        value: String,
    },

    /// The `sort` parameter named a field whose mapping does not permit sorting.
    #[error("field {} is not sortable", escape_html(.field))]
    UnsortableField {
        /// The field extracted from the sort expression.
        field: String,
    },

    /// The `limit` parameter was not a positive integer within bounds.
    #[error("limit must be an integer between 1 and {max}, got: {}", escape_html(.value))]
    InvalidLimit {
        /// The rejected limit value, verbatim.
        value: String,
        /// The documented maximum.
        max: u32,
    },
}

impl QueryError {
    /// Returns the error type string (for JSON responses).
    #[must_use]
    pub const fn error_type(&self) -> &'static str {
        match self {
            Self::UnsupportedSearch { .. } => "UNSUPPORTED_SEARCH",
            Self::UnsupportedSort { .. } => "UNSUPPORTED_SORT",
            Self::UnsortableField { .. } => "UNSORTABLE_FIELD",
            Self::InvalidLimit { .. } => "INVALID_LIMIT",
        }
    }
}

/// Escape a string for safe inclusion in HTML-rendered error output.
#[must_use]
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(ch),
        }
    }
    out
}
