//! Legacy `_missing_:` operator rewriting
//!
//! Older engine versions supported `_missing_:field` natively; newer ones
//! removed it, while the public API contract still accepts it. Each
//! occurrence is rewritten to the equivalent `(NOT (_exists_:field))`
//! expression, quoted field paths included. Tokens that are not followed by
//! a field path in the expected shape pass through untouched.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

/// `_missing_:` followed by a bare or quoted field path.
static LEGACY_MISSING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"_missing_:("[A-Za-z0-9_.]+"|[A-Za-z0-9_.]+)"#).expect("legacy missing regex")
});

/// Rewrite every well-formed `_missing_:field` clause in `query` to
/// `(NOT (_exists_:field))`, preserving all other text unchanged.
#[must_use]
pub fn rewrite_legacy_missing(query: &str) -> Cow<'_, str> {
    LEGACY_MISSING.replace_all(query, "(NOT (_exists_:$1))")
}
