//! Query-document assembly
//!
//! [`build_query`] translates validated [`QueryParams`] into a
//! [`QueryDocument`]: match-all or a free-text clause, a terms or
//! date-histogram aggregation for count requests, and the pagination cursor.
//! Sortability is resolved separately ([`crate::sort::build_sort`]);
//! [`build_search_plan`] composes both for sort-bearing requests.

use serde_json::Value;

use openquery_core::{
    QueryError, QueryParams, QueryResult, is_date_field, is_supported_query_string,
    rewrite_legacy_missing,
};

use crate::document::{Aggregation, QueryClause, QueryDocument};
use crate::sort::build_sort;
use crate::sortability::SortChecker;

/// Extra buckets requested beyond the caller's `limit`.
///
/// Terms aggregations count approximately at large cardinalities and the
/// tail of the distribution degrades; the headroom lets callers truncate the
/// degenerate tail. Tuned against the documented maximum `limit`
/// ([`openquery_core::MAX_COUNT_LIMIT`]) — revisit if that maximum is raised.
pub const TERMS_SIZE_HEADROOM: u32 = 1000;

/// A query document paired with its validated sort expression.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchPlan {
    /// The request body to hand to the execution collaborator.
    pub document: QueryDocument,
    /// Normalized sort expression, tiebreaker included.
    pub sort: String,
}

/// Assemble the query document for `params`.
///
/// Synchronous: everything here is decided from the params and static field
/// knowledge. Either a complete document is returned or a validation error;
/// never a partial document.
pub fn build_query(params: &QueryParams) -> QueryResult<QueryDocument> {
    let query = match params.search.as_deref() {
        None => QueryClause::MatchAll,
        Some(search) => {
            if !is_supported_query_string(search) {
                return Err(QueryError::UnsupportedSearch {
                    value: search.to_owned(),
                });
            }
            QueryClause::QueryString(rewrite_legacy_missing(search).into_owned())
        }
    };

    let agg = params.count.as_deref().map(|count| {
        if is_date_field(count) {
            Aggregation::DateHistogram {
                field: count.to_owned(),
            }
        } else {
            Aggregation::Terms {
                field: count.to_owned(),
                size: params.effective_limit() + TERMS_SIZE_HEADROOM,
            }
        }
    });

    let search_after = params
        .search_after
        .as_deref()
        .map(parse_cursor)
        .filter(|values| !values.is_empty());

    Ok(QueryDocument {
        query,
        agg,
        search_after,
    })
}

/// Assemble the query document and the validated sort for one request.
pub async fn build_search_plan(
    checker: &SortChecker,
    params: &QueryParams,
    index: &str,
) -> QueryResult<SearchPlan> {
    let document = build_query(params)?;
    let sort = build_sort(checker, params, index).await?;
    Ok(SearchPlan { document, sort })
}

/// Parse a `;`-delimited `key=value` cursor into ordered scalar values.
///
/// Values keep parameter order. Integer-looking values become JSON numbers
/// (engine sort keys for numeric and date fields are numeric); everything
/// else stays a string. A token without `=` contributes the whole token.
fn parse_cursor(cursor: &str) -> Vec<Value> {
    cursor
        .split(';')
        .filter(|token| !token.is_empty())
        .map(|token| {
            let value = token.split_once('=').map_or(token, |(_, value)| value);
            value
                .parse::<i64>()
                .map_or_else(|_| Value::from(value), Value::from)
        })
        .collect()
}
