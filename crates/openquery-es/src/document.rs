//! Query document model
//!
//! [`QueryDocument`] is the structured output handed to the execution
//! collaborator. Its shape is the whole contract: exactly one query clause,
//! at most one aggregation, and an optional non-empty `search_after` cursor.
//! [`QueryDocument::body`] renders the Elasticsearch search body.

use serde_json::{Value, json};

/// Name both aggregation flavors render under; callers expose one count
/// endpoint.
pub const AGG_NAME: &str = "counts";

/// Buckets of a date histogram are formatted as `yyyyMMdd`.
pub const DATE_HISTOGRAM_FORMAT: &str = "yyyyMMdd";

/// The query clause: match-all or a free-text query string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryClause {
    /// Full collection scan semantics.
    MatchAll,
    /// Free-text query over an already validated and rewritten string.
    QueryString(String),
}

/// Aggregation clause for count requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Aggregation {
    /// Exact-value bucketing with headroom over the caller's limit.
    Terms {
        /// Field to bucket on.
        field: String,
        /// Bucket count to request from the engine.
        size: u32,
    },
    /// Calendar-day bucketing for date-typed fields.
    DateHistogram {
        /// Date field to bucket on.
        field: String,
    },
}

/// A fully constructed, validated search request document.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryDocument {
    /// The single query clause.
    pub query: QueryClause,
    /// At most one aggregation.
    pub agg: Option<Aggregation>,
    /// Ordered cursor values; non-empty when present.
    pub search_after: Option<Vec<Value>>,
}

impl QueryDocument {
    /// Render the Elasticsearch search body.
    #[must_use]
    pub fn body(&self) -> Value {
        let mut body = json!({
            "query": match &self.query {
                QueryClause::MatchAll => json!({ "match_all": {} }),
                QueryClause::QueryString(q) => json!({
                    "query_string": { "query": q }
                }),
            },
        });

        if let Some(agg) = &self.agg {
            body["aggregations"] = json!({ AGG_NAME: agg.clause() });
        }

        if let Some(values) = &self.search_after {
            body["search_after"] = json!(values);
        }

        body
    }
}

impl Aggregation {
    fn clause(&self) -> Value {
        match self {
            Self::Terms { field, size } => json!({
                "terms": { "field": field, "size": size }
            }),
            Self::DateHistogram { field } => json!({
                "date_histogram": {
                    "field": field,
                    "calendar_interval": "day",
                    "format": DATE_HISTOGRAM_FORMAT,
                    "min_doc_count": 1,
                    "order": { "_key": "asc" }
                }
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn match_all_body() {
        let doc = QueryDocument {
            query: QueryClause::MatchAll,
            agg: None,
            search_after: None,
        };
        assert_eq!(doc.body(), json!({ "query": { "match_all": {} } }));
    }

    #[test]
    fn query_string_body() {
        let doc = QueryDocument {
            query: QueryClause::QueryString("serious:1".into()),
            agg: None,
            search_after: None,
        };
        assert_eq!(
            doc.body(),
            json!({ "query": { "query_string": { "query": "serious:1" } } })
        );
    }

    #[test]
    fn terms_aggregation_body() {
        let doc = QueryDocument {
            query: QueryClause::MatchAll,
            agg: Some(Aggregation::Terms {
                field: "brand_name".into(),
                size: 1010,
            }),
            search_after: None,
        };
        let body = doc.body();
        assert_eq!(
            body["aggregations"]["counts"]["terms"],
            json!({ "field": "brand_name", "size": 1010 })
        );
    }

    #[test]
    fn date_histogram_body() {
        let doc = QueryDocument {
            query: QueryClause::MatchAll,
            agg: Some(Aggregation::DateHistogram {
                field: "report_date".into(),
            }),
            search_after: None,
        };
        let clause = &doc.body()["aggregations"]["counts"]["date_histogram"];
        assert_eq!(clause["calendar_interval"], "day");
        assert_eq!(clause["format"], "yyyyMMdd");
        assert_eq!(clause["min_doc_count"], 1);
        assert_eq!(clause["order"], json!({ "_key": "asc" }));
    }

    #[test]
    fn search_after_injected_in_order() {
        let doc = QueryDocument {
            query: QueryClause::MatchAll,
            agg: None,
            search_after: Some(vec![json!(20200101), json!("abc")]),
        };
        assert_eq!(doc.body()["search_after"], json!([20200101, "abc"]));
    }

    #[test]
    fn absent_clauses_leave_no_keys() {
        let doc = QueryDocument {
            query: QueryClause::MatchAll,
            agg: None,
            search_after: None,
        };
        let body = doc.body();
        assert!(body.get("aggregations").is_none());
        assert!(body.get("search_after").is_none());
    }
}
