//! Sort-expression validation and normalization
//!
//! A caller-supplied sort expression is `field[:asc|desc]`. The field must
//! be provably sortable before it is allowed anywhere near the engine:
//! `exact` sub-fields and statically known date fields qualify outright,
//! everything else goes through the async [`SortChecker`]. Successful sorts
//! carry a `,_id` tiebreaker so ties on the primary key are broken by
//! document identifier and `search_after` cursors never skip or repeat
//! documents.

use openquery_core::{
    QueryError, QueryParams, QueryResult, is_date_field, is_exact_field,
    is_supported_query_string,
};

use crate::sortability::SortChecker;

/// The document identifier field, a total order on its own.
pub const ID_TIEBREAKER: &str = "_id";

/// Validate and normalize the sort expression in `params` for `index`.
///
/// With no `sort` param, returns the default identifier order, which keeps
/// pagination deterministic even for unsorted requests. The default is
/// returned as-is, without the `,_id` tiebreaker the legacy behavior would
/// append: `_id` is already a total order, and `_id,_id` would sort by the
/// identifier twice.
pub async fn build_sort(
    checker: &SortChecker,
    params: &QueryParams,
    index: &str,
) -> QueryResult<String> {
    let Some(raw) = params.sort.as_deref() else {
        return Ok(ID_TIEBREAKER.to_owned());
    };

    let sort = raw.trim();
    if !is_supported_query_string(sort) {
        return Err(QueryError::UnsupportedSort {
            value: sort.to_owned(),
        });
    }

    let field = sort.split_once(':').map_or(sort, |(field, _)| field);
    let sortable = is_exact_field(field)
        || is_date_field(field)
        || checker.is_sortable_field(index, field).await;
    if !sortable {
        return Err(QueryError::UnsortableField {
            field: field.to_owned(),
        });
    }

    Ok(format!("{sort},{ID_TIEBREAKER}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::StaticMappingLookup;
    use std::sync::Arc;

    fn checker(lookup: StaticMappingLookup) -> SortChecker {
        SortChecker::new(Arc::new(lookup))
    }

    #[tokio::test]
    async fn default_sort_is_identifier() {
        let sort = build_sort(&checker(StaticMappingLookup::new()), &QueryParams::new(), "x")
            .await
            .unwrap();
        assert_eq!(sort, "_id");
    }

    #[tokio::test]
    async fn date_field_short_circuits_without_lookup() {
        // Empty lookup table: any mapping consultation would fail closed.
        let params = QueryParams::new().with_sort("patientdeathdate:desc");
        let sort = build_sort(&checker(StaticMappingLookup::new()), &params, "drugevent")
            .await
            .unwrap();
        assert_eq!(sort, "patientdeathdate:desc,_id");
    }

    #[tokio::test]
    async fn exact_suffix_short_circuits() {
        let params = QueryParams::new().with_sort("openfda.brand_name.exact:asc");
        let sort = build_sort(&checker(StaticMappingLookup::new()), &params, "druglabel")
            .await
            .unwrap();
        assert_eq!(sort, "openfda.brand_name.exact:asc,_id");
    }

    #[tokio::test]
    async fn keyword_field_passes_via_mapping() {
        let lookup = StaticMappingLookup::new().with_field("drugevent", "companynumb", "keyword");
        let params = QueryParams::new().with_sort("companynumb:asc");
        let sort = build_sort(&checker(lookup), &params, "drugevent")
            .await
            .unwrap();
        assert_eq!(sort, "companynumb:asc,_id");
    }

    #[tokio::test]
    async fn text_field_rejected() {
        let lookup = StaticMappingLookup::new().with_field("drugevent", "reporttype", "text");
        let params = QueryParams::new().with_sort("reporttype:desc");
        let err = build_sort(&checker(lookup), &params, "drugevent")
            .await
            .unwrap_err();
        assert_eq!(
            err,
            QueryError::UnsortableField {
                field: "reporttype".to_owned()
            }
        );
    }

    #[tokio::test]
    async fn unsupported_characters_rejected_before_lookup() {
        let params = QueryParams::new().with_sort("receivedate:desc;drop");
        let err = build_sort(&checker(StaticMappingLookup::new()), &params, "drugevent")
            .await
            .unwrap_err();
        assert!(matches!(err, QueryError::UnsupportedSort { .. }));
    }

    #[tokio::test]
    async fn sort_expression_is_trimmed() {
        let params = QueryParams::new().with_sort("  receivedate:asc  ");
        let sort = build_sort(&checker(StaticMappingLookup::new()), &params, "drugevent")
            .await
            .unwrap();
        assert_eq!(sort, "receivedate:asc,_id");
    }

    #[tokio::test]
    async fn bare_field_without_direction() {
        let params = QueryParams::new().with_sort("receivedate");
        let sort = build_sort(&checker(StaticMappingLookup::new()), &params, "drugevent")
            .await
            .unwrap();
        assert_eq!(sort, "receivedate,_id");
    }
}
