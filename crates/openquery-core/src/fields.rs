//! Static field knowledge
//!
//! Two naming facts are known without consulting engine mappings:
//!
//! - [`DATE_FIELDS`] lists the date-typed fields across every record schema
//!   this service fronts. Matching is by suffix so nested paths such as
//!   `patient.patientdeathdate` resolve without a metadata round trip.
//! - Fields ending in `exact` are keyword sub-fields generated alongside
//!   their analyzed parents, and are always safe to sort on.

/// Date-typed fields across the served record schemas, regardless of what
/// the engine mapping reports. Immutable for the process lifetime.
pub const DATE_FIELDS: &[&str] = &[
    // adverse event reports
    "receivedate",
    "receiptdate",
    "transmissiondate",
    "patientdeathdate",
    "drugstartdate",
    "drugenddate",
    // product labeling
    "effective_time",
    // enforcement / recall records
    "recall_initiation_date",
    "center_classification_date",
    "report_date",
    "termination_date",
    // device reports and clearances
    "date_received",
    "date_of_event",
    "date_report",
    "decision_date",
    "expiration_date_of_device",
];

/// Whether `field` is date-typed by the static set (suffix match, so nested
/// paths qualify).
#[must_use]
pub fn is_date_field(field: &str) -> bool {
    DATE_FIELDS.iter().any(|d| field.ends_with(d))
}

/// Whether `field` names an exact keyword sub-field by convention.
#[must_use]
pub fn is_exact_field(field: &str) -> bool {
    field.ends_with("exact")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direct_date_field() {
        assert!(is_date_field("patientdeathdate"));
        assert!(is_date_field("report_date"));
    }

    #[test]
    fn nested_date_field_by_suffix() {
        assert!(is_date_field("patient.patientdeathdate"));
    }

    #[test]
    fn non_date_field() {
        assert!(!is_date_field("brand_name"));
        assert!(!is_date_field("patient.patientonsetage"));
    }

    #[test]
    fn exact_suffix() {
        assert!(is_exact_field("openfda.brand_name.exact"));
        assert!(is_exact_field("companynumb.exact"));
        assert!(!is_exact_field("brand_name"));
    }

    #[test]
    fn date_fields_are_unique() {
        use std::collections::HashSet;
        let set: HashSet<_> = DATE_FIELDS.iter().collect();
        assert_eq!(set.len(), DATE_FIELDS.len());
    }
}
