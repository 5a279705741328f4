use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use tracing::debug;

use crate::constants::{APPLICATION_DUE_DATE, FUNDING_QUANTUM};
use crate::domain::{FieldValue, GrantRecord, RecordTable};

/// Canonical form of a field name: trimmed, lower-cased, internal spaces
/// replaced with underscores.
pub fn canonical_field_name(name: &str) -> String {
    name.trim().to_lowercase().replace(' ', "_")
}

/// Best-effort parse of a due-date string. Formats are tried in order, most
/// specific first.
fn parse_due_date(text: &str) -> Option<NaiveDateTime> {
    let s = text.trim();
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.naive_utc())
        .or_else(|| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").ok())
        .or_else(|| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
        .or_else(|| {
            NaiveDate::parse_from_str(s, "%m/%d/%Y")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
        .or_else(|| {
            NaiveDate::parse_from_str(s, "%d-%m-%Y")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

fn coerce_due_date(value: FieldValue) -> FieldValue {
    match value {
        FieldValue::Date(_) => value,
        FieldValue::Text(ref s) => match parse_due_date(s) {
            Some(date) => FieldValue::Date(date),
            None => {
                debug!(value = %s, "due date did not parse, marking missing");
                FieldValue::Missing
            }
        },
        FieldValue::Number(_) | FieldValue::Missing => FieldValue::Missing,
    }
}

fn coerce_funding(value: FieldValue) -> FieldValue {
    match value {
        FieldValue::Number(_) => value,
        FieldValue::Text(ref s) => match s.trim().parse::<f64>() {
            Ok(amount) => FieldValue::Number(amount),
            Err(_) => {
                debug!(value = %s, "funding quantum did not parse, marking missing");
                FieldValue::Missing
            }
        },
        FieldValue::Date(_) | FieldValue::Missing => FieldValue::Missing,
    }
}

fn normalize_record(record: GrantRecord) -> GrantRecord {
    let mut fields = BTreeMap::new();
    for (name, value) in record.fields {
        // Canonical-name collisions resolve last-write-wins.
        fields.insert(canonical_field_name(&name), value);
    }

    if let Some(value) = fields.remove(APPLICATION_DUE_DATE) {
        fields.insert(APPLICATION_DUE_DATE.to_string(), coerce_due_date(value));
    }
    if let Some(value) = fields.remove(FUNDING_QUANTUM) {
        fields.insert(FUNDING_QUANTUM.to_string(), coerce_funding(value));
    }

    GrantRecord {
        fields,
        relevance_score: record.relevance_score,
    }
}

/// Rewrites every field name to canonical form and coerces the known
/// semantic fields to their types. All other fields pass through verbatim;
/// unparseable values become `Missing`, never an error.
pub fn normalize(table: RecordTable) -> RecordTable {
    table.into_iter().map(normalize_record).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn text(s: &str) -> FieldValue {
        FieldValue::Text(s.to_string())
    }

    #[test]
    fn test_field_names_are_canonicalized() {
        let mut record = GrantRecord::new();
        record.insert("  Grant Name ", text("Youth Fund"));
        record.insert("Issue Area", text("sport"));

        let normalized = normalize(vec![record]);

        assert!(normalized[0].get("grant_name").is_some());
        assert!(normalized[0].get("issue_area").is_some());
        assert!(normalized[0].get("Grant Name").is_none());
    }

    #[test]
    fn test_due_date_coercion() {
        let mut record = GrantRecord::new();
        record.insert("application_due_date", text("2026-09-01"));

        let normalized = normalize(vec![record]);

        let expected = NaiveDate::from_ymd_opt(2026, 9, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(
            normalized[0].get("application_due_date"),
            Some(&FieldValue::Date(expected))
        );
    }

    #[test]
    fn test_unparseable_date_becomes_missing() {
        let mut record = GrantRecord::new();
        record.insert("application_due_date", text("whenever"));

        let normalized = normalize(vec![record]);

        assert!(normalized[0].get("application_due_date").unwrap().is_missing());
    }

    #[test]
    fn test_unparseable_funding_becomes_missing() {
        let mut record = GrantRecord::new();
        record.insert("funding_quantum", text("N/A"));

        let normalized = normalize(vec![record]);

        assert!(normalized[0].get("funding_quantum").unwrap().is_missing());
    }

    #[test]
    fn test_funding_text_parses_to_number() {
        let mut record = GrantRecord::new();
        record.insert("Funding Quantum", text(" 5000 "));

        let normalized = normalize(vec![record]);

        assert_eq!(
            normalized[0].get("funding_quantum"),
            Some(&FieldValue::Number(5000.0))
        );
    }

    #[test]
    fn test_extra_fields_pass_through_verbatim() {
        let mut record = GrantRecord::new();
        record.insert("Contact Email", text("grants@example.org"));

        let normalized = normalize(vec![record]);

        assert_eq!(
            normalized[0].get("contact_email"),
            Some(&text("grants@example.org"))
        );
    }

    #[test]
    fn test_normalization_is_idempotent() {
        let mut record = GrantRecord::new();
        record.insert("Grant Name", text("Youth Fund"));
        record.insert("application_due_date", text("2026-09-01"));
        record.insert("funding_quantum", text("5000"));
        record.insert("funding notes", text("n/a"));

        let once = normalize(vec![record]);
        let twice = normalize(once.clone());

        assert_eq!(once, twice);
    }
}
