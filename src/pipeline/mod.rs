pub mod alerts;
pub mod normalize;
pub mod score;

use chrono::{DateTime, Utc};
use tracing::info;

use crate::constants::{DISPLAY_COLUMNS, RELEVANCE_SCORE};
use crate::domain::RecordTable;
use alerts::AlertReport;
use score::ScoringCriteria;

/// Everything one pipeline run hands back to the presentation layer.
#[derive(Debug)]
pub struct PipelineOutput {
    /// The table after normalization only, for raw display.
    pub normalized: RecordTable,
    /// The table after scoring, re-ordered by descending relevance.
    pub ranked: RecordTable,
    /// Deadline reminders for the ranked table, in table order.
    pub alerts: AlertReport,
}

/// Runs normalize → score → alert over one fully materialized table.
///
/// Each stage is a pure function of its input; the run owns its table and
/// nothing is shared or persisted between runs.
pub fn run_pipeline(
    table: RecordTable,
    criteria: &ScoringCriteria,
    now: DateTime<Utc>,
) -> PipelineOutput {
    let normalized = normalize::normalize(table);
    let ranked = score::score(normalized.clone(), criteria);
    let alerts = alerts::generate_alerts(&ranked, now);

    info!(
        records = ranked.len(),
        alerts = alerts.alerts.len(),
        alert_errors = alerts.errors.len(),
        "pipeline run complete"
    );

    PipelineOutput {
        normalized,
        ranked,
        alerts,
    }
}

/// The well-known columns to project for the ranked display: the subset of
/// the display vocabulary that exists somewhere in the table, in fixed
/// presentation order. `relevance_score` always qualifies since every
/// scored record carries one.
pub fn display_columns(table: &RecordTable) -> Vec<&'static str> {
    DISPLAY_COLUMNS
        .iter()
        .copied()
        .filter(|column| {
            *column == RELEVANCE_SCORE
                || table.iter().any(|record| record.fields.contains_key(*column))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FieldValue, GrantRecord};

    #[test]
    fn test_display_columns_projects_existing_fields_in_order() {
        let mut record = GrantRecord::new();
        record.insert("grant_name", FieldValue::Text("Youth Fund".to_string()));
        record.insert("funding_quantum", FieldValue::Number(5000.0));
        record.insert("contact_email", FieldValue::Text("x@example.org".to_string()));

        let columns = display_columns(&vec![record]);

        assert_eq!(columns, vec!["grant_name", "funding_quantum", "relevance_score"]);
    }
}
