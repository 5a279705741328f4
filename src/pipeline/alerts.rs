use chrono::{DateTime, Utc};
use tracing::warn;

use crate::constants::{APPLICATION_DUE_DATE, DEADLINE_LOOKAHEAD_DAYS, GRANT_NAME};
use crate::domain::{FieldValue, RecordTable};
use crate::error::GrantError;

/// Outcome of one alerting pass: reminder lines in input order, plus
/// per-record errors for rows that fell inside the window but could not be
/// reported. One malformed record never suppresses alerts for the rest.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct AlertReport {
    pub alerts: Vec<String>,
    pub errors: Vec<String>,
}

impl AlertReport {
    pub fn is_empty(&self) -> bool {
        self.alerts.is_empty()
    }
}

/// Scans the table for due dates inside the inclusive 7-day lookahead
/// window, measured from `now`.
///
/// `days_left` is plain datetime subtraction: `num_days` truncates toward
/// zero, so a deadline that is later today (or earlier today) still counts
/// as 0 days, and partial-day effects near midnight shift the count by one
/// rather than being rounded away. Records without a valid due date are
/// silently skipped. Repeated runs over the same table and clock re-emit
/// the same alerts; nothing is remembered between passes.
pub fn generate_alerts(table: &RecordTable, now: DateTime<Utc>) -> AlertReport {
    let mut report = AlertReport::default();

    for (index, record) in table.iter().enumerate() {
        let due = match record.get(APPLICATION_DUE_DATE).and_then(FieldValue::as_date) {
            Some(due) => due,
            None => continue,
        };

        let days_left = due.signed_duration_since(now.naive_utc()).num_days();
        if !(0..=DEADLINE_LOOKAHEAD_DAYS).contains(&days_left) {
            continue;
        }

        match record.get(GRANT_NAME) {
            Some(name) if !name.is_missing() => {
                report.alerts.push(format!(
                    "Reminder: '{}' is due in {} day(s)!",
                    name.as_text_lossy(),
                    days_left
                ));
            }
            _ => {
                warn!(row = index, "record inside deadline window has no grant_name");
                report.errors.push(format!(
                    "record {} has an upcoming deadline: {}",
                    index,
                    GrantError::MissingField(GRANT_NAME.to_string())
                ));
            }
        }
    }

    report
}
