use serde::Deserialize;
use tracing::debug;

use crate::constants::{DEFAULT_MAX_FUNDING, FUNDING_QUANTUM, ISSUE_AREA};
use crate::domain::{FieldValue, RecordTable};

/// Filter criteria supplied by the presentation layer.
///
/// A funding bound of exactly 0 is indistinguishable from "not supplied" and
/// awards no point: the bounds are truthiness-checked, not presence-checked.
/// This quirk is deliberately reproduced from the original behavior rather
/// than replaced with `Option` bounds.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScoringCriteria {
    /// Free-text issue-area filter; empty or whitespace-only means no filter.
    pub issue_area: Option<String>,
    pub min_funding: f64,
    pub max_funding: f64,
}

impl Default for ScoringCriteria {
    fn default() -> Self {
        Self {
            issue_area: None,
            min_funding: 0.0,
            max_funding: DEFAULT_MAX_FUNDING,
        }
    }
}

impl ScoringCriteria {
    /// The issue-area needle, lower-cased, or `None` when the filter is
    /// empty/unset.
    fn issue_area_needle(&self) -> Option<String> {
        self.issue_area
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase)
    }

    /// Number of criteria that can award a point, the upper bound on any
    /// record's score.
    pub fn active_count(&self) -> u32 {
        let mut count = 0;
        if self.issue_area_needle().is_some() {
            count += 1;
        }
        if self.min_funding != 0.0 {
            count += 1;
        }
        if self.max_funding != 0.0 {
            count += 1;
        }
        count
    }
}

/// Recomputes every record's relevance score against the criteria, then
/// stable-sorts the table by descending score. Each active criterion awards
/// at most one point; ties keep their prior relative order.
pub fn score(mut table: RecordTable, criteria: &ScoringCriteria) -> RecordTable {
    let needle = criteria.issue_area_needle();

    for record in &mut table {
        record.relevance_score = 0;

        if let Some(ref needle) = needle {
            let haystack = record
                .get(ISSUE_AREA)
                .map(|v| v.as_text_lossy().to_lowercase())
                .unwrap_or_default();
            if haystack.contains(needle.as_str()) {
                record.relevance_score += 1;
            }
        }

        // Missing or unparseable funding behaves as 0 for both bounds.
        let funding = record
            .get(FUNDING_QUANTUM)
            .and_then(FieldValue::as_number)
            .unwrap_or(0.0);

        if criteria.min_funding != 0.0 && funding >= criteria.min_funding {
            record.relevance_score += 1;
        }
        if criteria.max_funding != 0.0 && funding <= criteria.max_funding {
            record.relevance_score += 1;
        }
    }

    debug!(records = table.len(), criteria = criteria.active_count(), "scored table");

    // Vec::sort_by is stable, so equal scores keep insertion order.
    table.sort_by(|a, b| b.relevance_score.cmp(&a.relevance_score));
    table
}
