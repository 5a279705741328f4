/// Canonical field name constants to ensure consistency across the pipeline stages.
/// The normalizer rewrites incoming field names into this vocabulary.
pub const GRANT_NAME: &str = "grant_name";
pub const ISSUE_AREA: &str = "issue_area";
pub const FUNDING_QUANTUM: &str = "funding_quantum";
pub const APPLICATION_DUE_DATE: &str = "application_due_date";
pub const RELEVANCE_SCORE: &str = "relevance_score";

/// Columns projected for the ranked display, in presentation order.
pub const DISPLAY_COLUMNS: [&str; 5] = [
    GRANT_NAME,
    ISSUE_AREA,
    FUNDING_QUANTUM,
    APPLICATION_DUE_DATE,
    RELEVANCE_SCORE,
];

/// Inclusive lookahead horizon for deadline reminders, in days.
pub const DEADLINE_LOOKAHEAD_DAYS: i64 = 7;

/// Ceiling applied when no maximum funding criterion is configured.
pub const DEFAULT_MAX_FUNDING: f64 = 1_000_000.0;
