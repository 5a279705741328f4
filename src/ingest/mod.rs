use std::path::Path;

use anyhow::Result;
use tracing::{info, warn};

use crate::domain::{FieldValue, GrantRecord};
use crate::error::GrantError;

/// A source of raw grant records, before any normalization.
pub trait GrantSource {
    /// Materialize the full batch of records for one pipeline run.
    fn load(&self) -> Result<Vec<GrantRecord>>;
}

/// Comma-separated text with a header row, e.g. the contents of an uploaded
/// grant CSV. Rows whose field count does not match the header are dropped
/// rather than aborting the whole load.
pub struct DelimitedTextSource {
    text: String,
}

impl DelimitedTextSource {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn from_path(path: impl AsRef<Path>) -> crate::error::Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(Self { text })
    }
}

/// Splits one CSV line into fields, honoring double-quote quoting with
/// doubled-quote escapes. Returns `None` for a line with unbalanced quotes.
fn split_row(line: &str) -> Option<Vec<String>> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    current.push('"');
                } else {
                    in_quotes = false;
                }
            }
            '"' => in_quotes = true,
            ',' if !in_quotes => {
                fields.push(current.trim().to_string());
                current = String::new();
            }
            _ => current.push(c),
        }
    }

    if in_quotes {
        return None;
    }
    fields.push(current.trim().to_string());
    Some(fields)
}

impl GrantSource for DelimitedTextSource {
    fn load(&self) -> Result<Vec<GrantRecord>> {
        let mut lines = self
            .text
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty());

        let header = match lines.next() {
            Some((_, line)) => line,
            None => {
                return Err(GrantError::EmptyInput("no header row".to_string()).into());
            }
        };
        let names = split_row(header)
            .ok_or_else(|| GrantError::EmptyInput("unreadable header row".to_string()))?;

        let mut records = Vec::new();
        let mut dropped = 0usize;
        for (line_no, line) in lines {
            let values = match split_row(line) {
                Some(values) if values.len() == names.len() => values,
                Some(values) => {
                    warn!(
                        row = line_no + 1,
                        got = values.len(),
                        expected = names.len(),
                        "dropping row with mismatched field count"
                    );
                    dropped += 1;
                    continue;
                }
                None => {
                    warn!(row = line_no + 1, "dropping row with unbalanced quotes");
                    dropped += 1;
                    continue;
                }
            };

            let mut record = GrantRecord::new();
            for (name, value) in names.iter().zip(values) {
                record.insert(name.clone(), FieldValue::Text(value));
            }
            records.push(record);
        }

        if records.is_empty() {
            return Err(GrantError::EmptyInput("header row but no data rows".to_string()).into());
        }

        info!(records = records.len(), dropped, "loaded delimited grant data");
        Ok(records)
    }
}

/// Placeholder source for free-form pasted grant text.
///
/// Real text extraction does not exist yet; this synthesizes a single
/// fixed-shape record carrying the pasted text as its description, so the
/// rest of the pipeline has something to work with.
pub struct PastedTextSource {
    text: String,
}

impl PastedTextSource {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl GrantSource for PastedTextSource {
    fn load(&self) -> Result<Vec<GrantRecord>> {
        let mut record = GrantRecord::new();
        record.insert("grant_name", FieldValue::Text("Active Citizen Grant".to_string()));
        record.insert("description", FieldValue::Text(self.text.clone()));
        record.insert("who_can_apply", FieldValue::Text("Anyone".to_string()));
        record.insert(
            "application_period",
            FieldValue::Text("All year round".to_string()),
        );
        record.insert("funding_cap", FieldValue::Number(20000.0));

        info!("synthesized placeholder record from pasted text");
        Ok(vec![record])
    }
}
