use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A single field value carried by a grant record.
///
/// `Missing` is the explicit no-value marker: the field exists but carries
/// nothing usable (unparseable date, non-numeric funding amount, JSON null).
/// It is distinct from the key being absent, from `Text("")`, and from
/// `Number(0.0)`, so downstream stages can stay total functions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum FieldValue {
    Text(String),
    Number(f64),
    Date(NaiveDateTime),
    Missing,
}

impl FieldValue {
    /// Renders any variant as display text. `Missing` renders as the empty
    /// string, which is also how the scorer treats absent issue areas.
    pub fn as_text_lossy(&self) -> String {
        match self {
            FieldValue::Text(s) => s.clone(),
            FieldValue::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => {
                format!("{}", *n as i64)
            }
            FieldValue::Number(n) => n.to_string(),
            FieldValue::Date(d) => d.format("%Y-%m-%d %H:%M:%S").to_string(),
            FieldValue::Missing => String::new(),
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDateTime> {
        match self {
            FieldValue::Date(d) => Some(*d),
            _ => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, FieldValue::Missing)
    }

    /// Converts one cell of a decoded JSON row into a field value.
    /// Structured JSON (arrays, objects, booleans) is kept as its text form
    /// since the pipeline only ever inspects such fields as text.
    pub fn from_json(value: &serde_json::Value) -> FieldValue {
        match value {
            serde_json::Value::Null => FieldValue::Missing,
            serde_json::Value::String(s) => FieldValue::Text(s.clone()),
            serde_json::Value::Number(n) => match n.as_f64() {
                Some(f) => FieldValue::Number(f),
                None => FieldValue::Text(n.to_string()),
            },
            other => FieldValue::Text(other.to_string()),
        }
    }
}

/// One candidate grant: an open mapping from field name to value, plus the
/// derived relevance score.
///
/// The mapping is deliberately open so that arbitrary extra columns in the
/// source data pass through the pipeline untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GrantRecord {
    pub fields: BTreeMap<String, FieldValue>,
    /// Derived data: reset to 0 and recomputed in full on every scoring pass.
    #[serde(default)]
    pub relevance_score: u32,
}

impl GrantRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a raw record from a decoded JSON object row. Non-object rows
    /// yield `None` and are expected to be dropped by the caller.
    pub fn from_json_object(row: &serde_json::Value) -> Option<Self> {
        let object = row.as_object()?;
        let mut record = GrantRecord::new();
        for (name, value) in object {
            record.fields.insert(name.clone(), FieldValue::from_json(value));
        }
        Some(record)
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    pub fn insert(&mut self, name: impl Into<String>, value: FieldValue) {
        self.fields.insert(name.into(), value);
    }
}

/// An ordered batch of grant records. Insertion order holds until the scorer
/// re-sorts by descending relevance.
pub type RecordTable = Vec<GrantRecord>;
