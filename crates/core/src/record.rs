//! Record model — opaque field→value rows as delivered by the backend, plus
//! helpers for date-shaped string fields.
//!
//! Records are caller-defined: beyond a unique identifier and the designated
//! search key, all fields are untyped JSON passed through unchanged. Date
//! reformatting is presentation-only; the stored value keeps its original
//! comparable form so filtering and sorting stay correct.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Field consulted first when deriving a record's identity.
pub const ID_FIELD: &str = "id";

/// Fallback identity field for rows that only carry a lead identifier.
pub const LEAD_ID_FIELD: &str = "leadId";

/// A single table row: an ordered field→value mapping.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_map(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Raw field lookup. `Null` counts as present here; use [`Record::field`]
    /// when null should read as absent.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Field lookup with `Null` normalized to `None`.
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.0.get(key).filter(|value| !value.is_null())
    }

    pub fn set(&mut self, key: impl Into<String>, value: Value) {
        self.0.insert(key.into(), value);
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    /// String projection of a field: strings verbatim, numbers and booleans
    /// via their display form, absent/null as the empty string.
    pub fn text(&self, key: &str) -> String {
        match self.field(key) {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            Some(Value::Bool(b)) => b.to_string(),
            Some(other) => other.to_string(),
            None => String::new(),
        }
    }

    /// Identity key used for selection tracking: the `id` field when present,
    /// otherwise the lead identifier. Identity is positional-independent so a
    /// selection survives re-sorting and pagination.
    pub fn identity(&self) -> String {
        let id = self.text(ID_FIELD);
        if !id.is_empty() {
            return id;
        }
        self.text(LEAD_ID_FIELD)
    }
}

impl FromIterator<(String, Value)> for Record {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

// ---------------------------------------------------------------------------
// Date-shaped strings
// ---------------------------------------------------------------------------

/// Parse the ISO `YYYY-MM-DD` prefix of a date-shaped string. Accepts bare
/// dates and datetime strings (`2024-05-01T10:30:00Z`); anything else is
/// `None`.
pub fn parse_date_prefix(s: &str) -> Option<NaiveDate> {
    let prefix = s.get(0..10)?;
    NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok()
}

/// Fixed display format for date-shaped strings: `DD-MM-YYYY`. Returns `None`
/// for values that do not carry an ISO date prefix.
pub fn format_date_display(s: &str) -> Option<String> {
    parse_date_prefix(s).map(|date| date.format("%d-%m-%Y").to_string())
}

/// Display value of a field: date-shaped strings are reformatted to
/// `DD-MM-YYYY`, everything else passes through [`Record::text`]. The record
/// itself is never mutated.
pub fn display_value(record: &Record, key: &str) -> String {
    let text = record.text(key);
    match format_date_display(&text) {
        Some(display) => display,
        None => text,
    }
}
