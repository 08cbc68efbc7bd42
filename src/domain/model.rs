use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// A single untyped field as delivered by the dataset endpoint.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Null,
    Number(f64),
    Text(String),
    /// Booleans, arrays and nested objects (e.g. `geolocation`).
    Other(serde_json::Value),
}

impl From<serde_json::Value> for FieldValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => FieldValue::Null,
            serde_json::Value::String(s) => FieldValue::Text(s),
            serde_json::Value::Number(n) => match n.as_f64() {
                Some(f) => FieldValue::Number(f),
                None => FieldValue::Other(serde_json::Value::Number(n)),
            },
            other => FieldValue::Other(other),
        }
    }
}

impl FieldValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

/// One source entry before cleaning. No schema is assumed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRecord {
    fields: HashMap<String, FieldValue>,
}

impl RawRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json_object(obj: serde_json::Map<String, serde_json::Value>) -> Self {
        Self {
            fields: obj
                .into_iter()
                .map(|(key, value)| (key, FieldValue::from(value)))
                .collect(),
        }
    }

    pub fn with(mut self, key: &str, value: FieldValue) -> Self {
        self.fields.insert(key.to_string(), value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeteoriteRow {
    pub name: String,
    /// Grams.
    pub mass: f64,
    pub year: i32,
}

/// Validated rows in input order. Read-only once built.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CleanedTable {
    rows: Vec<MeteoriteRow>,
}

impl CleanedTable {
    pub fn new(rows: Vec<MeteoriteRow>) -> Self {
        Self { rows }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> &[MeteoriteRow] {
        &self.rows
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MeteoriteRow> {
        self.rows.iter()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl<'a> IntoIterator for &'a CleanedTable {
    type Item = &'a MeteoriteRow;
    type IntoIter = std::slice::Iter<'a, MeteoriteRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub total_entries: usize,
    pub most_massive_name: String,
    pub most_massive_mass: f64,
    pub most_frequent_year: i32,
    pub most_frequent_count: usize,
}

impl fmt::Display for AnalysisResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Results:")?;
        writeln!(f, "Total Entries: {}", self.total_entries)?;
        writeln!(
            f,
            "Most Massive Meteorite: {} ({} grams)",
            self.most_massive_name, self.most_massive_mass
        )?;
        write!(
            f,
            "Most Frequent Year: {} ({} occurrences)",
            self.most_frequent_year, self.most_frequent_count
        )
    }
}
