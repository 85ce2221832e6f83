// File: crates/trend-core/src/record.rs
// Summary: Wide-format raw records (one row per county, one column per year) and record sets.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::error::{ChartError, Result};

/// Raw cell as it appeared in the source document.
#[derive(Clone, Debug, PartialEq)]
pub enum Cell {
    Number(f64),
    Text(String),
    Bool(bool),
    Null,
}

impl Cell {
    /// Lenient numeric coercion: anything that is not a finite number becomes 0.
    pub fn coerce(&self) -> f64 {
        let v = match self {
            Cell::Number(n) => *n,
            Cell::Text(s) => {
                let s = s.trim();
                if s.is_empty() { 0.0 } else { s.parse::<f64>().unwrap_or(0.0) }
            }
            Cell::Bool(b) => if *b { 1.0 } else { 0.0 },
            Cell::Null => 0.0,
        };
        if v.is_finite() { v } else { 0.0 }
    }
}

impl From<Value> for Cell {
    fn from(v: Value) -> Self {
        match v {
            Value::Number(n) => n.as_f64().map(Cell::Number).unwrap_or(Cell::Null),
            Value::String(s) => Cell::Text(s),
            Value::Bool(b) => Cell::Bool(b),
            // arrays and objects have no sensible numeric reading
            _ => Cell::Null,
        }
    }
}

impl From<f64> for Cell {
    fn from(v: f64) -> Self { Cell::Number(v) }
}

impl From<&str> for Cell {
    fn from(v: &str) -> Self { Cell::Text(v.to_string()) }
}

/// One source row: the category identity plus every other column.
#[derive(Clone, Debug, PartialEq)]
pub struct RawRecord {
    pub category: String,
    pub columns: BTreeMap<String, Cell>,
}

impl RawRecord {
    pub fn new(category: impl Into<String>) -> Self {
        Self { category: category.into(), columns: BTreeMap::new() }
    }

    pub fn with_column(mut self, name: impl Into<String>, cell: impl Into<Cell>) -> Self {
        self.columns.insert(name.into(), cell.into());
        self
    }

    /// Build from a decoded JSON object, pulling `category_field` out as the identity.
    pub fn from_json(index: usize, value: Value, category_field: &str) -> Result<Self> {
        let Value::Object(map) = value else {
            return Err(ChartError::NotAnObject { index });
        };
        let mut category = None;
        let mut columns = BTreeMap::new();
        for (key, v) in map {
            if key == category_field {
                category = match v {
                    Value::String(s) => Some(s),
                    Value::Number(n) => Some(n.to_string()),
                    _ => None,
                };
            } else {
                columns.insert(key, Cell::from(v));
            }
        }
        let category = category.ok_or_else(|| ChartError::MissingCategory {
            index,
            field: category_field.to_string(),
        })?;
        Ok(Self { category, columns })
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    /// Coerced value of `column`; missing columns read as 0.
    pub fn value(&self, column: &str) -> f64 {
        self.columns.get(column).map(Cell::coerce).unwrap_or(0.0)
    }
}

/// Ordered, immutable collection of raw records.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RecordSet {
    records: Vec<RawRecord>,
}

impl RecordSet {
    pub fn new(records: Vec<RawRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize { self.records.len() }
    pub fn is_empty(&self) -> bool { self.records.is_empty() }
    pub fn iter(&self) -> std::slice::Iter<'_, RawRecord> { self.records.iter() }
    pub fn first(&self) -> Option<&RawRecord> { self.records.first() }

    /// Distinct categories, first-seen order.
    pub fn categories(&self) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        for r in &self.records {
            if !out.iter().any(|c| c == &r.category) {
                out.push(r.category.clone());
            }
        }
        out
    }

    /// First record whose category equals `category`.
    pub fn find(&self, category: &str) -> Option<&RawRecord> {
        self.records.iter().find(|r| r.category == category)
    }

    /// Derived subset of records satisfying `keep`.
    pub fn subset(&self, mut keep: impl FnMut(&RawRecord) -> bool) -> RecordSet {
        RecordSet { records: self.records.iter().filter(|r| keep(r)).cloned().collect() }
    }

    /// True when every record carries the same column names as the first one.
    pub fn has_uniform_columns(&self) -> bool {
        let Some(first) = self.records.first() else { return true };
        self.records
            .iter()
            .all(|r| r.columns.len() == first.columns.len() && r.column_names().eq(first.column_names()))
    }
}

impl<'a> IntoIterator for &'a RecordSet {
    type Item = &'a RawRecord;
    type IntoIter = std::slice::Iter<'a, RawRecord>;
    fn into_iter(self) -> Self::IntoIter { self.records.iter() }
}
