// File: crates/trend-core/src/series.rs
// Summary: Series model and the wide-record → per-county time series transform.

use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;
use tracing::debug;

use crate::record::{RawRecord, RecordSet};

/// Column marker for value columns, e.g. `Percentage (2014)`.
pub const DEFAULT_VALUE_MARKER: &str = "Percentage";

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimePoint {
    /// January 1st of the sample year.
    pub year: NaiveDate,
    pub value: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Series {
    pub name: String,
    /// Ascending by year.
    pub values: Vec<TimePoint>,
}

impl Series {
    pub fn with_data(name: impl Into<String>, mut values: Vec<TimePoint>) -> Self {
        values.sort_by_key(|p| p.year);
        Self { name: name.into(), values }
    }

    pub fn years(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.values.iter().map(|p| p.year)
    }

    /// (first, last) year, or None when the series has no points.
    pub fn year_extent(&self) -> Option<(NaiveDate, NaiveDate)> {
        Some((self.values.first()?.year, self.values.last()?.year))
    }

    pub fn max_value(&self) -> Option<f64> {
        self.values.iter().map(|p| p.value).reduce(f64::max)
    }
}

fn year_tag() -> &'static Regex {
    static TAG: OnceLock<Regex> = OnceLock::new();
    TAG.get_or_init(|| Regex::new(r"\((\d{4})\)").expect("year tag pattern is valid"))
}

/// Parse a 4-digit token into January 1st of that year.
pub fn parse_year(token: &str) -> Option<NaiveDate> {
    if token.len() != 4 || !token.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let year: i32 = token.parse().ok()?;
    NaiveDate::from_ymd_opt(year, 1, 1)
}

/// Turns wide records into one time series per category.
#[derive(Clone, Debug)]
pub struct SeriesTransformer {
    marker: String,
}

impl Default for SeriesTransformer {
    fn default() -> Self { Self::new(DEFAULT_VALUE_MARKER) }
}

impl SeriesTransformer {
    pub fn new(marker: impl Into<String>) -> Self {
        Self { marker: marker.into() }
    }

    /// Year-tagged value columns of `record` as (token, column name).
    pub fn year_columns<'r>(&self, record: &'r RawRecord) -> Vec<(&'r str, &'r str)> {
        record
            .column_names()
            .filter(|name| name.contains(self.marker.as_str()))
            .filter_map(|name| {
                let token = year_tag().captures(name)?.get(1)?.as_str();
                Some((token, name))
            })
            .collect()
    }

    /// One series per distinct category, points sorted by year.
    ///
    /// Columns are read from the first record; each category takes its values
    /// from the first record carrying that category.
    pub fn transform(&self, records: &RecordSet) -> Vec<Series> {
        let Some(representative) = records.first() else {
            return Vec::new();
        };
        let columns: Vec<(NaiveDate, &str)> = self
            .year_columns(representative)
            .into_iter()
            .filter_map(|(token, name)| Some((parse_year(token)?, name)))
            .collect();

        let out: Vec<Series> = records
            .categories()
            .into_iter()
            .map(|name| {
                let source = records.find(&name);
                let values = columns
                    .iter()
                    .map(|&(year, column)| TimePoint {
                        year,
                        value: source.map(|r| r.value(column)).unwrap_or(0.0),
                    })
                    .collect();
                Series::with_data(name, values)
            })
            .collect();
        debug!(records = records.len(), series = out.len(), columns = columns.len(), "transformed records");
        out
    }

    /// Sorted, distinct year tokens of the value columns.
    pub fn year_tokens(&self, records: &RecordSet) -> Vec<String> {
        let Some(first) = records.first() else { return Vec::new() };
        let mut tokens: Vec<String> = self
            .year_columns(first)
            .into_iter()
            .map(|(token, _)| token.to_string())
            .collect();
        tokens.sort();
        tokens.dedup();
        tokens
    }
}
