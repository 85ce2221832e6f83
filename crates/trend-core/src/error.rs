// File: crates/trend-core/src/error.rs
// Summary: Error taxonomy shared by loading, scaling and filtering.

use thiserror::Error;

pub type Result<T, E = ChartError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum ChartError {
    /// Dataset could not be fetched or decoded.
    #[error("failed to load dataset from {location}")]
    Load {
        location: String,
        #[source]
        source: Box<ChartError>,
    },
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("invalid JSON dataset: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid CSV dataset: {0}")]
    Csv(#[from] csv::Error),
    #[error("dataset has no top-level array field `{field}`")]
    MissingRecordsField { field: String },
    #[error("record #{index} has no `{field}` field")]
    MissingCategory { index: usize, field: String },
    #[error("record #{index} is not an object")]
    NotAnObject { index: usize },
    /// Year token did not parse into a one-year window.
    #[error("invalid year selection `{token}`")]
    InvalidYearSelection { token: String },
    /// No points to derive a domain from.
    #[error("no data points to derive a chart domain from")]
    EmptyDomain,
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_yaml::Error),
}

impl ChartError {
    pub(crate) fn load(location: impl Into<String>, source: ChartError) -> Self {
        ChartError::Load { location: location.into(), source: Box::new(source) }
    }
}
