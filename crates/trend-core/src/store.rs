// File: crates/trend-core/src/store.rs
// Summary: Dataset sources (file / HTTP, JSON / CSV) and the immutable record store.

use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;

use serde_json::Value;
use tracing::{error, info, warn};

use crate::config::ChartConfig;
use crate::error::{ChartError, Result};
use crate::record::{Cell, RawRecord, RecordSet};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DatasetFormat {
    /// `{ "<records_field>": [ {..}, .. ] }`
    Json,
    /// Wide CSV with a header row.
    Csv,
}

impl DatasetFormat {
    /// CSV for `.csv` locations (query strings ignored), JSON otherwise.
    pub fn from_location(location: &str) -> Self {
        let path = location.split(['?', '#']).next().unwrap_or(location);
        if path.to_ascii_lowercase().ends_with(".csv") { DatasetFormat::Csv } else { DatasetFormat::Json }
    }
}

/// Decodes fetched bytes into a record set.
#[derive(Clone, Debug)]
pub struct DatasetCodec {
    pub format: DatasetFormat,
    pub records_field: String,
    pub category_field: String,
}

impl DatasetCodec {
    pub fn new(format: DatasetFormat, cfg: &ChartConfig) -> Self {
        Self {
            format,
            records_field: cfg.records_field.clone(),
            category_field: cfg.category_field.clone(),
        }
    }

    pub fn decode(&self, bytes: &[u8]) -> Result<RecordSet> {
        let set = match self.format {
            DatasetFormat::Json => self.decode_json(bytes)?,
            DatasetFormat::Csv => self.decode_csv(bytes)?,
        };
        if !set.has_uniform_columns() {
            warn!(records = set.len(), "records do not share one column set");
        }
        Ok(set)
    }

    fn decode_json(&self, bytes: &[u8]) -> Result<RecordSet> {
        let mut doc: Value = serde_json::from_slice(bytes)?;
        let missing = || ChartError::MissingRecordsField { field: self.records_field.clone() };
        let Value::Array(items) = doc.get_mut(&self.records_field).map(Value::take).ok_or_else(missing)? else {
            return Err(missing());
        };
        let records = items
            .into_iter()
            .enumerate()
            .map(|(i, v)| RawRecord::from_json(i, v, &self.category_field))
            .collect::<Result<Vec<_>>>()?;
        Ok(RecordSet::new(records))
    }

    fn decode_csv(&self, bytes: &[u8]) -> Result<RecordSet> {
        let mut rdr = csv::ReaderBuilder::new().has_headers(true).from_reader(bytes);
        let headers = rdr.headers()?.iter().map(|h| h.trim().to_string()).collect::<Vec<_>>();
        let cat_idx = headers
            .iter()
            .position(|h| h == &self.category_field)
            .ok_or_else(|| ChartError::MissingCategory { index: 0, field: self.category_field.clone() })?;

        let mut records = Vec::new();
        for (i, row) in rdr.records().enumerate() {
            let row = row?;
            let category = row
                .get(cat_idx)
                .ok_or_else(|| ChartError::MissingCategory { index: i, field: self.category_field.clone() })?;
            let mut record = RawRecord::new(category.trim());
            for (j, name) in headers.iter().enumerate() {
                if j == cat_idx {
                    continue;
                }
                let cell = row.get(j).map(Cell::from).unwrap_or(Cell::Null);
                record.columns.insert(name.clone(), cell);
            }
            records.push(record);
        }
        Ok(RecordSet::new(records))
    }
}

/// External fetch of the raw records.
pub trait RecordSource {
    /// Human-readable location used in diagnostics.
    fn location(&self) -> &str;
    fn fetch(&self) -> impl Future<Output = Result<RecordSet>> + Send;
}

pub struct FileSource {
    path: PathBuf,
    location: String,
    codec: DatasetCodec,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>, codec: DatasetCodec) -> Self {
        let path = path.into();
        let location = path.display().to_string();
        Self { path, location, codec }
    }
}

impl RecordSource for FileSource {
    fn location(&self) -> &str { &self.location }

    async fn fetch(&self) -> Result<RecordSet> {
        let bytes = tokio::fs::read(&self.path).await?;
        self.codec.decode(&bytes)
    }
}

pub struct HttpSource {
    client: reqwest::Client,
    url: String,
    codec: DatasetCodec,
}

impl HttpSource {
    pub fn new(client: reqwest::Client, url: impl Into<String>, codec: DatasetCodec) -> Self {
        Self { client, url: url.into(), codec }
    }
}

impl RecordSource for HttpSource {
    fn location(&self) -> &str { &self.url }

    async fn fetch(&self) -> Result<RecordSet> {
        let resp = self.client.get(&self.url).send().await?.error_for_status()?;
        let bytes = resp.bytes().await?;
        self.codec.decode(&bytes)
    }
}

/// File or HTTP source chosen from a location string.
pub enum DatasetSource {
    File(FileSource),
    Http(HttpSource),
}

impl DatasetSource {
    pub fn from_config(cfg: &ChartConfig) -> Self {
        let location = cfg.dataset.as_str();
        let codec = DatasetCodec::new(DatasetFormat::from_location(location), cfg);
        if location.starts_with("http://") || location.starts_with("https://") {
            DatasetSource::Http(HttpSource::new(reqwest::Client::new(), location, codec))
        } else {
            DatasetSource::File(FileSource::new(location, codec))
        }
    }
}

impl RecordSource for DatasetSource {
    fn location(&self) -> &str {
        match self {
            DatasetSource::File(s) => s.location(),
            DatasetSource::Http(s) => s.location(),
        }
    }

    async fn fetch(&self) -> Result<RecordSet> {
        match self {
            DatasetSource::File(s) => s.fetch().await,
            DatasetSource::Http(s) => s.fetch().await,
        }
    }
}

/// Canonical record set, shared read-only once loaded.
#[derive(Clone, Debug)]
pub struct RecordStore {
    records: Arc<RecordSet>,
}

impl RecordStore {
    pub fn from_records(records: RecordSet) -> Self {
        Self { records: Arc::new(records) }
    }

    /// Fetch once; failures surface as `ChartError::Load`, never retried.
    pub async fn load<S: RecordSource>(source: &S) -> Result<Self> {
        match source.fetch().await {
            Ok(records) => {
                info!(location = source.location(), records = records.len(), "loaded dataset");
                Ok(Self::from_records(records))
            }
            Err(e) => {
                error!(location = source.location(), error = %e, "dataset load failed");
                Err(ChartError::load(source.location(), e))
            }
        }
    }

    pub fn records(&self) -> &Arc<RecordSet> {
        &self.records
    }
}
