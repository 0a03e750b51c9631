// Core structs: AssetRecord, Snapshot, AnalysisSummary and the per-stage errors
use chrono::{DateTime, Utc};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq)]
pub struct AssetRecord {
    pub name: String,
    pub symbol: String,
    pub price_usd: f64,
    pub market_cap_usd: f64,
    pub volume_24h_usd: f64,
    pub price_change_24h_pct: Option<f64>,
}

/// All records retrieved in one cycle, in the order the provider returned them.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub records: Vec<AssetRecord>,
    pub fetched_at: DateTime<Utc>,
}

impl Snapshot {
    pub fn new(records: Vec<AssetRecord>, fetched_at: DateTime<Utc>) -> Self {
        Self { records, fetched_at }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MarketCapEntry {
    pub name: String,
    pub market_cap_usd: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChangeEntry {
    pub name: String,
    pub change_pct: f64,
}

#[derive(Debug, Clone)]
pub struct AnalysisSummary {
    pub average_price: f64,
    pub top_by_market_cap: Vec<MarketCapEntry>,
    pub max_change: Option<ChangeEntry>,
    pub min_change: Option<ChangeEntry>,
    pub asset_count: usize,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("market data endpoint responded with status {0}")]
    Status(reqwest::StatusCode),
    #[error("malformed market data response: {0}")]
    Decode(String),
}

#[derive(Debug, Error, PartialEq)]
pub enum TransformError {
    #[error("record {index}: missing field `{field}`")]
    MissingField { index: usize, field: &'static str },
    #[error("record {index}: field `{field}` has an unexpected type or is null")]
    InvalidField { index: usize, field: &'static str },
    #[error("record {index}: expected a JSON object")]
    NotAnObject { index: usize },
}

#[derive(Debug, Error, PartialEq)]
pub enum AnalysisError {
    #[error("snapshot contains no records to analyze")]
    EmptyInput,
}

#[derive(Debug, Error)]
pub enum WriteError {
    #[error("file system error: {0}")]
    Io(#[from] std::io::Error),
    #[error("spreadsheet error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
}

/// Any failure that aborts a single cycle.
#[derive(Debug, Error)]
pub enum CycleError {
    #[error("network error: {0}")]
    Network(#[from] FetchError),
    #[error("schema error: {0}")]
    Schema(#[from] TransformError),
    #[error("empty input: {0}")]
    EmptyInput(#[from] AnalysisError),
    #[error("write error: {0}")]
    Write(#[from] WriteError),
}
