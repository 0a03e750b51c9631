// CoinGecko `/coins/markets` record mapping
use crate::model::{AssetRecord, Snapshot, TransformError};
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

pub trait Parser {
    fn parse(&self, raw: &[Value], fetched_at: DateTime<Utc>) -> Result<Snapshot, TransformError>;
}

pub struct MarketParser;

impl MarketParser {
    pub fn new() -> Self {
        Self
    }
}

impl Parser for MarketParser {
    /// Maps every raw record to an `AssetRecord`, keeping provider order.
    /// The first malformed record aborts the whole snapshot.
    fn parse(&self, raw: &[Value], fetched_at: DateTime<Utc>) -> Result<Snapshot, TransformError> {
        let records = raw
            .iter()
            .enumerate()
            .map(|(index, value)| parse_record(index, value))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Snapshot::new(records, fetched_at))
    }
}

fn parse_record(index: usize, value: &Value) -> Result<AssetRecord, TransformError> {
    let obj = value.as_object().ok_or(TransformError::NotAnObject { index })?;

    Ok(AssetRecord {
        name: text_field(obj, index, "name")?,
        symbol: text_field(obj, index, "symbol")?,
        price_usd: number_field(obj, index, "current_price")?,
        market_cap_usd: number_field(obj, index, "market_cap")?,
        volume_24h_usd: number_field(obj, index, "total_volume")?,
        price_change_24h_pct: optional_number_field(obj, index, "price_change_percentage_24h")?,
    })
}

fn field<'a>(obj: &'a Map<String, Value>, index: usize, field: &'static str) -> Result<&'a Value, TransformError> {
    obj.get(field).ok_or(TransformError::MissingField { index, field })
}

fn text_field(obj: &Map<String, Value>, index: usize, name: &'static str) -> Result<String, TransformError> {
    field(obj, index, name)?
        .as_str()
        .map(str::to_string)
        .ok_or(TransformError::InvalidField { index, field: name })
}

fn number_field(obj: &Map<String, Value>, index: usize, name: &'static str) -> Result<f64, TransformError> {
    field(obj, index, name)?
        .as_f64()
        .ok_or(TransformError::InvalidField { index, field: name })
}

// The key must be present; only its value may be null.
fn optional_number_field(
    obj: &Map<String, Value>,
    index: usize,
    name: &'static str,
) -> Result<Option<f64>, TransformError> {
    match field(obj, index, name)? {
        Value::Null => Ok(None),
        v => v
            .as_f64()
            .map(Some)
            .ok_or(TransformError::InvalidField { index, field: name }),
    }
}
