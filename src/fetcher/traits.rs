use crate::model::FetchError;
use serde_json::Value;

/// Source of raw per-asset market records for one cycle.
#[async_trait::async_trait]
pub trait MarketFetcher: Send + Sync {
    async fn fetch_markets(&self) -> Result<Vec<Value>, FetchError>;
}
