use crate::config::ApiConfig;
use crate::fetcher::traits::MarketFetcher;
use crate::model::FetchError;

use reqwest::{Client, ClientBuilder};
use serde_json::Value;
use std::time::Duration;
use tracing::{info, warn};

pub struct CoinGeckoFetcher {
    client: Client,
    api: ApiConfig,
}

impl CoinGeckoFetcher {
    pub fn new(api: ApiConfig) -> Result<Self, FetchError> {
        let client = Self::client_builder(&api).build()?;
        Ok(Self::with_client(api, client))
    }

    fn client_builder(api: &ApiConfig) -> ClientBuilder {
        Client::builder()
            .user_agent(api.user_agent.clone())
            .timeout(Duration::from_secs(api.request_timeout_seconds))
    }

    pub fn with_client(api: ApiConfig, client: Client) -> Self {
        Self { client, api }
    }

    fn query_params(&self) -> [(&'static str, String); 5] {
        [
            ("vs_currency", self.api.vs_currency.clone()),
            ("order", self.api.order.clone()),
            ("per_page", self.api.per_page.to_string()),
            ("page", self.api.page.to_string()),
            ("sparkline", "false".to_string()),
        ]
    }
}

#[async_trait::async_trait]
impl MarketFetcher for CoinGeckoFetcher {
    async fn fetch_markets(&self) -> Result<Vec<Value>, FetchError> {
        info!("Requesting {} (per_page={})", self.api.endpoint, self.api.per_page);

        let response = self
            .client
            .get(&self.api.endpoint)
            .query(&self.query_params())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!("Market data request failed with status {}", status);
            return Err(FetchError::Status(status));
        }

        let records = response.json::<Vec<Value>>().await.map_err(|e| {
            if e.is_decode() {
                FetchError::Decode(e.to_string())
            } else {
                FetchError::Http(e)
            }
        })?;

        info!("Received {} market records", records.len());
        Ok(records)
    }
}
