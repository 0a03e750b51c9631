use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_ENDPOINT: &str = "https://api.coingecko.com/api/v3/coins/markets";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("cannot parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub endpoint: String,
    pub vs_currency: String,
    pub order: String,
    pub per_page: u32,
    pub page: u32,
    pub request_timeout_seconds: u64,
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            vs_currency: "usd".to_string(),
            order: "market_cap_desc".to_string(),
            per_page: 50,
            page: 1,
            request_timeout_seconds: 30,
            user_agent: concat!("crypto-tracker/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub output_path: PathBuf,
    pub refresh_interval_seconds: u64,
    pub top_n: usize,
    pub api: ApiConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            output_path: PathBuf::from("crypto_data.xlsx"),
            refresh_interval_seconds: 300,
            top_n: 5,
            api: ApiConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.refresh_interval_seconds == 0 {
            return Err(ConfigError::Invalid("refresh_interval_seconds must be positive".into()));
        }
        if self.top_n == 0 {
            return Err(ConfigError::Invalid("top_n must be positive".into()));
        }
        if !(1..=250).contains(&self.api.per_page) {
            return Err(ConfigError::Invalid(format!(
                "api.per_page must be within 1..=250, got {}",
                self.api.per_page
            )));
        }
        if self.api.endpoint.trim().is_empty() {
            return Err(ConfigError::Invalid("api.endpoint is empty".into()));
        }
        Ok(())
    }
}

/// Loads the config file, falling back to the built-in defaults when it does not exist.
pub fn load_config(path: impl AsRef<Path>) -> Result<AppConfig, ConfigError> {
    let path = path.as_ref();
    let config = if path.exists() {
        let content = fs::read_to_string(path)?;
        serde_json::from_str(&content)?
    } else {
        AppConfig::default()
    };
    config.validate()?;
    Ok(config)
}
