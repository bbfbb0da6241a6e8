//! Serializable run configuration.
//!
//! Endpoints live here rather than as embedded literals so a config file can
//! repoint every provider (mirrors, proxies, test servers) without touching
//! code. Everything has a default; an absent config file is a valid setup.

use crate::registry::{default_registry, IndicatorSpec};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable holding the optional FRED API key. Without it FRED
/// still answers, just rate-limited.
pub const FRED_API_KEY_ENV: &str = "FRED_API_KEY";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Full configuration for an update run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdateConfig {
    /// Path of the persisted indicator store.
    pub store_path: PathBuf,

    /// How far back macro series are fetched, in days. Needs to comfortably
    /// cover a YoY reference plus release lag.
    pub lookback_days: i64,

    pub endpoints: Endpoints,

    /// The indicator registry. Defaults to the full dashboard set.
    pub indicators: Vec<IndicatorSpec>,
}

impl Default for UpdateConfig {
    fn default() -> Self {
        Self {
            store_path: PathBuf::from("data.json"),
            lookback_days: 800,
            endpoints: Endpoints::default(),
            indicators: default_registry(),
        }
    }
}

impl UpdateConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// The FRED API key from the environment, if set and non-empty.
    pub fn fred_api_key() -> Option<String> {
        std::env::var(FRED_API_KEY_ENV)
            .ok()
            .filter(|key| !key.is_empty())
    }
}

/// Provider endpoints, injectable per deployment.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    pub fred_observations: String,
    pub coingecko_base: String,
    pub etf_flows_url: String,
    pub sentiment_url: String,
    pub yahoo_base: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            fred_observations: "https://api.stlouisfed.org/fred/series/observations".into(),
            coingecko_base: "https://api.coingecko.com/api/v3".into(),
            etf_flows_url: "https://api.sosovalue.com/data/v1/etf/spotBTC?limit=40".into(),
            sentiment_url: "https://api.alternative.me/fng/".into(),
            yahoo_base: "https://query2.finance.yahoo.com".into(),
        }
    }
}
