//! CoinGecko provider: market-cap history and dominance.

use super::provider::{FetchError, HttpClient};
use crate::series::{TimePoint, TimeSeries};
use serde::Deserialize;
use std::collections::BTreeMap;

#[derive(Debug, Deserialize)]
struct MarketChartResponse {
    #[serde(default)]
    market_caps: Vec<(i64, f64)>,
}

#[derive(Debug, Deserialize)]
struct GlobalResponse {
    data: GlobalData,
}

#[derive(Debug, Deserialize)]
struct GlobalData {
    market_cap_percentage: BTreeMap<String, f64>,
}

pub struct CoinGeckoClient {
    http: HttpClient,
    base_url: String,
}

impl CoinGeckoClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: HttpClient::new(),
            base_url: base_url.into(),
        }
    }

    /// Daily market-cap series for a coin over the last `days` days.
    ///
    /// CoinGecko timestamps are epoch milliseconds; they collapse to calendar
    /// days here, which is the resolution every downstream metric works at.
    pub fn market_caps(&self, coin_id: &str, days: u32) -> Result<TimeSeries, FetchError> {
        let url = format!("{}/coins/{coin_id}/market_chart", self.base_url);
        let query = [
            ("vs_currency", "usd".to_string()),
            ("days", days.to_string()),
            ("interval", "daily".to_string()),
        ];
        let resp: MarketChartResponse = self.http.get_json(&url, &query)?;
        Ok(parse_market_caps(resp))
    }

    /// Share of total crypto market capitalization for `asset`, in percent.
    pub fn dominance(&self, asset: &str) -> Result<f64, FetchError> {
        let url = format!("{}/global", self.base_url);
        let resp: GlobalResponse = self.http.get_json(&url, &[])?;
        resp.data
            .market_cap_percentage
            .get(asset)
            .copied()
            .ok_or_else(|| FetchError::NotFound(format!("market_cap_percentage.{asset}")))
    }
}

fn parse_market_caps(resp: MarketChartResponse) -> TimeSeries {
    let points = resp
        .market_caps
        .into_iter()
        .filter_map(|(ts_ms, cap)| {
            let date = chrono::DateTime::from_timestamp_millis(ts_ms)?.date_naive();
            Some(TimePoint { date, value: cap })
        })
        .collect();
    TimeSeries::from_points(points)
}
