//! Yahoo Finance price-history provider.
//!
//! Fetches daily bars from the v8 chart API and flattens them to a single
//! closing-price column keyed by calendar day, preferring the adjusted close
//! where Yahoo supplies one. Yahoo has no official API and changes formats
//! unannounced; every structural surprise maps to
//! [`FetchError::ResponseFormatChanged`].

use super::provider::{FetchError, HttpClient};
use chrono::NaiveDate;
use serde::Deserialize;
use std::collections::BTreeMap;

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartResult,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    result: Option<Vec<ChartData>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartData {
    timestamp: Option<Vec<i64>>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    quote: Vec<QuoteData>,
    adjclose: Option<Vec<AdjCloseData>>,
}

#[derive(Debug, Deserialize)]
struct QuoteData {
    close: Vec<Option<f64>>,
}

#[derive(Debug, Deserialize)]
struct AdjCloseData {
    adjclose: Vec<Option<f64>>,
}

pub struct YahooClient {
    http: HttpClient,
    base_url: String,
}

impl YahooClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: HttpClient::new(),
            base_url: base_url.into(),
        }
    }

    /// Daily closing prices for `symbol` over `[start, end]`, keyed by day.
    pub fn daily_closes(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<BTreeMap<NaiveDate, f64>, FetchError> {
        let start_ts = start.and_hms_opt(0, 0, 0).unwrap().and_utc().timestamp();
        let end_ts = end.and_hms_opt(23, 59, 59).unwrap().and_utc().timestamp();
        let url = format!("{}/v8/finance/chart/{symbol}", self.base_url);
        let query = [
            ("period1", start_ts.to_string()),
            ("period2", end_ts.to_string()),
            ("interval", "1d".to_string()),
            ("includeAdjustedClose", "true".to_string()),
        ];

        let resp: ChartResponse = self.http.get_json(&url, &query)?;
        parse_chart(symbol, resp)
    }
}

fn parse_chart(
    symbol: &str,
    resp: ChartResponse,
) -> Result<BTreeMap<NaiveDate, f64>, FetchError> {
    let result = resp.chart.result.ok_or_else(|| {
        if let Some(err) = resp.chart.error {
            if err.code == "Not Found" {
                FetchError::NotFound(symbol.to_string())
            } else {
                FetchError::ResponseFormatChanged(format!("{}: {}", err.code, err.description))
            }
        } else {
            FetchError::ResponseFormatChanged("empty result with no error".into())
        }
    })?;

    let data = result
        .into_iter()
        .next()
        .ok_or_else(|| FetchError::ResponseFormatChanged("result array is empty".into()))?;

    let timestamps = data
        .timestamp
        .ok_or_else(|| FetchError::ResponseFormatChanged("no timestamps".into()))?;

    let quote = data
        .indicators
        .quote
        .into_iter()
        .next()
        .ok_or_else(|| FetchError::ResponseFormatChanged("no quote data".into()))?;

    let adj_closes = data
        .indicators
        .adjclose
        .and_then(|v| v.into_iter().next())
        .map(|a| a.adjclose);

    let mut closes = BTreeMap::new();
    for (i, &ts) in timestamps.iter().enumerate() {
        let date = chrono::DateTime::from_timestamp(ts, 0)
            .map(|dt| dt.naive_utc().date())
            .ok_or_else(|| FetchError::ResponseFormatChanged(format!("invalid timestamp: {ts}")))?;

        // Prefer the adjusted close; holidays come through as null and are skipped
        let adj = adj_closes.as_ref().and_then(|v| v.get(i).copied().flatten());
        let close = quote.close.get(i).copied().flatten();
        if let Some(price) = adj.or(close) {
            closes.insert(date, price);
        }
    }

    if closes.is_empty() {
        return Err(FetchError::NotFound(symbol.to_string()));
    }
    Ok(closes)
}
