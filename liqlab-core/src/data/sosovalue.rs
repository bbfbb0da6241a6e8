//! SoSoValue spot-ETF flow provider.
//!
//! The feed returns one record per ETF per day; several funds report the
//! same date, so records are summed into one net-flow point per day before
//! anything downstream sees them.

use super::provider::{FetchError, HttpClient};
use crate::series::{TimePoint, TimeSeries};
use chrono::NaiveDate;
use serde::Deserialize;
use std::collections::BTreeMap;

#[derive(Debug, Deserialize)]
struct FlowResponse {
    #[serde(default)]
    data: FlowData,
}

#[derive(Debug, Default, Deserialize)]
struct FlowData {
    #[serde(default)]
    items: Vec<FlowItem>,
}

#[derive(Debug, Deserialize)]
struct FlowItem {
    #[serde(default)]
    date: Option<String>,
    #[serde(default)]
    flow: Option<f64>,
}

pub struct SosoValueClient {
    http: HttpClient,
    url: String,
}

impl SosoValueClient {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            http: HttpClient::new(),
            url: url.into(),
        }
    }

    /// Daily net-flow series in USD, one point per calendar day.
    ///
    /// An empty payload is a valid (empty) series — downstream treats the
    /// resulting metric as indeterminate, not as a transport failure.
    pub fn daily_net_flows(&self) -> Result<TimeSeries, FetchError> {
        let resp: FlowResponse = self.http.get_json(&self.url, &[])?;
        Ok(parse_flows(resp))
    }
}

fn parse_flows(resp: FlowResponse) -> TimeSeries {
    let mut by_day: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for item in resp.data.items {
        let Some(raw_date) = item.date else { continue };
        let date = match NaiveDate::parse_from_str(&raw_date, "%Y-%m-%d") {
            Ok(d) => d,
            Err(_) => continue,
        };
        *by_day.entry(date).or_insert(0.0) += item.flow.unwrap_or(0.0);
    }

    TimeSeries::from_points(
        by_day
            .into_iter()
            .map(|(date, value)| TimePoint { date, value })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_sums_same_day_records() {
        let resp: FlowResponse = serde_json::from_str(
            r#"{"data": {"items": [
                {"date": "2024-03-01", "flow": 100.0},
                {"date": "2024-03-01", "flow": -40.0},
                {"date": "2024-03-04", "flow": 25.0}
            ]}}"#,
        )
        .unwrap();

        let series = parse_flows(resp);
        assert_eq!(series.len(), 2);
        assert_eq!(series.points()[0].value, 60.0);
        assert_eq!(series.points()[1].value, 25.0);
    }

    #[test]
    fn parse_treats_missing_flow_as_zero_and_skips_dateless() {
        let resp: FlowResponse = serde_json::from_str(
            r#"{"data": {"items": [
                {"date": "2024-03-01"},
                {"flow": 999.0},
                {"date": "2024-03-01", "flow": 7.0}
            ]}}"#,
        )
        .unwrap();

        let series = parse_flows(resp);
        assert_eq!(series.len(), 1);
        assert_eq!(series.points()[0].value, 7.0);
    }

    #[test]
    fn parse_empty_payload_is_empty_series() {
        let resp: FlowResponse = serde_json::from_str("{}").unwrap();
        assert!(parse_flows(resp).is_empty());
    }
}
