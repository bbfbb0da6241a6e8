//! FRED macro time-series provider.
//!
//! Fetches `series/observations` for a named series id, filtered by an
//! observation start date. An API key is optional; without one FRED still
//! answers but rate-limits aggressively.
//!
//! FRED encodes "no observation" as a textual sentinel (`"."` or an empty
//! string) — those are skipped, never read as zero. An individually
//! malformed observation is dropped and the rest of the series survives.

use super::provider::{FetchError, HttpClient};
use crate::series::{TimePoint, TimeSeries};
use chrono::NaiveDate;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct ObservationsResponse {
    #[serde(default)]
    observations: Vec<Observation>,
}

#[derive(Debug, Deserialize)]
struct Observation {
    date: String,
    value: String,
}

pub struct FredClient {
    http: HttpClient,
    base_url: String,
    api_key: Option<String>,
}

impl FredClient {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            http: HttpClient::new(),
            base_url: base_url.into(),
            api_key,
        }
    }

    /// Fetch observations for `series_id` starting at `start`, as a
    /// calendar-day series.
    pub fn series(&self, series_id: &str, start: NaiveDate) -> Result<TimeSeries, FetchError> {
        let mut query = vec![
            ("series_id", series_id.to_string()),
            ("file_type", "json".to_string()),
            ("observation_start", start.to_string()),
        ];
        if let Some(key) = &self.api_key {
            query.push(("api_key", key.clone()));
        }

        let resp: ObservationsResponse = self.http.get_json(&self.base_url, &query)?;
        Ok(parse_observations(resp))
    }
}

fn parse_observations(resp: ObservationsResponse) -> TimeSeries {
    let mut points = Vec::with_capacity(resp.observations.len());
    for obs in resp.observations {
        // "." and "" mean the release had no value that day
        if obs.value.is_empty() || obs.value == "." {
            continue;
        }
        let date = match NaiveDate::parse_from_str(&obs.date, "%Y-%m-%d") {
            Ok(d) => d,
            Err(_) => continue,
        };
        let value = match obs.value.parse::<f64>() {
            Ok(v) => v,
            Err(_) => continue,
        };
        points.push(TimePoint { date, value });
    }
    TimeSeries::from_points(points)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_skips_sentinel_values() {
        let resp: ObservationsResponse = serde_json::from_str(
            r#"{"observations": [
                {"date": "2024-01-02", "value": "100.5", "realtime_start": "2024-01-02"},
                {"date": "2024-01-03", "value": "."},
                {"date": "2024-01-04", "value": ""},
                {"date": "2024-01-05", "value": "101.25"}
            ]}"#,
        )
        .unwrap();

        let series = parse_observations(resp);
        assert_eq!(series.len(), 2);
        assert_eq!(series.points()[0].value, 100.5);
        assert_eq!(series.points()[1].value, 101.25);
    }

    #[test]
    fn parse_drops_malformed_points_keeps_rest() {
        let resp: ObservationsResponse = serde_json::from_str(
            r#"{"observations": [
                {"date": "not a date", "value": "1.0"},
                {"date": "2024-01-03", "value": "abc"},
                {"date": "2024-01-04", "value": "7.75"}
            ]}"#,
        )
        .unwrap();

        let series = parse_observations(resp);
        assert_eq!(series.len(), 1);
        assert_eq!(series.points()[0].value, 7.75);
    }

    #[test]
    fn parse_empty_payload() {
        let resp: ObservationsResponse = serde_json::from_str("{}").unwrap();
        assert!(parse_observations(resp).is_empty());
    }
}
