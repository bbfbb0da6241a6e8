//! Fear & Greed sentiment index provider (alternative.me).
//!
//! The API reports the index value as a string; one integer per request.

use super::provider::{FetchError, HttpClient};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct FngResponse {
    #[serde(default)]
    data: Vec<FngEntry>,
}

#[derive(Debug, Deserialize)]
struct FngEntry {
    value: String,
}

pub struct SentimentClient {
    http: HttpClient,
    url: String,
}

impl SentimentClient {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            http: HttpClient::new(),
            url: url.into(),
        }
    }

    /// Latest index reading, 0 (extreme fear) to 100 (extreme greed).
    pub fn latest_index(&self) -> Result<i64, FetchError> {
        let resp: FngResponse = self.http.get_json(&self.url, &[])?;
        parse_index(resp)
    }
}

fn parse_index(resp: FngResponse) -> Result<i64, FetchError> {
    let entry = resp
        .data
        .first()
        .ok_or_else(|| FetchError::ResponseFormatChanged("empty fng data array".into()))?;
    entry
        .value
        .parse::<i64>()
        .map_err(|_| FetchError::ResponseFormatChanged(format!("non-integer value: {}", entry.value)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_first_entry_value() {
        let resp: FngResponse = serde_json::from_str(
            r#"{"name": "Fear and Greed Index",
                "data": [{"value": "39", "value_classification": "Fear"},
                         {"value": "41", "value_classification": "Fear"}]}"#,
        )
        .unwrap();
        assert_eq!(parse_index(resp).unwrap(), 39);
    }

    #[test]
    fn parse_empty_data_is_format_error() {
        let resp: FngResponse = serde_json::from_str(r#"{"data": []}"#).unwrap();
        assert!(parse_index(resp).is_err());
    }
}
