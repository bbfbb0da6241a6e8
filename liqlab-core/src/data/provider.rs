//! Shared HTTP plumbing and the structured fetch error taxonomy.
//!
//! Every provider routes through [`HttpClient::get_json`]: one blocking
//! client, a request timeout, and bounded retry with exponential backoff on
//! transient failures. A fetch error is never fatal to a run — the caller
//! skips that indicator and moves on.

use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;

/// Structured error types for data fetches.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("network unreachable: {0}")]
    NetworkUnreachable(String),

    #[error("rate limited by provider (retry after {retry_after_secs}s)")]
    RateLimited { retry_after_secs: u64 },

    #[error("response format changed: {0}")]
    ResponseFormatChanged(String),

    #[error("authentication required: {0}")]
    AuthenticationRequired(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("fetch error: {0}")]
    Other(String),
}

/// Blocking HTTP client shared by all providers.
pub struct HttpClient {
    client: reqwest::blocking::Client,
    max_retries: u32,
    base_delay: Duration,
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpClient {
    pub fn new() -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(20))
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36")
            .build()
            .expect("failed to build HTTP client");

        Self {
            client,
            max_retries: 3,
            base_delay: Duration::from_millis(500),
        }
    }

    /// GET a URL with query parameters and decode the JSON body.
    ///
    /// Retries transient failures (connect/timeout errors, 429, 5xx) with
    /// exponential backoff; auth and not-found statuses fail immediately.
    pub fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<T, FetchError> {
        let mut last_error = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                let delay = self.base_delay * 2u32.pow(attempt - 1);
                std::thread::sleep(delay);
            }

            match self.client.get(url).query(query).send() {
                Ok(resp) => {
                    let status = resp.status();

                    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                        let retry_after = resp
                            .headers()
                            .get("retry-after")
                            .and_then(|v| v.to_str().ok())
                            .and_then(|v| v.parse::<u64>().ok())
                            .unwrap_or(60);
                        last_error = Some(FetchError::RateLimited {
                            retry_after_secs: retry_after,
                        });
                        continue;
                    }

                    if status == reqwest::StatusCode::UNAUTHORIZED
                        || status == reqwest::StatusCode::FORBIDDEN
                    {
                        return Err(FetchError::AuthenticationRequired(format!(
                            "HTTP {status} for {url}"
                        )));
                    }

                    if status == reqwest::StatusCode::NOT_FOUND {
                        return Err(FetchError::NotFound(url.to_string()));
                    }

                    if !status.is_success() {
                        last_error = Some(FetchError::Other(format!("HTTP {status} for {url}")));
                        continue;
                    }

                    return resp
                        .json::<T>()
                        .map_err(|e| FetchError::ResponseFormatChanged(e.to_string()));
                }
                Err(e) => {
                    if e.is_connect() || e.is_timeout() {
                        last_error = Some(FetchError::NetworkUnreachable(e.to_string()));
                        continue;
                    }
                    return Err(FetchError::NetworkUnreachable(e.to_string()));
                }
            }
        }

        Err(last_error.unwrap_or_else(|| FetchError::Other("max retries exceeded".into())))
    }
}
