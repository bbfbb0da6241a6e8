//! The data-source seam between the engine and the outside world.
//!
//! [`DataSources`] abstracts every upstream feed behind one trait so the
//! runner can be driven by the live HTTP clients, by seeded synthetic data
//! (offline mode), or by stubs in tests.

use super::coingecko::CoinGeckoClient;
use super::fred::FredClient;
use super::provider::FetchError;
use super::sentiment::SentimentClient;
use super::sosovalue::SosoValueClient;
use super::synthetic::SyntheticData;
use super::yahoo::YahooClient;
use crate::series::TimeSeries;
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Everything the indicator run needs to fetch, in one injectable bundle.
pub trait DataSources {
    /// Macro time series (balance sheet, reverse repo, treasury account)
    /// from the observation start date onward.
    fn macro_series(&self, series_id: &str, start: NaiveDate) -> Result<TimeSeries, FetchError>;

    /// Daily market-cap series for a coin over the last `days` days.
    fn market_caps(&self, coin_id: &str, days: u32) -> Result<TimeSeries, FetchError>;

    /// Share of total crypto market capitalization for an asset, in percent.
    fn dominance(&self, asset: &str) -> Result<f64, FetchError>;

    /// Daily ETF net-flow series in USD.
    fn etf_daily_flows(&self) -> Result<TimeSeries, FetchError>;

    /// Latest sentiment index reading (0-100).
    fn sentiment_index(&self) -> Result<i64, FetchError>;

    /// Daily closing prices for a ticker over `[start, end]`.
    fn daily_closes(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<BTreeMap<NaiveDate, f64>, FetchError>;
}

/// The production bundle: one HTTP client per upstream API.
pub struct LiveSources {
    fred: FredClient,
    coingecko: CoinGeckoClient,
    etf: SosoValueClient,
    sentiment: SentimentClient,
    yahoo: YahooClient,
}

impl LiveSources {
    pub fn new(
        fred: FredClient,
        coingecko: CoinGeckoClient,
        etf: SosoValueClient,
        sentiment: SentimentClient,
        yahoo: YahooClient,
    ) -> Self {
        Self {
            fred,
            coingecko,
            etf,
            sentiment,
            yahoo,
        }
    }
}

impl DataSources for LiveSources {
    fn macro_series(&self, series_id: &str, start: NaiveDate) -> Result<TimeSeries, FetchError> {
        self.fred.series(series_id, start)
    }

    fn market_caps(&self, coin_id: &str, days: u32) -> Result<TimeSeries, FetchError> {
        self.coingecko.market_caps(coin_id, days)
    }

    fn dominance(&self, asset: &str) -> Result<f64, FetchError> {
        self.coingecko.dominance(asset)
    }

    fn etf_daily_flows(&self) -> Result<TimeSeries, FetchError> {
        self.etf.daily_net_flows()
    }

    fn sentiment_index(&self) -> Result<i64, FetchError> {
        self.sentiment.latest_index()
    }

    fn daily_closes(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<BTreeMap<NaiveDate, f64>, FetchError> {
        self.yahoo.daily_closes(symbol, start, end)
    }
}

/// Seeded synthetic bundle for offline runs: no network, reproducible output.
pub struct SyntheticSources {
    data: SyntheticData,
    today: NaiveDate,
}

impl SyntheticSources {
    pub fn new(seed: u64, today: NaiveDate) -> Self {
        Self {
            data: SyntheticData::new(seed),
            today,
        }
    }
}

impl DataSources for SyntheticSources {
    fn macro_series(&self, series_id: &str, start: NaiveDate) -> Result<TimeSeries, FetchError> {
        let days = (self.today - start).num_days().max(1) as usize;
        Ok(self.data.random_walk(series_id, self.today, days, 5_000.0))
    }

    fn market_caps(&self, coin_id: &str, days: u32) -> Result<TimeSeries, FetchError> {
        Ok(self
            .data
            .random_walk(coin_id, self.today, days as usize, 90e9))
    }

    fn dominance(&self, asset: &str) -> Result<f64, FetchError> {
        Ok(self.data.scalar_in(asset, 3.0, 7.0))
    }

    fn etf_daily_flows(&self) -> Result<TimeSeries, FetchError> {
        Ok(self.data.noise_series("etf_flows", self.today, 40, 500e6))
    }

    fn sentiment_index(&self) -> Result<i64, FetchError> {
        Ok(self.data.scalar_in("fear_greed", 5.0, 95.0) as i64)
    }

    fn daily_closes(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<BTreeMap<NaiveDate, f64>, FetchError> {
        let days = (end - start).num_days().max(1) as usize;
        let walk = self.data.random_walk(symbol, end, days, 60_000.0);
        Ok(walk.points().iter().map(|p| (p.date, p.value)).collect())
    }
}
