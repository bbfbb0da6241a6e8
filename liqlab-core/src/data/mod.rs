//! Data providers — thin HTTP collaborators the engine is injected with.
//!
//! Each provider wraps one upstream API behind a blocking client with
//! timeout and bounded retry. The [`DataSources`] trait bundles them so the
//! runner can swap the whole set for seeded synthetic data in offline runs
//! and tests.

pub mod coingecko;
pub mod fred;
pub mod provider;
pub mod sentiment;
pub mod sosovalue;
pub mod sources;
pub mod synthetic;
pub mod yahoo;

pub use coingecko::CoinGeckoClient;
pub use fred::FredClient;
pub use provider::{FetchError, HttpClient};
pub use sentiment::SentimentClient;
pub use sosovalue::SosoValueClient;
pub use sources::{DataSources, LiveSources, SyntheticSources};
pub use synthetic::SyntheticData;
pub use yahoo::YahooClient;
