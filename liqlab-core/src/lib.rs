//! LiqLab Core — the indicator computation engine and its thin collaborators.
//!
//! This crate contains everything the updater needs short of orchestration:
//! - Calendar-day time series with nearest-date alignment
//! - Derived metrics (YoY, windowed change, z-score, regression beta)
//! - Composite series construction (net liquidity)
//! - Multi-source averaging with partial-failure tolerance
//! - The persisted indicator store (lookup, in-place apply, atomic save)
//! - HTTP data providers and a seeded synthetic fallback
//!
//! The engine works purely on already-fetched in-memory series; providers are
//! injected behind the `data::DataSources` trait so runs are testable offline.

pub mod aggregate;
pub mod composite;
pub mod data;
pub mod metrics;
pub mod series;
pub mod store;

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: the types handed across crate boundaries are
    /// Send + Sync, so a future concurrent caller needs no retrofit.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        require_send::<series::TimePoint>();
        require_sync::<series::TimePoint>();
        require_send::<series::TimeSeries>();
        require_sync::<series::TimeSeries>();

        require_send::<store::IndicatorRecord>();
        require_sync::<store::IndicatorRecord>();
        require_send::<store::IndicatorMeta>();
        require_sync::<store::IndicatorMeta>();
        require_send::<store::StoreError>();
        require_sync::<store::StoreError>();

        require_send::<data::FetchError>();
        require_sync::<data::FetchError>();
        require_send::<data::LiveSources>();
        require_sync::<data::LiveSources>();
        require_send::<data::SyntheticSources>();
        require_sync::<data::SyntheticSources>();
    }
}
