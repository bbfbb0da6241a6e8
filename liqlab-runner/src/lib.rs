//! LiqLab Runner — declarative indicator registry and run orchestration.
//!
//! This crate builds on `liqlab-core` to provide:
//! - TOML configuration (store path, provider endpoints, fetch lookback)
//! - The indicator registry: keyword + precision + compute strategy per entry
//! - Per-strategy update logic wiring providers into engine metrics
//! - The run loop: load store, update each indicator, persist once atomically

pub mod config;
pub mod describe;
pub mod registry;
pub mod runner;
pub mod update;

pub use config::{ConfigError, Endpoints, UpdateConfig, FRED_API_KEY_ENV};
pub use registry::{default_registry, IndicatorKind, IndicatorSpec};
pub use runner::{run_update, StdoutProgress, UpdateError, UpdateProgress, UpdateSummary};
pub use update::{update_indicator, RunContext, UpdateOutcome};
