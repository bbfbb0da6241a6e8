//! LiqLab CLI — update and inspect the indicator store.
//!
//! Commands:
//! - `update` — fetch all sources, recompute every indicator, persist the store
//! - `show` — print the store's current values as a table

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use liqlab_core::data::{
    CoinGeckoClient, FredClient, LiveSources, SentimentClient, SosoValueClient, SyntheticSources,
    YahooClient,
};
use liqlab_core::store::load_store;
use liqlab_runner::{run_update, RunContext, StdoutProgress, UpdateConfig};

/// Seed for `--offline` synthetic data; fixed so smoke runs are reproducible.
const OFFLINE_SEED: u64 = 0x11AB;

#[derive(Parser)]
#[command(
    name = "liqlab",
    about = "LiqLab CLI — macro-liquidity indicator updater"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch all sources and update every indicator in the store.
    Update {
        /// Path to a TOML config file. Defaults are used when absent.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Store path, overriding the config file.
        #[arg(long)]
        store: Option<PathBuf>,

        /// Offline mode: seeded synthetic data instead of network fetches.
        #[arg(long, default_value_t = false)]
        offline: bool,
    },
    /// Print the store's current indicator values.
    Show {
        /// Store path. Defaults to ./data.json.
        #[arg(long, default_value = "data.json")]
        store: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Update {
            config,
            store,
            offline,
        } => run_update_cmd(config, store, offline),
        Commands::Show { store } => run_show(&store),
    }
}

fn run_update_cmd(
    config_path: Option<PathBuf>,
    store_override: Option<PathBuf>,
    offline: bool,
) -> Result<()> {
    let mut config = match config_path {
        Some(path) => UpdateConfig::from_file(&path)?,
        None => UpdateConfig::default(),
    };
    if let Some(store) = store_override {
        config.store_path = store;
    }

    let today = chrono::Local::now().date_naive();
    let ctx = RunContext {
        today,
        lookback_days: config.lookback_days,
    };

    // Partial failure is normal operation, so the summary decides nothing
    // about the exit code — only config errors are fatal.
    if offline {
        let sources = SyntheticSources::new(OFFLINE_SEED, today);
        run_update(&config, &sources, &ctx, &StdoutProgress)?;
    } else {
        let endpoints = &config.endpoints;
        let sources = LiveSources::new(
            FredClient::new(
                endpoints.fred_observations.as_str(),
                UpdateConfig::fred_api_key(),
            ),
            CoinGeckoClient::new(endpoints.coingecko_base.as_str()),
            SosoValueClient::new(endpoints.etf_flows_url.as_str()),
            SentimentClient::new(endpoints.sentiment_url.as_str()),
            YahooClient::new(endpoints.yahoo_base.as_str()),
        );
        run_update(&config, &sources, &ctx, &StdoutProgress)?;
    }

    Ok(())
}

fn run_show(store_path: &Path) -> Result<()> {
    let records = load_store(store_path);
    if records.is_empty() {
        println!("Store is empty: {}", store_path.display());
        return Ok(());
    }

    println!("{:<36} {:>14}  {}", "Indicator", "Current", "Source");
    println!("{}", "-".repeat(72));
    for record in &records {
        let current = match record.current {
            Some(v) => format!("{v}"),
            None => "—".to_string(),
        };
        let source = record
            .meta
            .as_ref()
            .and_then(|m| m.source.as_deref())
            .unwrap_or("");
        println!("{:<36} {:>14}  {}", record.name, current, source);
    }

    Ok(())
}
