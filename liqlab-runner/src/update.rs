//! Per-indicator update logic: fetch via injected sources, compute via the
//! engine, apply in place.
//!
//! Each strategy returns an [`UpdateOutcome`] instead of raising: a fetch
//! failure or indeterminate computation skips that one indicator and leaves
//! its previous persisted value untouched. Nothing here can abort the run.

use crate::describe;
use crate::registry::{IndicatorKind, IndicatorSpec};
use chrono::{Duration, NaiveDate};
use liqlab_core::aggregate::average_of_sources;
use liqlab_core::composite;
use liqlab_core::data::{DataSources, FetchError};
use liqlab_core::metrics;
use liqlab_core::store::{locate_mut, round_to, IndicatorMeta, IndicatorRecord};

/// Ambient run parameters shared by every indicator.
#[derive(Debug, Clone, Copy)]
pub struct RunContext {
    /// "Today" for all relative date math. Injected so runs are replayable.
    pub today: NaiveDate,

    /// How far back macro series are fetched.
    pub lookback_days: i64,
}

impl RunContext {
    fn macro_start(&self) -> NaiveDate {
        self.today - Duration::days(self.lookback_days)
    }
}

/// What happened to one indicator.
#[derive(Debug)]
pub enum UpdateOutcome {
    /// Applied; `value` is the rounded figure now in `current`.
    Updated { value: f64 },

    /// Transport-level failure; previous value retained.
    FetchFailed(FetchError),

    /// The computation had no defined result (empty series, zero reference,
    /// too few regression pairs, every aggregate source down). Previous
    /// value retained; a warning, not an error.
    Indeterminate(String),

    /// No record name contains the keyword. Nothing is created.
    RecordMissing,
}

impl UpdateOutcome {
    pub fn is_updated(&self) -> bool {
        matches!(self, UpdateOutcome::Updated { .. })
    }
}

/// Update the record matching `spec.keyword`, in place.
pub fn update_indicator(
    records: &mut [IndicatorRecord],
    spec: &IndicatorSpec,
    sources: &dyn DataSources,
    ctx: &RunContext,
) -> UpdateOutcome {
    let record = match locate_mut(records, &spec.keyword) {
        Some(r) => r,
        None => return UpdateOutcome::RecordMissing,
    };

    match &spec.kind {
        IndicatorKind::MacroYoy { series_id } => {
            update_macro_yoy(record, sources, series_id, spec.precision, ctx)
        }
        IndicatorKind::NetLiquidity {
            balance_sheet,
            reverse_repo,
            treasury_account,
            impulse_days,
            beta_symbol,
        } => update_net_liquidity(
            record,
            sources,
            balance_sheet,
            reverse_repo,
            treasury_account,
            *impulse_days,
            beta_symbol,
            spec.precision,
            ctx,
        ),
        IndicatorKind::StablecoinGrowth {
            coins,
            fetch_days,
            window_days,
        } => update_stablecoin_growth(record, sources, coins, *fetch_days, *window_days, spec.precision),
        IndicatorKind::Dominance { asset } => {
            update_dominance(record, sources, asset, spec.precision)
        }
        IndicatorKind::EtfNetFlow { window_days } => {
            update_etf_net_flow(record, sources, *window_days, spec.precision)
        }
        IndicatorKind::Sentiment => update_sentiment(record, sources, spec.precision),
        IndicatorKind::PriceZScore {
            symbol,
            window_days,
        } => update_price_z_score(record, sources, symbol, *window_days, spec.precision, ctx),
    }
}

fn update_macro_yoy(
    record: &mut IndicatorRecord,
    sources: &dyn DataSources,
    series_id: &str,
    precision: u32,
    ctx: &RunContext,
) -> UpdateOutcome {
    let series = match sources.macro_series(series_id, ctx.macro_start()) {
        Ok(s) => s,
        Err(e) => return UpdateOutcome::FetchFailed(e),
    };

    let yoy = match metrics::yoy(&series) {
        Some(v) => v,
        None => return UpdateOutcome::Indeterminate(format!("{series_id} YoY")),
    };

    let pct = yoy * 100.0;
    let patch = IndicatorMeta {
        source: Some(format!("FRED {series_id}")),
        last_date: series.latest().map(|p| p.date),
        ..Default::default()
    };
    record.apply(pct, patch, describe::macro_yoy(series_id, pct), precision);
    UpdateOutcome::Updated {
        value: round_to(pct, precision),
    }
}

#[allow(clippy::too_many_arguments)]
fn update_net_liquidity(
    record: &mut IndicatorRecord,
    sources: &dyn DataSources,
    balance_sheet: &str,
    reverse_repo: &str,
    treasury_account: &str,
    impulse_days: i64,
    beta_symbol: &str,
    precision: u32,
    ctx: &RunContext,
) -> UpdateOutcome {
    let start = ctx.macro_start();
    let bs = match sources.macro_series(balance_sheet, start) {
        Ok(s) => s,
        Err(e) => return UpdateOutcome::FetchFailed(e),
    };
    let rrp = match sources.macro_series(reverse_repo, start) {
        Ok(s) => s,
        Err(e) => return UpdateOutcome::FetchFailed(e),
    };
    let tga = match sources.macro_series(treasury_account, start) {
        Ok(s) => s,
        Err(e) => return UpdateOutcome::FetchFailed(e),
    };

    let net = composite::net_liquidity(&bs, &rrp, &tga);
    let yoy_pct = match metrics::yoy(&net) {
        Some(v) => v * 100.0,
        None => return UpdateOutcome::Indeterminate("net liquidity YoY".into()),
    };

    // Impulse and beta are best-effort extras: their absence never blocks
    // the YoY update.
    let impulse_pct = metrics::change_over(&net, impulse_days).map(|v| v * 100.0);
    let beta = match net.latest() {
        Some(last) => {
            let window_start = last.date - Duration::days(365);
            match sources.daily_closes(beta_symbol, window_start, last.date) {
                Ok(prices) => metrics::beta(&net, &prices),
                Err(e) => {
                    eprintln!("WARNING: {beta_symbol} price fetch failed, beta skipped: {e}");
                    None
                }
            }
        }
        None => None,
    };

    let patch = IndicatorMeta {
        source: Some(format!(
            "FRED {balance_sheet}/{reverse_repo}/{treasury_account}"
        )),
        last_date: net.latest().map(|p| p.date),
        impulse_90d_pct: impulse_pct.map(|v| round_to(v, 2)),
        beta_vs_btc: beta.map(|b| round_to(b, 3)),
        ..Default::default()
    };
    record.apply(
        yoy_pct,
        patch,
        describe::net_liquidity(yoy_pct, impulse_pct, beta),
        precision,
    );
    UpdateOutcome::Updated {
        value: round_to(yoy_pct, precision),
    }
}

fn update_stablecoin_growth(
    record: &mut IndicatorRecord,
    sources: &dyn DataSources,
    coins: &[String],
    fetch_days: u32,
    window_days: i64,
    precision: u32,
) -> UpdateOutcome {
    let mut samples = Vec::new();
    let avg = average_of_sources(coins, |coin| {
        let series = match sources.market_caps(coin, fetch_days) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("WARNING: market cap fetch failed for {coin}: {e}");
                return None;
            }
        };
        match metrics::change_over(&series, window_days) {
            Some(growth) => {
                let pct = growth * 100.0;
                samples.push(round_to(pct, 2));
                Some(pct)
            }
            None => {
                eprintln!("WARNING: {coin} growth indeterminate; dropped from average");
                None
            }
        }
    });

    let avg = match avg {
        Some(v) => v,
        None => return UpdateOutcome::Indeterminate("all stablecoin sources failed".into()),
    };

    let patch = IndicatorMeta {
        source: Some("CoinGecko market_chart".into()),
        coins: Some(coins.to_vec()),
        sample_growth: Some(samples),
        ..Default::default()
    };
    record.apply(avg, patch, describe::stablecoin_growth(avg), precision);
    UpdateOutcome::Updated {
        value: round_to(avg, precision),
    }
}

fn update_dominance(
    record: &mut IndicatorRecord,
    sources: &dyn DataSources,
    asset: &str,
    precision: u32,
) -> UpdateOutcome {
    let pct = match sources.dominance(asset) {
        Ok(v) => v,
        Err(e) => return UpdateOutcome::FetchFailed(e),
    };

    // Band bounds already in the store take priority over the defaults.
    let (floor, ceiling) = match record.meta.as_ref() {
        Some(m) => (m.band_floor.unwrap_or(4.0), m.band_ceiling.unwrap_or(6.0)),
        None => (4.0, 6.0),
    };

    let patch = IndicatorMeta {
        source: Some(format!("CoinGecko /global market_cap_percentage.{asset}")),
        band_floor: Some(floor),
        band_ceiling: Some(ceiling),
        ..Default::default()
    };
    record.apply(pct, patch, describe::dominance(pct, floor, ceiling), precision);
    UpdateOutcome::Updated {
        value: round_to(pct, precision),
    }
}

fn update_etf_net_flow(
    record: &mut IndicatorRecord,
    sources: &dyn DataSources,
    window_days: usize,
    precision: u32,
) -> UpdateOutcome {
    let flows = match sources.etf_daily_flows() {
        Ok(s) => s,
        Err(e) => return UpdateOutcome::FetchFailed(e),
    };

    let total = match metrics::trailing_total(&flows, window_days) {
        Some(t) => t,
        None => return UpdateOutcome::Indeterminate("no ETF flow data".into()),
    };

    let patch = IndicatorMeta {
        source: Some("SoSoValue Spot BTC ETF API".into()),
        window: Some(format!("last {window_days} days")),
        last_date: flows.latest().map(|p| p.date),
        ..Default::default()
    };
    record.apply(
        total,
        patch,
        describe::etf_net_flow(total, window_days),
        precision,
    );
    UpdateOutcome::Updated {
        value: round_to(total, precision),
    }
}

fn update_sentiment(
    record: &mut IndicatorRecord,
    sources: &dyn DataSources,
    precision: u32,
) -> UpdateOutcome {
    let value = match sources.sentiment_index() {
        Ok(v) => v,
        Err(e) => return UpdateOutcome::FetchFailed(e),
    };

    let patch = IndicatorMeta {
        source: Some("alternative.me Fear & Greed Index".into()),
        ..Default::default()
    };
    record.apply(value as f64, patch, describe::sentiment(value), precision);
    UpdateOutcome::Updated {
        value: value as f64,
    }
}

fn update_price_z_score(
    record: &mut IndicatorRecord,
    sources: &dyn DataSources,
    symbol: &str,
    window_days: i64,
    precision: u32,
    ctx: &RunContext,
) -> UpdateOutcome {
    let start = ctx.today - Duration::days(window_days);
    let closes = match sources.daily_closes(symbol, start, ctx.today) {
        Ok(c) => c,
        Err(e) => return UpdateOutcome::FetchFailed(e),
    };

    // An empty or flat window reads as 0.0, a neutral score — never skipped.
    let samples: Vec<f64> = closes.values().copied().collect();
    let z = metrics::z_score(&samples);

    let patch = IndicatorMeta {
        source: Some(format!("Yahoo Finance {symbol}")),
        last_date: closes.keys().next_back().copied(),
        ..Default::default()
    };
    record.apply(z, patch, describe::price_z_score(z, window_days), precision);
    UpdateOutcome::Updated {
        value: round_to(z, precision),
    }
}
