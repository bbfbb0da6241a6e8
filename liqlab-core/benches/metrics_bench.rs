//! Criterion benchmarks for the metric hot paths.
//!
//! The series involved are tiny in production (hundreds of points), but the
//! nearest-date lookup is quadratic inside a composite merge — this keeps an
//! eye on it.

use chrono::{Duration, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::collections::BTreeMap;

use liqlab_core::composite;
use liqlab_core::metrics;
use liqlab_core::series::{TimePoint, TimeSeries};

fn make_series(n: usize, step_days: i64, base: f64) -> TimeSeries {
    let start = NaiveDate::from_ymd_opt(2020, 1, 2).unwrap();
    TimeSeries::from_points(
        (0..n)
            .map(|i| TimePoint {
                date: start + Duration::days(i as i64 * step_days),
                value: base + (i as f64 * 0.1).sin() * base * 0.05,
            })
            .collect(),
    )
}

fn bench_yoy(c: &mut Criterion) {
    let daily = make_series(800, 1, 500.0);
    c.bench_function("yoy_800_daily_points", |b| {
        b.iter(|| metrics::yoy(black_box(&daily)))
    });
}

fn bench_net_liquidity_merge(c: &mut Criterion) {
    let bs = make_series(115, 7, 7000.0); // weekly
    let rrp = make_series(800, 1, 500.0); // daily
    let tga = make_series(115, 7, 700.0); // weekly
    c.bench_function("net_liquidity_merge_mixed_cadence", |b| {
        b.iter(|| composite::net_liquidity(black_box(&bs), black_box(&rrp), black_box(&tga)))
    });
}

fn bench_beta(c: &mut Criterion) {
    let net = make_series(365, 1, 5800.0);
    let prices: BTreeMap<NaiveDate, f64> = net
        .points()
        .iter()
        .map(|p| (p.date, p.value * 8.0 + 1000.0))
        .collect();
    c.bench_function("beta_365_pairs", |b| {
        b.iter(|| metrics::beta(black_box(&net), black_box(&prices)))
    });
}

criterion_group!(benches, bench_yoy, bench_net_liquidity_merge, bench_beta);
criterion_main!(benches);
