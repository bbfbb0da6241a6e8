//! Derived scalar metrics over a time series.
//!
//! Every metric here is pure: series in, `Option<f64>` out. `None` means the
//! computation was indeterminate (empty series, zero denominator, too few
//! regression pairs) — not an error. The one deliberate exception is
//! [`z_score`], which falls back to `0.0` instead; see its docs.

use crate::series::TimeSeries;
use chrono::{Duration, NaiveDate};
use std::collections::BTreeMap;

/// Minimum paired samples for a beta estimate to be meaningful.
pub const MIN_BETA_SAMPLES: usize = 20;

/// Year-over-year fractional change: `(latest − value_365d_ago) / |value_365d_ago|`.
///
/// `0.1` reads as +10%. `None` when the series is empty or the year-ago
/// reference is zero.
pub fn yoy(series: &TimeSeries) -> Option<f64> {
    change_over(series, 365)
}

/// Fractional change vs the value nearest `days` before the latest point.
///
/// Shorter horizons (e.g. 90 days) serve as impulse readings alongside YoY.
/// A single-point series is indeterminate: the only reference candidate is
/// the latest point itself, which would always read as zero change.
pub fn change_over(series: &TimeSeries, days: i64) -> Option<f64> {
    if series.len() < 2 {
        return None;
    }
    let latest = series.latest()?;
    let prev = series.value_near(latest.date - Duration::days(days))?;
    if prev == 0.0 {
        return None;
    }
    Some((latest.value - prev) / prev.abs())
}

/// Z-score of the last sample against the whole sequence, using the
/// population standard deviation.
///
/// An empty sequence or zero variance yields `0.0` — a neutral reading.
/// Unlike [`yoy`], this never reports indeterminate; callers rely on the
/// asymmetry.
pub fn z_score(samples: &[f64]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    let n = samples.len() as f64;
    let mean = samples.iter().sum::<f64>() / n;
    let variance = samples.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    if variance == 0.0 {
        return 0.0;
    }
    (samples[samples.len() - 1] - mean) / variance.sqrt()
}

/// Regression slope of `series` against a reference price map, over the
/// trailing 365-day window ending at the series' last date.
///
/// Pairing uses exact date matches only — points without a price that day
/// are dropped, not approximated. Requires at least [`MIN_BETA_SAMPLES`]
/// pairs; computed as population covariance over population variance.
pub fn beta(series: &TimeSeries, prices: &BTreeMap<NaiveDate, f64>) -> Option<f64> {
    let end = series.latest()?.date;
    let start = end - Duration::days(365);

    let mut xs = Vec::new();
    let mut ys = Vec::new();
    for p in series.points() {
        if p.date < start || p.date > end {
            continue;
        }
        if let Some(&price) = prices.get(&p.date) {
            xs.push(p.value);
            ys.push(price);
        }
    }

    if xs.len() < MIN_BETA_SAMPLES {
        return None;
    }

    let n = xs.len() as f64;
    let mean_x = xs.iter().sum::<f64>() / n;
    let mean_y = ys.iter().sum::<f64>() / n;
    let cov = xs
        .iter()
        .zip(&ys)
        .map(|(x, y)| (x - mean_x) * (y - mean_y))
        .sum::<f64>()
        / n;
    let var_x = xs.iter().map(|x| (x - mean_x).powi(2)).sum::<f64>() / n;
    if var_x == 0.0 {
        return None;
    }
    Some(cov / var_x)
}

/// Total of the values on the most recent `days` distinct dates.
///
/// The series invariant (one point per date, ascending) makes this the sum
/// of the last `days` points. `None` for an empty series.
pub fn trailing_total(series: &TimeSeries, days: usize) -> Option<f64> {
    if series.is_empty() {
        return None;
    }
    let points = series.points();
    let start = points.len().saturating_sub(days);
    Some(points[start..].iter().map(|p| p.value).sum())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::TimePoint;

    fn day(offset: i64) -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 1, 1).unwrap() + Duration::days(offset)
    }

    fn series(points: &[(i64, f64)]) -> TimeSeries {
        TimeSeries::from_points(
            points
                .iter()
                .map(|&(offset, value)| TimePoint {
                    date: day(offset),
                    value,
                })
                .collect(),
        )
    }

    fn assert_approx(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-10,
            "assert_approx failed: actual={actual}, expected={expected}"
        );
    }

    #[test]
    fn yoy_empty_is_indeterminate() {
        assert_eq!(yoy(&TimeSeries::new()), None);
    }

    #[test]
    fn yoy_single_point_is_indeterminate() {
        let s = series(&[(365, 5.0)]);
        assert_eq!(yoy(&s), None);
    }

    #[test]
    fn yoy_plus_ten_percent() {
        let s = series(&[(0, 100.0), (365, 110.0)]);
        assert_approx(yoy(&s).unwrap(), 0.10);
    }

    #[test]
    fn yoy_negative_reference_uses_absolute_value() {
        let s = series(&[(0, -100.0), (365, -90.0)]);
        assert_approx(yoy(&s).unwrap(), 0.10);
    }

    #[test]
    fn yoy_zero_reference_is_indeterminate() {
        let s = series(&[(0, 0.0), (365, 10.0)]);
        assert_eq!(yoy(&s), None);
    }

    #[test]
    fn change_over_ninety_days() {
        let s = series(&[(0, 50.0), (275, 100.0), (365, 120.0)]);
        // reference = nearest to day 275
        assert_approx(change_over(&s, 90).unwrap(), 0.20);
    }

    #[test]
    fn change_over_ignores_points_outside_window() {
        let near = series(&[(275, 100.0), (365, 120.0)]);
        let with_history = series(&[(0, 1.0), (100, 2.0), (275, 100.0), (365, 120.0)]);
        assert_eq!(change_over(&near, 90), change_over(&with_history, 90));
    }

    #[test]
    fn z_score_empty_is_zero() {
        assert_eq!(z_score(&[]), 0.0);
    }

    #[test]
    fn z_score_zero_variance_is_zero() {
        assert_eq!(z_score(&[3.0, 3.0, 3.0]), 0.0);
    }

    #[test]
    fn z_score_known_value() {
        // samples 1..=5: mean 3, population variance 2
        let samples = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert_approx(z_score(&samples), 2.0 / 2.0_f64.sqrt());
    }

    #[test]
    fn beta_requires_twenty_pairs() {
        let s = series(&(0..19).map(|i| (i, i as f64)).collect::<Vec<_>>());
        let prices: BTreeMap<NaiveDate, f64> =
            (0..19).map(|i| (day(i), 2.0 * i as f64)).collect();
        assert_eq!(beta(&s, &prices), None);
    }

    #[test]
    fn beta_of_perfectly_linear_pairs() {
        let s = series(&(0..30).map(|i| (i, i as f64)).collect::<Vec<_>>());
        let prices: BTreeMap<NaiveDate, f64> =
            (0..30).map(|i| (day(i), 3.0 * i as f64 + 7.0)).collect();
        assert_approx(beta(&s, &prices).unwrap(), 3.0);
    }

    #[test]
    fn beta_drops_unpaired_points() {
        // 30 series points but only 25 priced days, still enough pairs
        let s = series(&(0..30).map(|i| (i, i as f64)).collect::<Vec<_>>());
        let prices: BTreeMap<NaiveDate, f64> =
            (0..25).map(|i| (day(i), 3.0 * i as f64)).collect();
        assert_approx(beta(&s, &prices).unwrap(), 3.0);
    }

    #[test]
    fn beta_zero_variance_is_indeterminate() {
        let s = series(&(0..30).map(|i| (i, 42.0)).collect::<Vec<_>>());
        let prices: BTreeMap<NaiveDate, f64> =
            (0..30).map(|i| (day(i), i as f64)).collect();
        assert_eq!(beta(&s, &prices), None);
    }

    #[test]
    fn beta_restricts_to_trailing_year() {
        // identical slope inside the window; garbage far in the past
        let mut points: Vec<(i64, f64)> = (500..530).map(|i| (i, i as f64)).collect();
        points.push((0, 1_000_000.0));
        let s = series(&points);
        let prices: BTreeMap<NaiveDate, f64> = (500..530)
            .map(|i| (day(i), 2.0 * i as f64))
            .chain(std::iter::once((day(0), -5.0)))
            .collect();
        assert_approx(beta(&s, &prices).unwrap(), 2.0);
    }

    #[test]
    fn trailing_total_sums_most_recent_days() {
        let s = series(&[(0, 1.0), (1, 2.0), (2, 3.0), (3, 4.0), (4, 5.0), (5, 6.0)]);
        assert_approx(trailing_total(&s, 5).unwrap(), 20.0);
        assert_approx(trailing_total(&s, 100).unwrap(), 21.0);
        assert_eq!(trailing_total(&TimeSeries::new(), 5), None);
    }
}
