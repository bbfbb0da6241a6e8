//! Composite series built by date-union merge of three sources.
//!
//! The sources are sampled at different frequencies (daily reverse-repo,
//! weekly balance sheet), so the composite takes the union of all observed
//! dates and approximates each source at every date via nearest-date lookup.

use crate::series::{TimePoint, TimeSeries};
use std::collections::BTreeSet;

/// Merge three sources into one composite series.
///
/// For each date present in any source (ascending), each source is read via
/// nearest-date lookup — an empty source contributes `0.0` — and `combine`
/// produces the composite value. The output satisfies all `TimeSeries`
/// invariants.
pub fn merge<F>(a: &TimeSeries, b: &TimeSeries, c: &TimeSeries, combine: F) -> TimeSeries
where
    F: Fn(f64, f64, f64) -> f64,
{
    let mut dates = BTreeSet::new();
    for source in [a, b, c] {
        for p in source.points() {
            dates.insert(p.date);
        }
    }

    let points = dates
        .into_iter()
        .map(|date| TimePoint {
            date,
            value: combine(
                a.value_near(date).unwrap_or(0.0),
                b.value_near(date).unwrap_or(0.0),
                c.value_near(date).unwrap_or(0.0),
            ),
        })
        .collect();

    TimeSeries::from_points(points)
}

/// Net liquidity: balance-sheet size minus reverse-repo balance minus
/// treasury general account balance.
pub fn net_liquidity(
    balance_sheet: &TimeSeries,
    reverse_repo: &TimeSeries,
    treasury_account: &TimeSeries,
) -> TimeSeries {
    merge(balance_sheet, reverse_repo, treasury_account, |bs, rrp, tga| {
        bs - rrp - tga
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    fn day(offset: i64) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + Duration::days(offset)
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

    #[test]
    fn merge_single_shared_date() {
        let a = series(&[(0, 10.0)]);
        let b = series(&[(0, 4.0)]);
        let c = series(&[(0, 1.0)]);
        let merged = merge(&a, &b, &c, |x, y, z| x - y - z);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged.points()[0].value, 5.0);
        assert_eq!(merged.points()[0].date, day(0));
    }

    #[test]
    fn merge_unions_heterogeneous_cadences() {
        // weekly vs daily: every observed date appears exactly once, ascending
        let weekly = series(&[(0, 100.0), (7, 107.0)]);
        let daily = series(&[(0, 1.0), (1, 2.0), (2, 3.0)]);
        let merged = merge(&weekly, &daily, &TimeSeries::new(), |w, d, _| w + d);

        let dates: Vec<_> = merged.points().iter().map(|p| p.date).collect();
        assert_eq!(dates, vec![day(0), day(1), day(2), day(7)]);

        // day 1 approximates the weekly source by its nearest release (day 0)
        assert_eq!(merged.points()[1].value, 102.0);
        // day 7 approximates the daily source by its day-2 point
        assert_eq!(merged.points()[3].value, 110.0);
    }

    #[test]
    fn merge_empty_source_contributes_zero() {
        let a = series(&[(0, 10.0)]);
        let merged = net_liquidity(&a, &TimeSeries::new(), &TimeSeries::new());
        assert_eq!(merged.points()[0].value, 10.0);
    }

    #[test]
    fn net_liquidity_subtracts_drains() {
        let bs = series(&[(0, 7000.0)]);
        let rrp = series(&[(0, 500.0)]);
        let tga = series(&[(0, 700.0)]);
        let net = net_liquidity(&bs, &rrp, &tga);
        assert_eq!(net.points()[0].value, 5800.0);
    }
}
