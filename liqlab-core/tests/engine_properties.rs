//! Property tests for engine invariants.
//!
//! Uses proptest to verify:
//! 1. Nearest-date lookup always returns a value present in the series
//! 2. Composite merge output is exactly the date union, ascending and unique
//! 3. Applying an update twice is idempotent
//! 4. Z-score of a constant sequence is zero

use chrono::{Duration, NaiveDate};
use proptest::prelude::*;
use std::collections::BTreeSet;

use liqlab_core::composite;
use liqlab_core::metrics;
use liqlab_core::series::{TimePoint, TimeSeries};
use liqlab_core::store::{IndicatorMeta, IndicatorRecord};

fn base_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, 1, 1).unwrap()
}

// ── Strategies (proptest) ────────────────────────────────────────────

fn arb_series(max_len: usize) -> impl Strategy<Value = TimeSeries> {
    prop::collection::vec((0i64..2000, -1e6..1e6f64), 0..max_len).prop_map(|raw| {
        TimeSeries::from_points(
            raw.into_iter()
                .map(|(offset, value)| TimePoint {
                    date: base_date() + Duration::days(offset),
                    value,
                })
                .collect(),
        )
    })
}

// ── 1. Lookup returns a member ───────────────────────────────────────

proptest! {
    /// `value_near` never invents values: the result is always the value of
    /// some point in the series, and `None` only for an empty series.
    #[test]
    fn value_near_returns_member(series in arb_series(64), offset in 0i64..2000) {
        let target = base_date() + Duration::days(offset);
        match series.value_near(target) {
            Some(v) => prop_assert!(series.points().iter().any(|p| p.value == v)),
            None => prop_assert!(series.is_empty()),
        }
    }

    /// An exact-date hit returns exactly that point's value.
    #[test]
    fn value_near_exact_hit(series in arb_series(64), index in 0usize..64) {
        if !series.is_empty() {
            let p = series.points()[index % series.len()];
            prop_assert_eq!(series.value_near(p.date), Some(p.value));
        }
    }
}

// ── 2. Merge output is the date union ────────────────────────────────

proptest! {
    #[test]
    fn merge_dates_are_exact_union(
        a in arb_series(32),
        b in arb_series(32),
        c in arb_series(32),
    ) {
        let merged = composite::merge(&a, &b, &c, |x, y, z| x + y + z);

        let expected: BTreeSet<NaiveDate> = [&a, &b, &c]
            .iter()
            .flat_map(|s| s.points().iter().map(|p| p.date))
            .collect();
        let actual: Vec<NaiveDate> = merged.points().iter().map(|p| p.date).collect();

        // exactly the union, ascending, no duplicates
        prop_assert_eq!(actual, expected.into_iter().collect::<Vec<_>>());
    }
}

// ── 3. Apply idempotence ─────────────────────────────────────────────

proptest! {
    #[test]
    fn apply_is_idempotent(
        value in -1e9..1e9f64,
        precision in 0u32..6,
        floor in 0.0..10.0f64,
    ) {
        let mut record = IndicatorRecord {
            name: "Net Liquidity 綜合指標".to_string(),
            current: None,
            meta: None,
            detail: None,
            extra: Default::default(),
        };
        let patch = IndicatorMeta {
            source: Some("FRED".into()),
            band_floor: Some(floor),
            ..Default::default()
        };

        record.apply(value, patch.clone(), "detail", precision);
        let once = record.clone();
        record.apply(value, patch, "detail", precision);

        prop_assert_eq!(record, once);
    }
}

// ── 4. Z-score neutrality ────────────────────────────────────────────

proptest! {
    #[test]
    fn z_score_of_constant_sequence_is_zero(x in -1e6..1e6f64, n in 1usize..50) {
        let samples = vec![x; n];
        prop_assert_eq!(metrics::z_score(&samples), 0.0);
    }
}
