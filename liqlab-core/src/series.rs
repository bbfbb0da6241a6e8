//! Calendar-day time series and nearest-date lookup.
//!
//! Source series arrive at wildly different cadences (daily market data,
//! weekly balance-sheet releases). Rather than interpolating, downstream
//! metrics approximate: a lookup returns the value of the observation
//! closest in calendar days to the requested date.

use chrono::NaiveDate;

/// A single dated observation. The value is a finite real; the date is a
/// calendar day with no time-of-day component.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimePoint {
    pub date: NaiveDate,
    pub value: f64,
}

/// An ordered series of observations, ascending by date, one point per date.
///
/// Construction establishes the invariants; every computation that reads
/// "the latest point" relies on the last element holding the maximum date.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimeSeries {
    points: Vec<TimePoint>,
}

impl TimeSeries {
    pub fn new() -> Self {
        Self { points: Vec::new() }
    }

    /// Build a series from arbitrary-order points. Sorts ascending by date
    /// and drops duplicate dates, keeping the first occurrence.
    pub fn from_points(mut points: Vec<TimePoint>) -> Self {
        points.sort_by_key(|p| p.date);
        points.dedup_by_key(|p| p.date);
        Self { points }
    }

    pub fn points(&self) -> &[TimePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The most recent observation.
    pub fn latest(&self) -> Option<TimePoint> {
        self.points.last().copied()
    }

    /// Value of the point with minimum absolute day-distance to `target`.
    ///
    /// Equidistant candidates resolve to the chronologically earlier point.
    /// `None` only when the series is empty.
    pub fn value_near(&self, target: NaiveDate) -> Option<f64> {
        let mut best: Option<(i64, f64)> = None;
        for p in &self.points {
            let dist = (p.date - target).num_days().abs();
            match best {
                Some((best_dist, _)) if dist >= best_dist => {}
                _ => best = Some((dist, p.value)),
            }
        }
        best.map(|(_, value)| value)
    }
}
