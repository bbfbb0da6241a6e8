//! Seeded synthetic data for offline runs and tests.
//!
//! Same seed + same series name → byte-identical output, so offline smoke
//! runs are reproducible.

use crate::series::{TimePoint, TimeSeries};
use chrono::{Duration, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[derive(Debug, Clone)]
pub struct SyntheticData {
    seed: u64,
}

impl SyntheticData {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    fn rng_for(&self, name: &str) -> StdRng {
        let name_hash = name
            .bytes()
            .fold(0u64, |h, b| h.wrapping_mul(31).wrapping_add(b as u64));
        StdRng::seed_from_u64(self.seed ^ name_hash)
    }

    /// Multiplicative random walk with `days` daily points ending at `end`.
    /// Values stay positive.
    pub fn random_walk(&self, name: &str, end: NaiveDate, days: usize, base: f64) -> TimeSeries {
        let mut rng = self.rng_for(name);
        let mut value = base;
        let start = end - Duration::days(days.saturating_sub(1) as i64);

        let points = (0..days)
            .map(|i| {
                value *= 1.0 + rng.gen_range(-0.02..0.02);
                TimePoint {
                    date: start + Duration::days(i as i64),
                    value,
                }
            })
            .collect();
        TimeSeries::from_points(points)
    }

    /// Zero-centered daily noise in `[-amplitude, amplitude]` — flows, not levels.
    pub fn noise_series(&self, name: &str, end: NaiveDate, days: usize, amplitude: f64) -> TimeSeries {
        let mut rng = self.rng_for(name);
        let start = end - Duration::days(days.saturating_sub(1) as i64);

        let points = (0..days)
            .map(|i| TimePoint {
                date: start + Duration::days(i as i64),
                value: rng.gen_range(-amplitude..amplitude),
            })
            .collect();
        TimeSeries::from_points(points)
    }

    /// A single deterministic scalar in `[lo, hi)`.
    pub fn scalar_in(&self, name: &str, lo: f64, hi: f64) -> f64 {
        self.rng_for(name).gen_range(lo..hi)
    }
}
