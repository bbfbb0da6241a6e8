//! Indicator records — the store schema plus lookup and in-place apply.
//!
//! The store schema is open: the display layer owns fields this updater has
//! never heard of, and they must survive a load/update/save cycle untouched.
//! Well-known `meta` fields are typed; everything else rides in an explicit
//! extension map.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// One dashboard indicator as persisted in the store file.
///
/// Unknown top-level fields round-trip through `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorRecord {
    pub name: String,

    /// Most recently computed value, rounded to the indicator's precision.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<IndicatorMeta>,

    /// Human-readable description, rewritten wholly on every update.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// Auxiliary indicator fields. All optional; absent fields are omitted from
/// the persisted JSON. Keys the updater does not know ride in `extra` and
/// round-trip unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndicatorMeta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_date: Option<NaiveDate>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub window: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub coins: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sample_growth: Option<Vec<f64>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub impulse_90d_pct: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub beta_vs_btc: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub band_floor: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub band_ceiling: Option<f64>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl IndicatorMeta {
    /// Shallow-merge `patch` into `self`: set fields of the patch overwrite,
    /// unset fields leave the target untouched, and unrelated extension keys
    /// survive.
    pub fn merge(&mut self, patch: IndicatorMeta) {
        if let Some(v) = patch.source {
            self.source = Some(v);
        }
        if let Some(v) = patch.last_date {
            self.last_date = Some(v);
        }
        if let Some(v) = patch.window {
            self.window = Some(v);
        }
        if let Some(v) = patch.coins {
            self.coins = Some(v);
        }
        if let Some(v) = patch.sample_growth {
            self.sample_growth = Some(v);
        }
        if let Some(v) = patch.impulse_90d_pct {
            self.impulse_90d_pct = Some(v);
        }
        if let Some(v) = patch.beta_vs_btc {
            self.beta_vs_btc = Some(v);
        }
        if let Some(v) = patch.band_floor {
            self.band_floor = Some(v);
        }
        if let Some(v) = patch.band_ceiling {
            self.band_ceiling = Some(v);
        }
        for (key, value) in patch.extra {
            self.extra.insert(key, value);
        }
    }
}

impl IndicatorRecord {
    /// Apply a freshly computed value in place: round into `current`,
    /// shallow-merge the meta patch, rewrite `detail` wholly.
    ///
    /// Idempotent — re-applying identical inputs leaves the record unchanged.
    pub fn apply(
        &mut self,
        value: f64,
        meta_patch: IndicatorMeta,
        detail: impl Into<String>,
        precision: u32,
    ) {
        self.current = Some(round_to(value, precision));
        self.meta
            .get_or_insert_with(IndicatorMeta::default)
            .merge(meta_patch);
        self.detail = Some(detail.into());
    }
}

/// Round to `precision` decimal places, half away from zero.
pub fn round_to(value: f64, precision: u32) -> f64 {
    let factor = 10f64.powi(precision as i32);
    (value * factor).round() / factor
}

/// First record whose name contains `keyword`, case-insensitively.
///
/// List order decides ambiguity; a record is never created here.
pub fn locate<'a>(records: &'a [IndicatorRecord], keyword: &str) -> Option<&'a IndicatorRecord> {
    let needle = keyword.to_lowercase();
    records
        .iter()
        .find(|r| r.name.to_lowercase().contains(&needle))
}

/// Mutable variant of [`locate`] for in-place updates.
pub fn locate_mut<'a>(
    records: &'a mut [IndicatorRecord],
    keyword: &str,
) -> Option<&'a mut IndicatorRecord> {
    let needle = keyword.to_lowercase();
    records
        .iter_mut()
        .find(|r| r.name.to_lowercase().contains(&needle))
}
