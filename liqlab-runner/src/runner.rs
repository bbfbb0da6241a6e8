//! The update run: load store, update every registry entry in order,
//! persist exactly once.

use crate::config::UpdateConfig;
use crate::update::{update_indicator, RunContext, UpdateOutcome};
use liqlab_core::data::DataSources;
use liqlab_core::store::{self, StoreError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UpdateError {
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

/// Per-indicator progress reporting, pluggable for CLI and tests.
pub trait UpdateProgress {
    fn on_indicator(&self, keyword: &str, outcome: &UpdateOutcome);
    fn on_run_complete(&self, summary: &UpdateSummary);
}

/// Default reporter: one line per indicator on stdout, warnings on stderr.
pub struct StdoutProgress;

impl UpdateProgress for StdoutProgress {
    fn on_indicator(&self, keyword: &str, outcome: &UpdateOutcome) {
        match outcome {
            UpdateOutcome::Updated { value } => {
                println!("[info] {keyword} updated: {value}");
            }
            UpdateOutcome::FetchFailed(e) => {
                eprintln!("[warn] {keyword} fetch failed; previous value retained: {e}");
            }
            UpdateOutcome::Indeterminate(what) => {
                eprintln!("[warn] {keyword} indeterminate ({what}); skipped");
            }
            UpdateOutcome::RecordMissing => {
                eprintln!("[warn] {keyword} not found in store; skipped");
            }
        }
    }

    fn on_run_complete(&self, summary: &UpdateSummary) {
        println!(
            "Update complete: {}/{} indicators updated, {} skipped",
            summary.updated, summary.total, summary.skipped
        );
    }
}

/// What the run did, per indicator and in total.
#[derive(Debug)]
pub struct UpdateSummary {
    pub total: usize,
    pub updated: usize,
    pub skipped: usize,
    pub outcomes: Vec<(String, UpdateOutcome)>,
}

impl UpdateSummary {
    pub fn all_updated(&self) -> bool {
        self.skipped == 0
    }
}

/// Run every indicator update in registry order, then persist the store as
/// one atomic snapshot.
///
/// A missing or unreadable store degrades to a no-op: nothing to locate,
/// nothing written. Individual indicator failures are recorded in the
/// summary and never abort the remaining updates.
pub fn run_update(
    config: &UpdateConfig,
    sources: &dyn DataSources,
    ctx: &RunContext,
    progress: &dyn UpdateProgress,
) -> Result<UpdateSummary, UpdateError> {
    let mut records = store::load_store(&config.store_path);

    if records.is_empty() {
        eprintln!(
            "[warn] store {} is empty or missing; nothing to update",
            config.store_path.display()
        );
        let summary = UpdateSummary {
            total: 0,
            updated: 0,
            skipped: 0,
            outcomes: Vec::new(),
        };
        progress.on_run_complete(&summary);
        return Ok(summary);
    }

    let mut outcomes = Vec::with_capacity(config.indicators.len());
    let mut updated = 0;
    let mut skipped = 0;

    for spec in &config.indicators {
        let outcome = update_indicator(&mut records, spec, sources, ctx);
        progress.on_indicator(&spec.keyword, &outcome);
        if outcome.is_updated() {
            updated += 1;
        } else {
            skipped += 1;
        }
        outcomes.push((spec.keyword.clone(), outcome));
    }

    store::save_store(&config.store_path, &records)?;

    let summary = UpdateSummary {
        total: config.indicators.len(),
        updated,
        skipped,
        outcomes,
    };
    progress.on_run_complete(&summary);
    Ok(summary)
}
