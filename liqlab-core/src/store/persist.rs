//! Whole-file JSON persistence for the indicator store.
//!
//! The store is rewritten wholesale once per run. Writes go to a sibling
//! temp file first and rename into place, so a crash mid-write can never
//! leave a half-written store behind.

use super::record::IndicatorRecord;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("store I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Load the indicator store from `path`.
///
/// A missing, unreadable, or malformed file degrades to an empty store: the
/// run then has nothing to locate and becomes a no-op instead of an abort.
pub fn load_store(path: &Path) -> Vec<IndicatorRecord> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            eprintln!(
                "WARNING: store {} not readable ({e}); treating as empty",
                path.display()
            );
            return Vec::new();
        }
    };

    match serde_json::from_str(&content) {
        Ok(records) => records,
        Err(e) => {
            eprintln!(
                "WARNING: store {} is malformed ({e}); treating as empty",
                path.display()
            );
            Vec::new()
        }
    }
}

/// Persist the whole store as a single snapshot.
///
/// Serializes to pretty JSON, writes a `.tmp` sibling, then atomically
/// renames it over the target.
pub fn save_store(path: &Path, records: &[IndicatorRecord]) -> Result<(), StoreError> {
    let json = serde_json::to_string_pretty(records)?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, json.as_bytes())?;

    if let Err(e) = fs::rename(&tmp, path) {
        // Clean up the temp file on rename failure
        let _ = fs::remove_file(&tmp);
        return Err(StoreError::Io(e));
    }
    Ok(())
}
