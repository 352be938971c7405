//! File I/O for the ledger's JSON files
//!
//! Reads tolerate a missing file (an empty ledger); writes go through a
//! temp file and a rename so a crash never leaves a half-written ledger.

use std::fmt::Display;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};

use crate::error::FinTrackError;

/// Read JSON from a file, returning a default value if the file doesn't exist
pub fn read_json<T, P>(path: P) -> Result<T, FinTrackError>
where
    T: DeserializeOwned + Default,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if !path.exists() {
        return Ok(T::default());
    }

    let file = File::open(path).map_err(|e| ledger_file_error("open", path, e))?;

    let reader = BufReader::new(file);
    serde_json::from_reader(reader).map_err(|e| ledger_file_error("parse", path, e))
}

/// Write JSON to a file atomically (write to temp, then rename)
///
/// The file is either completely written or not modified at all.
pub fn write_json_atomic<T, P>(path: P, data: &T) -> Result<(), FinTrackError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            FinTrackError::Storage(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    // Same directory, so the rename stays on one filesystem
    let temp_path = path.with_extension("json.tmp");

    let file = File::create(&temp_path).map_err(|e| ledger_file_error("create", &temp_path, e))?;

    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, data)
        .map_err(|e| ledger_file_error("serialize", path, e))?;

    writer
        .flush()
        .map_err(|e| ledger_file_error("write", path, e))?;

    writer
        .get_ref()
        .sync_all()
        .map_err(|e| ledger_file_error("sync", path, e))?;

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        ledger_file_error("replace", path, e)
    })?;

    tracing::debug!(path = %path.display(), "wrote ledger file");
    Ok(())
}

fn ledger_file_error(action: &str, path: &Path, err: impl Display) -> FinTrackError {
    FinTrackError::Storage(format!(
        "Failed to {} ledger file {}: {}",
        action,
        path.display(),
        err
    ))
}
