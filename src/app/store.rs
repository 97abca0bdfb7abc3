// Rollcall - app/store.rs
//
// The attendance log file: whole-file load and whole-file rewrite.
//
// Design principles:
// - The file on disk is the only state. Nothing is cached between calls;
//   every report reloads it.
// - `load` never fails: a missing or corrupt log reads as empty.
//   `load_checked` reports the difference for callers that rewrite the file.
// - Writes go through `platform::fs::write_atomic`, so a crash mid-write
//   leaves the previous log intact. One writer process at a time is assumed.

use crate::core::model::AttendanceRecord;
use crate::platform::fs::write_atomic;
use crate::util::error::StoreError;
use std::path::{Path, PathBuf};

/// Handle on an attendance log JSON file.
#[derive(Debug, Clone)]
pub struct LogStore {
    path: PathBuf,
}

impl LogStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load all records, treating a missing or unreadable log as empty.
    pub fn load(&self) -> Vec<AttendanceRecord> {
        match self.load_checked() {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!(error = %e, "Attendance log unusable; treating as empty");
                Vec::new()
            }
        }
    }

    /// Load all records. A missing file is an empty log; anything else that
    /// stops the file being read as a record array is an error.
    pub fn load_checked(&self) -> Result<Vec<AttendanceRecord>, StoreError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "No attendance log yet");
                return Ok(Vec::new());
            }
            Err(source) => {
                return Err(StoreError::Io {
                    path: self.path.clone(),
                    operation: "read",
                    source,
                })
            }
        };

        let records: Vec<AttendanceRecord> =
            serde_json::from_str(&content).map_err(|source| StoreError::Json {
                path: self.path.clone(),
                source,
            })?;

        tracing::debug!(
            path = %self.path.display(),
            records = records.len(),
            "Attendance log loaded"
        );
        Ok(records)
    }

    /// Replace the whole log with `records`.
    ///
    /// Output is pretty-printed with a 2-space indent and non-ASCII names are
    /// written as-is.
    pub fn write(&self, records: &[AttendanceRecord]) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(records).map_err(|source| StoreError::Json {
            path: self.path.clone(),
            source,
        })?;

        write_atomic(&self.path, json.as_bytes()).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            operation: "write",
            source,
        })?;

        tracing::debug!(
            path = %self.path.display(),
            records = records.len(),
            "Attendance log written"
        );
        Ok(())
    }
}
