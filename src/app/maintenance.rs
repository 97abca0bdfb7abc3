// Rollcall - app/maintenance.rs
//
// Housekeeping on the attendance log: duplicate removal and timestamped
// backups.

use crate::app::store::LogStore;
use crate::util::constants::{BACKUP_FILE_PREFIX, BACKUP_TIMESTAMP_FORMAT};
use crate::util::error::MaintenanceError;
use chrono::{Local, NaiveDateTime};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Drop records whose (name, timestamp, action) was already seen, keeping the
/// first occurrence and the original order. Returns the number removed.
///
/// A corrupt log is reported as an error and left untouched. When nothing is
/// removed the file is not rewritten.
pub fn dedup(store: &LogStore) -> Result<usize, MaintenanceError> {
    let records = store.load_checked()?;

    let mut seen = HashSet::new();
    let kept: Vec<_> = records
        .iter()
        .filter(|record| seen.insert(record.key()))
        .cloned()
        .collect();

    let removed = records.len() - kept.len();
    if removed > 0 {
        store.write(&kept)?;
    }

    tracing::info!(
        path = %store.path().display(),
        removed,
        remaining = kept.len(),
        "Duplicate entries cleaned"
    );
    Ok(removed)
}

/// Copy the current log to `<dir>/attendance_backup_<YYYYMMDD_HHMMSS>.json`.
pub fn backup(store: &LogStore, dir: &Path) -> Result<PathBuf, MaintenanceError> {
    backup_at(store, dir, Local::now().naive_local())
}

/// [`backup`] with an explicit generation time.
///
/// Two backups generated within the same second share a file name; the
/// later one replaces the earlier.
pub fn backup_at(
    store: &LogStore,
    dir: &Path,
    generated: NaiveDateTime,
) -> Result<PathBuf, MaintenanceError> {
    std::fs::create_dir_all(dir).map_err(|source| MaintenanceError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let file_name = format!(
        "{BACKUP_FILE_PREFIX}{}.json",
        generated.format(BACKUP_TIMESTAMP_FORMAT)
    );
    let backup_path = dir.join(file_name);

    let records = store.load();
    LogStore::new(&backup_path).write(&records)?;

    tracing::info!(
        source = %store.path().display(),
        backup = %backup_path.display(),
        records = records.len(),
        "Backup written"
    );
    Ok(backup_path)
}
