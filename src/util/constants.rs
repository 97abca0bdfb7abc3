// Rollcall - util/constants.rs
//
// Single source of truth for all named constants, limits, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "Rollcall";

/// Application identifier used for config/data directories.
pub const APP_ID: &str = "Rollcall";

/// Current application version (updated by release script).
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Attendance store
// =============================================================================

/// Default attendance log location, relative to the working directory.
pub const DEFAULT_LOG_FILE: &str = "attendance_logs/attendance.json";

/// Default directory receiving timestamped backups.
pub const DEFAULT_BACKUP_DIR: &str = "backup";

/// Prefix of every backup file name.
pub const BACKUP_FILE_PREFIX: &str = "attendance_backup_";

/// chrono format embedded in backup file names (generation time).
pub const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Calendar date format of the record `date` field and of query bounds.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Format of the record `timestamp` field.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Format of a standard start/end time of day.
pub const STANDARD_TIME_FORMAT: &str = "%H:%M";

/// Format used when reporting arrival and departure times.
pub const CLOCK_TIME_FORMAT: &str = "%H:%M:%S";

// =============================================================================
// Schedule
// =============================================================================

/// Standard arrival time; earliest IN after this is late.
pub const DEFAULT_STANDARD_START: &str = "08:30";

/// Standard departure time; latest OUT before this is early.
pub const DEFAULT_STANDARD_END: &str = "17:30";

// =============================================================================
// Face images
// =============================================================================

/// Target width of resized face images.
pub const DEFAULT_IMAGE_WIDTH: u32 = 105;

/// Target height of resized face images.
pub const DEFAULT_IMAGE_HEIGHT: u32 = 105;

/// Images narrower or shorter than this (px) fail validation.
pub const DEFAULT_MIN_IMAGE_DIMENSION: u32 = 50;

/// Hard upper bound on the configurable resize target (px).
pub const MAX_IMAGE_DIMENSION: u32 = 4_096;

/// File extensions (lowercase, no dot) picked up by batch resizing.
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

// =============================================================================
// Export
// =============================================================================

/// Worksheet holding the raw filtered records.
pub const DETAIL_SHEET_NAME: &str = "Detail";

/// Worksheet holding the per-person totals.
pub const SUMMARY_SHEET_NAME: &str = "Summary";

/// Column headers of the detail sheet and CSV export.
pub const DETAIL_HEADERS: [&str; 4] = ["name", "timestamp", "date", "action"];

/// Localised column headers of the summary sheet: name, total days, total hours.
pub const SUMMARY_HEADERS: [&str; 3] = ["Tên", "Tổng ngày làm", "Tổng giờ làm"];

// =============================================================================
// Logging
// =============================================================================

/// Default log level when neither RUST_LOG, --debug nor config sets one.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Accepted values for `[logging] level`.
pub const VALID_LOG_LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace"];

// =============================================================================
// File names
// =============================================================================

/// Configuration file name inside the platform config directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";
