// Rollcall - platform/config.rs
//
// Platform-specific directory resolution and config.toml loading with
// startup validation.
//
// Uses the `directories` crate for XDG (Linux), AppData (Windows),
// Library (macOS) compliance.

use crate::util::constants;
use crate::util::error::ConfigError;
use chrono::NaiveTime;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Resolved platform paths for Rollcall configuration.
#[derive(Debug, Clone)]
pub struct PlatformPaths {
    /// Configuration directory (e.g. ~/.config/rollcall/ or %APPDATA%\Rollcall\config\)
    pub config_dir: PathBuf,
}

impl PlatformPaths {
    /// Resolve platform-appropriate paths.
    ///
    /// Falls back to current directory if platform dirs cannot be determined.
    pub fn resolve() -> Self {
        if let Some(proj_dirs) = ProjectDirs::from("", "", constants::APP_ID) {
            let config_dir = proj_dirs.config_dir().to_path_buf();
            tracing::debug!(config = %config_dir.display(), "Platform paths resolved");
            Self { config_dir }
        } else {
            tracing::warn!("Could not determine platform directories, using current directory");
            Self {
                config_dir: PathBuf::from("."),
            }
        }
    }

    /// Default location of config.toml.
    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join(constants::CONFIG_FILE_NAME)
    }
}

// =============================================================================
// config.toml loading and validation
// =============================================================================

/// Raw deserialisable shape of config.toml.
///
/// Unknown keys are silently ignored for forward compatibility.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// `[store]` section.
    pub store: StoreSection,
    /// `[schedule]` section.
    pub schedule: ScheduleSection,
    /// `[images]` section.
    pub images: ImagesSection,
    /// `[logging]` section.
    pub logging: LoggingSection,
}

/// `[store]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct StoreSection {
    /// Attendance log JSON file.
    pub log_file: Option<String>,
    /// Directory receiving backups.
    pub backup_dir: Option<String>,
}

/// `[schedule]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct ScheduleSection {
    /// Standard arrival time, "HH:MM".
    pub standard_start: Option<String>,
    /// Standard departure time, "HH:MM".
    pub standard_end: Option<String>,
}

/// `[images]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct ImagesSection {
    /// Resize target width in pixels.
    pub width: Option<u32>,
    /// Resize target height in pixels.
    pub height: Option<u32>,
    /// Minimum accepted width/height for validation.
    pub min_dimension: Option<u32>,
}

/// `[logging]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub level: Option<String>,
    /// Log file path (empty = stderr only).
    pub file: Option<String>,
}

/// Validated application configuration derived from `config.toml`.
///
/// Invalid values produce actionable warnings and fall back to defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    // -- Store --
    /// Attendance log JSON file.
    pub attendance_log: PathBuf,
    /// Directory receiving backups.
    pub backup_dir: PathBuf,

    // -- Schedule --
    /// Standard arrival time, "HH:MM".
    pub standard_start: String,
    /// Standard departure time, "HH:MM".
    pub standard_end: String,

    // -- Images --
    /// Resize target (width, height).
    pub image_size: (u32, u32),
    /// Minimum accepted width/height.
    pub min_image_dimension: u32,

    // -- Logging --
    /// Logging level string (for init before tracing is available).
    pub log_level: Option<String>,
    /// Diagnostic log file path.
    pub log_file: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            attendance_log: PathBuf::from(constants::DEFAULT_LOG_FILE),
            backup_dir: PathBuf::from(constants::DEFAULT_BACKUP_DIR),
            standard_start: constants::DEFAULT_STANDARD_START.to_string(),
            standard_end: constants::DEFAULT_STANDARD_END.to_string(),
            image_size: (
                constants::DEFAULT_IMAGE_WIDTH,
                constants::DEFAULT_IMAGE_HEIGHT,
            ),
            min_image_dimension: constants::DEFAULT_MIN_IMAGE_DIMENSION,
            log_level: None,
            log_file: None,
        }
    }
}

/// Load and validate the config file at `config_path`.
///
/// Returns `AppConfig` with validated values and a list of non-fatal warnings.
/// If the file does not exist, returns defaults with no warnings (first run).
/// If the file is unreadable or unparseable, returns defaults with a warning.
pub fn load_config(config_path: &Path) -> (AppConfig, Vec<String>) {
    let mut warnings: Vec<String> = Vec::new();

    if !config_path.exists() {
        tracing::debug!(path = %config_path.display(), "No config.toml found; using defaults");
        return (AppConfig::default(), warnings);
    }

    let content = match std::fs::read_to_string(config_path) {
        Ok(c) => c,
        Err(source) => {
            let err = ConfigError::Io {
                path: config_path.to_path_buf(),
                source,
            };
            warnings.push(format!("{err}. Using defaults."));
            return (AppConfig::default(), warnings);
        }
    };

    let raw: RawConfig = match toml::from_str(&content) {
        Ok(r) => r,
        Err(source) => {
            let err = ConfigError::TomlParse {
                path: config_path.to_path_buf(),
                source,
            };
            warnings.push(format!("{err}. Using defaults."));
            return (AppConfig::default(), warnings);
        }
    };

    tracing::info!(path = %config_path.display(), "Loaded config.toml");

    let mut config = AppConfig::default();

    // -- Store --
    match raw.store.log_file.as_deref() {
        Some("") => warnings.push(
            "[store] log_file is empty. Using default (attendance_logs/attendance.json)."
                .to_string(),
        ),
        Some(file) => config.attendance_log = PathBuf::from(file),
        None => {}
    }
    match raw.store.backup_dir.as_deref() {
        Some("") => {
            warnings.push("[store] backup_dir is empty. Using default (backup).".to_string())
        }
        Some(dir) => config.backup_dir = PathBuf::from(dir),
        None => {}
    }

    // -- Schedule --
    if let Some(start) = raw.schedule.standard_start {
        if is_valid_time_of_day(&start) {
            config.standard_start = start;
        } else {
            warnings.push(format!(
                "[schedule] standard_start = \"{start}\" is not a valid HH:MM time. Using default ({}).",
                constants::DEFAULT_STANDARD_START,
            ));
        }
    }
    if let Some(end) = raw.schedule.standard_end {
        if is_valid_time_of_day(&end) {
            config.standard_end = end;
        } else {
            warnings.push(format!(
                "[schedule] standard_end = \"{end}\" is not a valid HH:MM time. Using default ({}).",
                constants::DEFAULT_STANDARD_END,
            ));
        }
    }

    // -- Images --
    if let Some(width) = raw.images.width {
        if (1..=constants::MAX_IMAGE_DIMENSION).contains(&width) {
            config.image_size.0 = width;
        } else {
            warnings.push(format!(
                "[images] width = {width} is out of range (1-{}). Using default ({}).",
                constants::MAX_IMAGE_DIMENSION,
                constants::DEFAULT_IMAGE_WIDTH,
            ));
        }
    }
    if let Some(height) = raw.images.height {
        if (1..=constants::MAX_IMAGE_DIMENSION).contains(&height) {
            config.image_size.1 = height;
        } else {
            warnings.push(format!(
                "[images] height = {height} is out of range (1-{}). Using default ({}).",
                constants::MAX_IMAGE_DIMENSION,
                constants::DEFAULT_IMAGE_HEIGHT,
            ));
        }
    }
    if let Some(min) = raw.images.min_dimension {
        if (1..=constants::MAX_IMAGE_DIMENSION).contains(&min) {
            config.min_image_dimension = min;
        } else {
            warnings.push(format!(
                "[images] min_dimension = {min} is out of range (1-{}). Using default ({}).",
                constants::MAX_IMAGE_DIMENSION,
                constants::DEFAULT_MIN_IMAGE_DIMENSION,
            ));
        }
    }

    // -- Logging: level --
    if let Some(ref level) = raw.logging.level {
        if constants::VALID_LOG_LEVELS.contains(&level.to_lowercase().as_str()) {
            config.log_level = Some(level.clone());
        } else {
            warnings.push(format!(
                "[logging] level = \"{level}\" is not recognised. \
                 Valid values: error, warn, info, debug, trace. Using default (info).",
            ));
        }
    }

    // -- Logging: file --
    if let Some(ref file) = raw.logging.file {
        if !file.is_empty() {
            config.log_file = Some(file.clone());
        }
    }

    if !warnings.is_empty() {
        tracing::warn!(
            count = warnings.len(),
            "Config validation produced warnings"
        );
    }

    (config, warnings)
}

fn is_valid_time_of_day(value: &str) -> bool {
    NaiveTime::parse_from_str(value, constants::STANDARD_TIME_FORMAT).is_ok()
}
