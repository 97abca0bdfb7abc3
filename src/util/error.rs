// Rollcall - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// No string-based error propagation across module boundaries.
// All errors preserve the causal chain for diagnostic logging.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Top-level error type for all Rollcall operations.
/// Errors are categorised by the subsystem that produced them.
#[derive(Debug)]
pub enum RollcallError {
    /// Attendance log could not be read or written.
    Store(StoreError),

    /// A date, timestamp or time-of-day string was invalid.
    Parse(ParseError),

    /// Backup or dedup failed.
    Maintenance(MaintenanceError),

    /// Spreadsheet or CSV export failed.
    Export(ExportError),
}

impl fmt::Display for RollcallError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Store(e) => write!(f, "Store error: {e}"),
            Self::Parse(e) => write!(f, "Parse error: {e}"),
            Self::Maintenance(e) => write!(f, "Maintenance error: {e}"),
            Self::Export(e) => write!(f, "Export error: {e}"),
        }
    }
}

impl std::error::Error for RollcallError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Store(e) => Some(e),
            Self::Parse(e) => Some(e),
            Self::Maintenance(e) => Some(e),
            Self::Export(e) => Some(e),
        }
    }
}

// ---------------------------------------------------------------------------
// Store errors
// ---------------------------------------------------------------------------

/// Errors reading or writing the attendance log file.
#[derive(Debug)]
pub enum StoreError {
    /// I/O error with path context.
    Io {
        path: PathBuf,
        operation: &'static str,
        source: io::Error,
    },

    /// The file is not a JSON array of attendance records.
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io {
                path,
                operation,
                source,
            } => write!(
                f,
                "I/O error during {operation} on '{}': {source}",
                path.display()
            ),
            Self::Json { path, source } => {
                write!(f, "Malformed attendance log '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
        }
    }
}

impl From<StoreError> for RollcallError {
    fn from(e: StoreError) -> Self {
        Self::Store(e)
    }
}

// ---------------------------------------------------------------------------
// Parse errors
// ---------------------------------------------------------------------------

/// Errors parsing dates and times found in records or supplied by callers.
#[derive(Debug)]
pub enum ParseError {
    /// A calendar date (`YYYY-MM-DD`) could not be parsed.
    InvalidDate {
        value: String,
        source: chrono::ParseError,
    },

    /// A record timestamp (`YYYY-MM-DD HH:MM:SS`) could not be parsed.
    InvalidTimestamp {
        value: String,
        source: chrono::ParseError,
    },

    /// A standard time of day (`HH:MM`) could not be parsed.
    InvalidTimeOfDay {
        value: String,
        source: chrono::ParseError,
    },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDate { value, source } => {
                write!(f, "invalid date '{value}' (expected YYYY-MM-DD): {source}")
            }
            Self::InvalidTimestamp { value, source } => write!(
                f,
                "invalid timestamp '{value}' (expected YYYY-MM-DD HH:MM:SS): {source}"
            ),
            Self::InvalidTimeOfDay { value, source } => {
                write!(f, "invalid time of day '{value}' (expected HH:MM): {source}")
            }
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidDate { source, .. } => Some(source),
            Self::InvalidTimestamp { source, .. } => Some(source),
            Self::InvalidTimeOfDay { source, .. } => Some(source),
        }
    }
}

impl From<ParseError> for RollcallError {
    fn from(e: ParseError) -> Self {
        Self::Parse(e)
    }
}

// ---------------------------------------------------------------------------
// Maintenance errors
// ---------------------------------------------------------------------------

/// Errors from backup and dedup.
#[derive(Debug)]
pub enum MaintenanceError {
    /// The backup directory could not be created.
    CreateDir { path: PathBuf, source: io::Error },

    /// Reading or writing a log file failed.
    Store(StoreError),
}

impl fmt::Display for MaintenanceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CreateDir { path, source } => write!(
                f,
                "cannot create backup directory '{}': {source}",
                path.display()
            ),
            Self::Store(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for MaintenanceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::CreateDir { source, .. } => Some(source),
            Self::Store(e) => Some(e),
        }
    }
}

impl From<StoreError> for MaintenanceError {
    fn from(e: StoreError) -> Self {
        Self::Store(e)
    }
}

impl From<MaintenanceError> for RollcallError {
    fn from(e: MaintenanceError) -> Self {
        Self::Maintenance(e)
    }
}

// ---------------------------------------------------------------------------
// Export errors
// ---------------------------------------------------------------------------

/// Errors related to export operations.
#[derive(Debug)]
pub enum ExportError {
    /// The export range could not be evaluated.
    Query(ParseError),

    /// I/O error writing the export file.
    Io { path: PathBuf, source: io::Error },

    /// CSV serialisation error.
    Csv { path: PathBuf, source: csv::Error },

    /// Workbook serialisation error.
    Xlsx {
        path: PathBuf,
        source: rust_xlsxwriter::XlsxError,
    },
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Query(e) => write!(f, "cannot build export data: {e}"),
            Self::Io { path, source } => {
                write!(f, "Export I/O error '{}': {source}", path.display())
            }
            Self::Csv { path, source } => {
                write!(f, "CSV export error '{}': {source}", path.display())
            }
            Self::Xlsx { path, source } => {
                write!(f, "Workbook export error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Query(e) => Some(e),
            Self::Io { source, .. } => Some(source),
            Self::Csv { source, .. } => Some(source),
            Self::Xlsx { source, .. } => Some(source),
        }
    }
}

impl From<ParseError> for ExportError {
    fn from(e: ParseError) -> Self {
        Self::Query(e)
    }
}

impl From<ExportError> for RollcallError {
    fn from(e: ExportError) -> Self {
        Self::Export(e)
    }
}

// ---------------------------------------------------------------------------
// Image errors
// ---------------------------------------------------------------------------

/// Errors from face image processing.
#[derive(Debug)]
pub enum ImageError {
    /// The source image could not be opened or decoded.
    Decode {
        path: PathBuf,
        source: image::ImageError,
    },

    /// The resized image could not be encoded or written.
    Encode {
        path: PathBuf,
        source: image::ImageError,
    },

    /// A directory could not be created or listed.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for ImageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Decode { path, source } => {
                write!(f, "cannot read image '{}': {source}", path.display())
            }
            Self::Encode { path, source } => {
                write!(f, "cannot write image '{}': {source}", path.display())
            }
            Self::Io { path, source } => {
                write!(f, "I/O error on '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ImageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Decode { source, .. } => Some(source),
            Self::Encode { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
        }
    }
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

/// Errors related to configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    /// TOML parsing failed.
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// I/O error reading config file.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TomlParse { path, source } => {
                write!(f, "Config parse error '{}': {source}", path.display())
            }
            Self::Io { path, source } => {
                write!(f, "Config I/O error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::TomlParse { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
        }
    }
}

/// Convenience type alias for Rollcall results.
pub type Result<T> = std::result::Result<T, RollcallError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_parse_error_chain_reaches_chrono() {
        let source = chrono::NaiveDate::parse_from_str("2024-13-01", "%Y-%m-%d").unwrap_err();
        let err: RollcallError = ParseError::InvalidDate {
            value: "2024-13-01".to_string(),
            source,
        }
        .into();

        assert!(err.to_string().contains("2024-13-01"));
        let inner = err.source().expect("top-level error keeps its cause");
        assert!(inner.source().is_some(), "chrono error should be preserved");
    }

    #[test]
    fn test_config_error_stands_alone_with_cause() {
        let err = ConfigError::Io {
            path: PathBuf::from("config.toml"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.to_string().starts_with("Config I/O error 'config.toml'"));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_maintenance_wraps_store_error() {
        let store = StoreError::Io {
            path: PathBuf::from("attendance.json"),
            operation: "write",
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        let err = MaintenanceError::from(store);
        assert!(err.to_string().contains("attendance.json"));
        assert!(matches!(err, MaintenanceError::Store(StoreError::Io { .. })));
    }
}
