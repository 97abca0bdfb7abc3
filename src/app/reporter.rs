// Rollcall - app/reporter.rs
//
// Report entry points. Each call reloads the attendance log from disk and
// hands the records to the pure functions in `core`.

use crate::app::store::LogStore;
use crate::core::export::{export_csv, export_workbook};
use crate::core::model::{AttendanceRecord, EarlyDeparture, LateArrival, RangeSummary};
use crate::core::{hours, query, report};
use crate::util::constants::{DATE_FORMAT, DEFAULT_STANDARD_END, DEFAULT_STANDARD_START};
use crate::util::error::{ExportError, ParseError};
use chrono::{Local, NaiveDate};
use std::path::{Path, PathBuf};

/// Spreadsheet flavour produced by [`Reporter::export`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    /// Two-sheet workbook (Detail + Summary).
    #[default]
    Xlsx,
    /// Detail rows only.
    Csv,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Xlsx => "xlsx",
            ExportFormat::Csv => "csv",
        }
    }
}

/// Attendance reports over a [`LogStore`].
#[derive(Debug, Clone)]
pub struct Reporter {
    store: LogStore,
    standard_start: String,
    standard_end: String,
}

impl Reporter {
    /// Reporter with the default 08:30 / 17:30 schedule.
    pub fn new(store: LogStore) -> Self {
        Self {
            store,
            standard_start: DEFAULT_STANDARD_START.to_string(),
            standard_end: DEFAULT_STANDARD_END.to_string(),
        }
    }

    /// Override the standard arrival and departure times (`HH:MM`).
    pub fn with_schedule(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.standard_start = start.into();
        self.standard_end = end.into();
        self
    }

    pub fn store(&self) -> &LogStore {
        &self.store
    }

    pub fn by_date(&self, date: &str) -> Vec<AttendanceRecord> {
        query::by_date(&self.store.load(), date)
    }

    pub fn by_date_range(&self, start: &str, end: &str) -> Result<Vec<AttendanceRecord>, ParseError> {
        query::by_date_range(&self.store.load(), start, end)
    }

    /// Records of the current Monday-to-Sunday week.
    pub fn weekly(&self) -> Result<Vec<AttendanceRecord>, ParseError> {
        self.weekly_at(today())
    }

    pub fn weekly_at(&self, today: NaiveDate) -> Result<Vec<AttendanceRecord>, ParseError> {
        let (start, end) = report::week_bounds(today);
        self.by_date_range(&fmt_date(start), &fmt_date(end))
    }

    /// Records of the current calendar month.
    pub fn monthly(&self) -> Result<Vec<AttendanceRecord>, ParseError> {
        self.monthly_at(today())
    }

    pub fn monthly_at(&self, today: NaiveDate) -> Result<Vec<AttendanceRecord>, ParseError> {
        let (start, end) = report::month_bounds(today);
        self.by_date_range(&fmt_date(start), &fmt_date(end))
    }

    pub fn hours_for(&self, name: &str, date: &str) -> Result<f64, ParseError> {
        hours::hours_for(&self.store.load(), name, date)
    }

    pub fn summary(&self, start: &str, end: &str) -> Result<RangeSummary, ParseError> {
        report::summary(&self.store.load(), start, end)
    }

    /// Late arrivals on `date` against `standard_time`, or the configured
    /// start time when `None`.
    pub fn late_arrivals(
        &self,
        date: &str,
        standard_time: Option<&str>,
    ) -> Result<Vec<LateArrival>, ParseError> {
        let standard = standard_time.unwrap_or(self.standard_start.as_str());
        report::late_arrivals(&self.store.load(), date, standard)
    }

    /// Early departures on `date` against `standard_time`, or the configured
    /// end time when `None`.
    pub fn early_departures(
        &self,
        date: &str,
        standard_time: Option<&str>,
    ) -> Result<Vec<EarlyDeparture>, ParseError> {
        let standard = standard_time.unwrap_or(self.standard_end.as_str());
        report::early_departures(&self.store.load(), date, standard)
    }

    /// Export `[start, end]` to `filename`, defaulting to
    /// `attendance_report_<start>_to_<end>.<ext>`. Returns the written path.
    pub fn export(
        &self,
        start: &str,
        end: &str,
        filename: Option<&Path>,
        format: ExportFormat,
    ) -> Result<PathBuf, ExportError> {
        let path = filename.map(Path::to_path_buf).unwrap_or_else(|| {
            PathBuf::from(format!(
                "attendance_report_{start}_to_{end}.{}",
                format.extension()
            ))
        });

        let records = self.store.load();
        let in_range = query::by_date_range(&records, start, end)?;

        match format {
            ExportFormat::Xlsx => {
                let summary = report::summary(&records, start, end)?;
                export_workbook(&in_range, &summary, &path)?;
            }
            ExportFormat::Csv => {
                let file = std::fs::File::create(&path).map_err(|source| ExportError::Io {
                    path: path.clone(),
                    source,
                })?;
                let count = export_csv(&in_range, file, &path)?;
                tracing::info!(path = %path.display(), records = count, "CSV exported");
            }
        }
        Ok(path)
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn fmt_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::Action;
    use tempfile::TempDir;

    fn record(name: &str, timestamp: &str, action: Action) -> AttendanceRecord {
        AttendanceRecord {
            name: name.to_string(),
            timestamp: timestamp.to_string(),
            date: timestamp[..10].to_string(),
            action,
        }
    }

    fn reporter_with(dir: &TempDir, records: &[AttendanceRecord]) -> Reporter {
        let store = LogStore::new(dir.path().join("attendance.json"));
        store.write(records).unwrap();
        Reporter::new(store)
    }

    #[test]
    fn test_every_query_reloads_from_disk() {
        let dir = TempDir::new().unwrap();
        let reporter = reporter_with(&dir, &[record("A", "2024-05-06 08:00:00", Action::In)]);
        assert_eq!(reporter.by_date("2024-05-06").len(), 1);

        reporter
            .store()
            .write(&[
                record("A", "2024-05-06 08:00:00", Action::In),
                record("A", "2024-05-06 12:00:00", Action::Out),
            ])
            .unwrap();
        assert_eq!(reporter.by_date("2024-05-06").len(), 2);
        assert_eq!(reporter.hours_for("A", "2024-05-06").unwrap(), 4.0);
    }

    #[test]
    fn test_weekly_and_monthly_windows() {
        let dir = TempDir::new().unwrap();
        let reporter = reporter_with(
            &dir,
            &[
                record("A", "2024-04-30 08:00:00", Action::In),
                record("A", "2024-05-06 08:00:00", Action::In),
                record("A", "2024-05-12 08:00:00", Action::In),
                record("A", "2024-05-13 08:00:00", Action::In),
                record("A", "2024-05-31 08:00:00", Action::In),
            ],
        );
        let thursday = NaiveDate::from_ymd_opt(2024, 5, 9).unwrap();
        assert_eq!(reporter.weekly_at(thursday).unwrap().len(), 2);
        assert_eq!(reporter.monthly_at(thursday).unwrap().len(), 4);
    }

    #[test]
    fn test_configured_schedule_is_default_standard() {
        let dir = TempDir::new().unwrap();
        let reporter = reporter_with(
            &dir,
            &[
                record("A", "2024-05-06 08:45:00", Action::In),
                record("A", "2024-05-06 17:00:00", Action::Out),
            ],
        )
        .with_schedule("09:00", "16:00");

        assert!(reporter.late_arrivals("2024-05-06", None).unwrap().is_empty());
        assert!(reporter.early_departures("2024-05-06", None).unwrap().is_empty());
        assert_eq!(
            reporter.late_arrivals("2024-05-06", Some("08:30")).unwrap()[0].minutes_late,
            15
        );
    }

    #[test]
    fn test_export_csv_to_explicit_path() {
        let dir = TempDir::new().unwrap();
        let reporter = reporter_with(
            &dir,
            &[
                record("A", "2024-05-06 08:00:00", Action::In),
                record("A", "2024-06-06 08:00:00", Action::In),
            ],
        );
        let out = dir.path().join("may.csv");
        let written = reporter
            .export("2024-05-01", "2024-05-31", Some(&out), ExportFormat::Csv)
            .unwrap();
        assert_eq!(written, out);
        let text = std::fs::read_to_string(&out).unwrap();
        assert_eq!(text.lines().count(), 2);
    }

    #[test]
    fn test_export_invalid_range_fails_before_writing() {
        let dir = TempDir::new().unwrap();
        let reporter = reporter_with(&dir, &[]);
        let out = dir.path().join("bad.xlsx");
        let result = reporter.export("2024-05-01", "May 31", Some(&out), ExportFormat::Xlsx);
        assert!(matches!(result, Err(ExportError::Query(_))));
        assert!(!out.exists());
    }
}
