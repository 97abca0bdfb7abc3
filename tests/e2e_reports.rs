// Rollcall - tests/e2e_reports.rs
//
// End-to-end tests for the report and maintenance pipeline.
//
// These tests exercise the real filesystem, real JSON loading, and real
// chrono parsing: a log file on disk goes in, summaries, listings, backups
// and exports come out. The fixture is copied into a temp dir before any
// test that rewrites the log.

use chrono::NaiveDate;
use rollcall::app::images::{ImageCheck, ImageValidator};
use rollcall::app::maintenance::{backup, dedup};
use rollcall::app::reporter::{ExportFormat, Reporter};
use rollcall::app::store::LogStore;
use std::path::PathBuf;
use tempfile::TempDir;

// =============================================================================
// Helpers
// =============================================================================

/// Absolute path to an on-disk fixture file.
fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Copy the sample log into a fresh temp dir and return a store over the copy.
fn sample_store(dir: &TempDir) -> LogStore {
    let path = dir.path().join("attendance.json");
    std::fs::copy(fixture("attendance_sample.json"), &path).unwrap();
    LogStore::new(path)
}

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// =============================================================================
// Reports
// =============================================================================

#[test]
fn e2e_fixture_loads_in_file_order() {
    let records = LogStore::new(fixture("attendance_sample.json")).load();
    assert_eq!(records.len(), 12);
    assert_eq!(records[1].name, "Bình");
    assert_eq!(records[11].name, "Dũng");
}

#[test]
fn e2e_hours_from_split_shift_ignore_duplicate_out() {
    let reporter = Reporter::new(LogStore::new(fixture("attendance_sample.json")));
    assert_eq!(reporter.hours_for("An", "2024-01-02").unwrap(), 8.0);
    assert_eq!(reporter.hours_for("Bình", "2024-01-02").unwrap(), 8.5);
    assert_eq!(reporter.hours_for("Chi", "2024-01-03").unwrap(), 0.0);
}

#[test]
fn e2e_week_summary() {
    let reporter = Reporter::new(LogStore::new(fixture("attendance_sample.json")));
    let summary = reporter.summary("2024-01-01", "2024-01-07").unwrap();

    let names: Vec<&str> = summary.keys().map(String::as_str).collect();
    assert_eq!(names, vec!["An", "Bình", "Chi"]);

    let an = &summary["An"];
    assert_eq!(an.total_days, 2);
    assert_eq!(an.total_hours, 16.0);
    assert_eq!(an.days_detail[&ymd(2024, 1, 2)], 8.0);
    assert_eq!(an.days_detail[&ymd(2024, 1, 3)], 8.0);

    let chi = &summary["Chi"];
    assert_eq!(chi.total_days, 0);
    assert!(chi.days_detail.is_empty());
}

#[test]
fn e2e_summary_of_empty_week_is_empty() {
    let reporter = Reporter::new(LogStore::new(fixture("attendance_sample.json")));
    assert!(reporter.summary("2024-02-05", "2024-02-11").unwrap().is_empty());
}

#[test]
fn e2e_weekly_window_from_midweek_day() {
    let reporter = Reporter::new(LogStore::new(fixture("attendance_sample.json")));
    // 2024-01-04 is a Thursday; the week runs 2024-01-01..=2024-01-07.
    let week = reporter.weekly_at(ymd(2024, 1, 4)).unwrap();
    assert_eq!(week.len(), 10);
    assert!(week.iter().all(|r| r.name != "Dũng"));
}

#[test]
fn e2e_single_day_range_matches_day_query() {
    let reporter = Reporter::new(LogStore::new(fixture("attendance_sample.json")));
    assert_eq!(
        reporter.by_date_range("2024-01-03", "2024-01-03").unwrap(),
        reporter.by_date("2024-01-03")
    );
}

#[test]
fn e2e_late_and_early_listings() {
    let reporter = Reporter::new(LogStore::new(fixture("attendance_sample.json")));

    let late = reporter.late_arrivals("2024-01-02", None).unwrap();
    assert_eq!(late.len(), 1);
    assert_eq!(late[0].name, "Bình");
    assert_eq!(late[0].arrival_time, "08:45:00");
    assert_eq!(late[0].minutes_late, 15);

    let early = reporter.early_departures("2024-01-02", None).unwrap();
    let rows: Vec<(&str, i64)> = early
        .iter()
        .map(|e| (e.name.as_str(), e.minutes_early))
        .collect();
    assert_eq!(rows, vec![("An", 30), ("Bình", 15)]);
}

#[test]
fn e2e_missing_log_reports_nothing() {
    let dir = TempDir::new().unwrap();
    let reporter = Reporter::new(LogStore::new(dir.path().join("nope.json")));
    assert!(reporter.by_date("2024-01-02").is_empty());
    assert!(reporter.summary("2024-01-01", "2024-01-07").unwrap().is_empty());
}

// =============================================================================
// Maintenance
// =============================================================================

#[test]
fn e2e_dedup_twice_removes_once() {
    let dir = TempDir::new().unwrap();
    let store = sample_store(&dir);

    assert_eq!(dedup(&store).unwrap(), 1);
    assert_eq!(dedup(&store).unwrap(), 0);

    let records = store.load();
    assert_eq!(records.len(), 11);
    assert_eq!(records[1].name, "Bình", "survivor order must be preserved");
}

#[test]
fn e2e_backup_matches_store() {
    let dir = TempDir::new().unwrap();
    let store = sample_store(&dir);

    let path = backup(&store, &dir.path().join("backup")).unwrap();
    let name = path.file_name().unwrap().to_string_lossy().into_owned();
    assert!(name.starts_with("attendance_backup_") && name.ends_with(".json"));
    // attendance_backup_YYYYMMDD_HHMMSS.json
    assert_eq!(name.len(), "attendance_backup_".len() + 15 + ".json".len());

    assert_eq!(LogStore::new(&path).load(), store.load());
}

// =============================================================================
// Export
// =============================================================================

#[test]
fn e2e_export_workbook_and_csv() {
    let dir = TempDir::new().unwrap();
    let reporter = Reporter::new(sample_store(&dir));

    let xlsx = dir.path().join("week.xlsx");
    reporter
        .export("2024-01-01", "2024-01-07", Some(&xlsx), ExportFormat::Xlsx)
        .unwrap();
    assert!(std::fs::read(&xlsx).unwrap().starts_with(b"PK"));

    let csv = dir.path().join("week.csv");
    reporter
        .export("2024-01-01", "2024-01-07", Some(&csv), ExportFormat::Csv)
        .unwrap();
    let text = std::fs::read_to_string(&csv).unwrap();
    assert_eq!(text.lines().count(), 11, "header plus ten in-range records");
    assert!(text.contains("Bình,2024-01-02 08:45:00,2024-01-02,IN"));
}

// =============================================================================
// Images
// =============================================================================

#[test]
fn e2e_prepare_and_validate_face_images() {
    let dir = TempDir::new().unwrap();
    let raw = dir.path().join("raw");
    let prepared = dir.path().join("prepared");
    std::fs::create_dir(&raw).unwrap();
    image::RgbImage::new(640, 480).save(raw.join("an.jpg")).unwrap();
    image::RgbImage::new(30, 30).save(raw.join("tiny.png")).unwrap();

    let validator = ImageValidator::default();
    assert_eq!(validator.validate(&raw.join("tiny.png")), ImageCheck::TooSmall { width: 30, height: 30 });
    assert_eq!(validator.batch_resize(&raw, &prepared), 2);
    assert_eq!(validator.validate(&prepared.join("an.jpg")), ImageCheck::Valid);
    assert_eq!(image::image_dimensions(prepared.join("tiny.png")).unwrap(), (105, 105));
}
