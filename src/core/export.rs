// Rollcall - core/export.rs
//
// Spreadsheet (xlsx) and CSV export of attendance records for a date range.
// CSV writes to any Write trait object; the workbook is saved to a path.

use crate::core::model::{AttendanceRecord, RangeSummary};
use crate::util::constants::{
    DETAIL_HEADERS, DETAIL_SHEET_NAME, SUMMARY_HEADERS, SUMMARY_SHEET_NAME,
};
use crate::util::error::ExportError;
use rust_xlsxwriter::{Workbook, Worksheet, XlsxError};
use std::io::Write;
use std::path::Path;

/// Export records to CSV format.
///
/// Writes: name, timestamp, date, action
pub fn export_csv<W: Write>(
    records: &[AttendanceRecord],
    writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    let csv_err = |source| ExportError::Csv {
        path: export_path.to_path_buf(),
        source,
    };
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer.write_record(DETAIL_HEADERS).map_err(csv_err)?;

    let mut count = 0;
    for record in records {
        csv_writer
            .write_record([
                record.name.as_str(),
                record.timestamp.as_str(),
                record.date.as_str(),
                record.action.label(),
            ])
            .map_err(csv_err)?;
        count += 1;
    }

    csv_writer.flush().map_err(|e| ExportError::Io {
        path: export_path.to_path_buf(),
        source: e,
    })?;

    Ok(count)
}

/// Save a two-sheet workbook: raw records on "Detail", per-person totals on
/// "Summary".
pub fn export_workbook(
    records: &[AttendanceRecord],
    summary: &RangeSummary,
    path: &Path,
) -> Result<(), ExportError> {
    let xlsx_err = |source| ExportError::Xlsx {
        path: path.to_path_buf(),
        source,
    };
    let mut workbook = Workbook::new();

    write_detail_sheet(workbook.add_worksheet(), records).map_err(xlsx_err)?;
    write_summary_sheet(workbook.add_worksheet(), summary).map_err(xlsx_err)?;

    workbook.save(path).map_err(xlsx_err)?;

    tracing::info!(
        path = %path.display(),
        records = records.len(),
        people = summary.len(),
        "Workbook exported"
    );
    Ok(())
}

fn write_detail_sheet(sheet: &mut Worksheet, records: &[AttendanceRecord]) -> Result<(), XlsxError> {
    sheet.set_name(DETAIL_SHEET_NAME)?;
    for (col, header) in DETAIL_HEADERS.iter().enumerate() {
        sheet.write_string(0, col as u16, *header)?;
    }
    for (i, record) in records.iter().enumerate() {
        let row = (i + 1) as u32;
        sheet.write_string(row, 0, record.name.as_str())?;
        sheet.write_string(row, 1, record.timestamp.as_str())?;
        sheet.write_string(row, 2, record.date.as_str())?;
        sheet.write_string(row, 3, record.action.label())?;
    }
    Ok(())
}

fn write_summary_sheet(sheet: &mut Worksheet, summary: &RangeSummary) -> Result<(), XlsxError> {
    sheet.set_name(SUMMARY_SHEET_NAME)?;
    for (col, header) in SUMMARY_HEADERS.iter().enumerate() {
        sheet.write_string(0, col as u16, *header)?;
    }
    for (i, person) in summary.values().enumerate() {
        let row = (i + 1) as u32;
        sheet.write_string(row, 0, person.name.as_str())?;
        sheet.write_number(row, 1, f64::from(person.total_days))?;
        sheet.write_number(row, 2, person.total_hours)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::{Action, PersonSummary};
    use std::path::PathBuf;

    fn make_record(name: &str, timestamp: &str, action: Action) -> AttendanceRecord {
        AttendanceRecord {
            name: name.to_string(),
            timestamp: timestamp.to_string(),
            date: timestamp[..10].to_string(),
            action,
        }
    }

    #[test]
    fn test_csv_export() {
        let records = vec![
            make_record("An", "2024-01-02 08:00:00", Action::In),
            make_record("Trần Thị B", "2024-01-02 17:00:00", Action::Out),
        ];
        let mut buf = Vec::new();
        let count = export_csv(&records, &mut buf, &PathBuf::from("out.csv")).unwrap();
        assert_eq!(count, 2);

        let output = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[0], "name,timestamp,date,action");
        assert_eq!(lines[1], "An,2024-01-02 08:00:00,2024-01-02,IN");
        assert_eq!(lines[2], "Trần Thị B,2024-01-02 17:00:00,2024-01-02,OUT");
    }

    #[test]
    fn test_workbook_export_writes_xlsx() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.xlsx");

        let records = vec![
            make_record("An", "2024-01-02 08:00:00", Action::In),
            make_record("An", "2024-01-02 16:00:00", Action::Out),
        ];
        let mut summary = RangeSummary::new();
        let mut an = PersonSummary::new("An");
        an.total_days = 1;
        an.total_hours = 8.0;
        summary.insert("An".to_string(), an);

        export_workbook(&records, &summary, &path).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"PK"), "xlsx is a zip container");
    }

    #[test]
    fn test_workbook_export_to_missing_dir_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no_such_dir").join("report.xlsx");
        let result = export_workbook(&[], &RangeSummary::new(), &path);
        assert!(matches!(result, Err(ExportError::Xlsx { .. })));
    }
}
