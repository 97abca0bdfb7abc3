// Rollcall - core/query.rs
//
// Date filters over a loaded attendance log.
// Core layer: pure logic, no I/O.

use crate::core::model::{parse_date, AttendanceRecord};
use crate::util::error::ParseError;

/// Records whose `date` field equals `date` exactly, in log order.
pub fn by_date(records: &[AttendanceRecord], date: &str) -> Vec<AttendanceRecord> {
    records
        .iter()
        .filter(|record| record.date == date)
        .cloned()
        .collect()
}

/// Records whose date falls within `[start, end]` inclusive, in log order.
///
/// Bounds and record dates are compared as calendar dates, not strings.
/// A single record with an unparseable `date` fails the whole query; such
/// records are never skipped silently.
pub fn by_date_range(
    records: &[AttendanceRecord],
    start: &str,
    end: &str,
) -> Result<Vec<AttendanceRecord>, ParseError> {
    let start = parse_date(start)?;
    let end = parse_date(end)?;

    let mut result = Vec::new();
    for record in records {
        let date = record.parsed_date()?;
        if start <= date && date <= end {
            result.push(record.clone());
        }
    }
    Ok(result)
}
