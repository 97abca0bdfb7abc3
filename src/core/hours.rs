// Rollcall - core/hours.rs
//
// Pairs IN/OUT events of one person on one day into worked hours.
// Core layer: pure logic, no I/O.

use crate::core::model::{Action, AttendanceRecord};
use crate::util::error::ParseError;
use chrono::NaiveDateTime;

/// Hours `name` worked on `date` (`YYYY-MM-DD`), rounded to 2 decimals.
///
/// Events are walked in timestamp order with a single open IN:
/// - IN opens a session, replacing any session already open;
/// - OUT closes the open session and adds its length;
/// - OUT with nothing open is ignored.
///
/// A session still open at the end of the day is dropped. Fewer than two
/// events always yields 0. Timestamps are only parsed once that check passes,
/// so a malformed timestamp fails the call instead of being skipped.
pub fn hours_for(records: &[AttendanceRecord], name: &str, date: &str) -> Result<f64, ParseError> {
    let person_day: Vec<&AttendanceRecord> = records
        .iter()
        .filter(|record| record.date == date && record.name == name)
        .collect();

    if person_day.len() < 2 {
        return Ok(0.0);
    }

    let mut events: Vec<(NaiveDateTime, Action)> = Vec::with_capacity(person_day.len());
    for record in person_day {
        events.push((record.parsed_timestamp()?, record.action));
    }
    events.sort_by_key(|(at, _)| *at);

    let mut open_in: Option<NaiveDateTime> = None;
    let mut total_seconds: i64 = 0;

    for (at, action) in events {
        match action {
            Action::In => open_in = Some(at),
            Action::Out => {
                if let Some(start) = open_in.take() {
                    total_seconds += (at - start).num_seconds();
                }
            }
        }
    }

    Ok(round_hours(total_seconds as f64 / 3_600.0))
}

/// Round an hour value to 2 decimal places.
///
/// Goes through decimal formatting, which rounds the exact binary value, so
/// 0.125 h (7m30s) becomes 0.12 and not 0.13.
pub fn round_hours(hours: f64) -> f64 {
    format!("{hours:.2}").parse().unwrap_or(hours)
}
