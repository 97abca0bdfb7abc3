// Rollcall - core/model.rs
//
// Core data model types. Pure data definitions with no I/O and no
// platform dependencies.
//
// These types are the shared vocabulary across all layers.

use crate::util::constants::{DATE_FORMAT, STANDARD_TIME_FORMAT, TIMESTAMP_FORMAT};
use crate::util::error::ParseError;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// =============================================================================
// Attendance record (one line of the JSON log)
// =============================================================================

/// A single check-in or check-out event as stored in the attendance log.
///
/// `timestamp` and `date` keep the exact strings found on disk. They are
/// parsed on demand so an invalid value fails the query that needs it rather
/// than the whole load. Extra JSON keys written by the capture pipeline are
/// ignored on load and not written back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    /// Person name as produced by the recognition pipeline.
    pub name: String,

    /// Event time, `YYYY-MM-DD HH:MM:SS` (local time, no zone).
    pub timestamp: String,

    /// Calendar day of the event, `YYYY-MM-DD`.
    pub date: String,

    /// Whether this is a check-in or a check-out.
    pub action: Action,
}

impl AttendanceRecord {
    /// Build a record from a parsed event time, deriving `date` from it.
    pub fn new(name: impl Into<String>, at: NaiveDateTime, action: Action) -> Self {
        Self {
            name: name.into(),
            timestamp: at.format(TIMESTAMP_FORMAT).to_string(),
            date: at.date().format(DATE_FORMAT).to_string(),
            action,
        }
    }

    /// Identity of the record: two records with equal keys are duplicates.
    pub fn key(&self) -> (&str, &str, Action) {
        (&self.name, &self.timestamp, self.action)
    }

    /// Parse the `date` field as a calendar date.
    pub fn parsed_date(&self) -> Result<NaiveDate, ParseError> {
        parse_date(&self.date)
    }

    /// Parse the `timestamp` field.
    pub fn parsed_timestamp(&self) -> Result<NaiveDateTime, ParseError> {
        NaiveDateTime::parse_from_str(&self.timestamp, TIMESTAMP_FORMAT).map_err(|source| {
            ParseError::InvalidTimestamp {
                value: self.timestamp.clone(),
                source,
            }
        })
    }
}

// =============================================================================
// Action
// =============================================================================

/// Check-in / check-out marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    #[serde(rename = "IN")]
    In,
    #[serde(rename = "OUT")]
    Out,
}

impl Action {
    /// Label as written in the log file.
    pub fn label(&self) -> &'static str {
        match self {
            Action::In => "IN",
            Action::Out => "OUT",
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Derived report types
// =============================================================================

/// Worked hours of one person on one day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PersonDaySummary {
    pub name: String,
    pub date: NaiveDate,
    pub hours: f64,
}

/// Per-person totals over a date range.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PersonSummary {
    pub name: String,

    /// Days in the range with a positive computed hour total.
    pub total_days: u32,

    /// Sum of the per-day totals in `days_detail`.
    pub total_hours: f64,

    /// Hours per worked day, ordered by date.
    pub days_detail: BTreeMap<NaiveDate, f64>,
}

impl PersonSummary {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            total_days: 0,
            total_hours: 0.0,
            days_detail: BTreeMap::new(),
        }
    }
}

/// Range summary keyed by person name.
pub type RangeSummary = BTreeMap<String, PersonSummary>;

/// A person whose first check-in came after the standard start time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LateArrival {
    pub name: String,

    /// Earliest IN of the day, `HH:MM:SS`.
    pub arrival_time: String,

    /// Whole minutes after the standard time (truncated).
    pub minutes_late: i64,
}

/// A person whose last check-out came before the standard end time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EarlyDeparture {
    pub name: String,

    /// Latest OUT of the day, `HH:MM:SS`.
    pub departure_time: String,

    /// Whole minutes before the standard time (truncated).
    pub minutes_early: i64,
}

// =============================================================================
// Parsing helpers
// =============================================================================

/// Parse a `YYYY-MM-DD` calendar date.
pub fn parse_date(value: &str) -> Result<NaiveDate, ParseError> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|source| ParseError::InvalidDate {
        value: value.to_string(),
        source,
    })
}

/// Parse an `HH:MM` time of day.
pub fn parse_time_of_day(value: &str) -> Result<NaiveTime, ParseError> {
    NaiveTime::parse_from_str(value, STANDARD_TIME_FORMAT).map_err(|source| {
        ParseError::InvalidTimeOfDay {
            value: value.to_string(),
            source,
        }
    })
}
