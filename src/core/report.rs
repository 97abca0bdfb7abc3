// Rollcall - core/report.rs
//
// Range summaries, late-arrival and early-departure listings, and the
// calendar windows behind the weekly and monthly reports.
// Core layer: pure logic over an already-loaded log.

use crate::core::hours::hours_for;
use crate::core::model::{
    parse_date, parse_time_of_day, Action, AttendanceRecord, EarlyDeparture, LateArrival,
    PersonDaySummary, PersonSummary, RangeSummary,
};
use crate::core::query::{by_date, by_date_range};
use crate::util::constants::{CLOCK_TIME_FORMAT, DATE_FORMAT};
use crate::util::error::ParseError;
use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};
use std::collections::{BTreeSet, HashMap};

// =============================================================================
// Calendar windows
// =============================================================================

/// Monday-to-Sunday week containing `today`.
pub fn week_bounds(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let start = today - Duration::days(i64::from(today.weekday().num_days_from_monday()));
    (start, start + Duration::days(6))
}

/// First and last day of the month containing `today`.
pub fn month_bounds(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let start = NaiveDate::from_ymd_opt(today.year(), today.month(), 1).unwrap_or(today);
    let (next_year, next_month) = if today.month() == 12 {
        (today.year() + 1, 1)
    } else {
        (today.year(), today.month() + 1)
    };
    let end = NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first| first.pred_opt())
        .unwrap_or(today);
    (start, end)
}

// =============================================================================
// Range summary
// =============================================================================

/// Per-person totals over `[start, end]` inclusive.
///
/// People are taken from the names present in the range's records, so someone
/// whose records never pair up still appears, with zero totals. Only days
/// with positive hours count towards `total_days` and `days_detail`.
pub fn summary(
    records: &[AttendanceRecord],
    start: &str,
    end: &str,
) -> Result<RangeSummary, ParseError> {
    let in_range = by_date_range(records, start, end)?;
    let first = parse_date(start)?;
    let last = parse_date(end)?;

    let mut days = Vec::new();
    let mut current = first;
    while current <= last {
        days.push(current);
        match current.succ_opt() {
            Some(next) => current = next,
            None => break,
        }
    }

    let names: BTreeSet<&str> = in_range.iter().map(|r| r.name.as_str()).collect();

    let mut result = RangeSummary::new();
    for name in names {
        let mut person = PersonSummary::new(name);
        for worked in worked_days(&in_range, name, &days)? {
            person.total_days += 1;
            person.total_hours += worked.hours;
            person.days_detail.insert(worked.date, worked.hours);
        }
        result.insert(name.to_string(), person);
    }

    tracing::debug!(
        start,
        end,
        people = result.len(),
        days = days.len(),
        "Range summary built"
    );
    Ok(result)
}

/// Days among `days` on which `name` worked a positive number of hours.
pub fn worked_days(
    records: &[AttendanceRecord],
    name: &str,
    days: &[NaiveDate],
) -> Result<Vec<PersonDaySummary>, ParseError> {
    let mut worked = Vec::new();
    for day in days {
        let hours = hours_for(records, name, &day.format(DATE_FORMAT).to_string())?;
        if hours > 0.0 {
            worked.push(PersonDaySummary {
                name: name.to_string(),
                date: *day,
                hours,
            });
        }
    }
    Ok(worked)
}

// =============================================================================
// Late arrivals / early departures
// =============================================================================

/// People whose earliest IN on `date` is after `standard_time` (`HH:MM`),
/// most late first. Ties keep the order people first appear in the log.
pub fn late_arrivals(
    records: &[AttendanceRecord],
    date: &str,
    standard_time: &str,
) -> Result<Vec<LateArrival>, ParseError> {
    let standard = standard_at(date, standard_time)?;
    let firsts = extreme_per_person(records, date, Action::In, |candidate, current| {
        candidate < current
    })?;

    let mut late: Vec<LateArrival> = firsts
        .into_iter()
        .filter(|(_, at)| *at > standard)
        .map(|(name, at)| LateArrival {
            name,
            arrival_time: at.format(CLOCK_TIME_FORMAT).to_string(),
            minutes_late: (at - standard).num_seconds() / 60,
        })
        .collect();
    late.sort_by(|a, b| b.minutes_late.cmp(&a.minutes_late));
    Ok(late)
}

/// People whose latest OUT on `date` is before `standard_time` (`HH:MM`),
/// earliest leaver first. Ties keep the order people first appear in the log.
pub fn early_departures(
    records: &[AttendanceRecord],
    date: &str,
    standard_time: &str,
) -> Result<Vec<EarlyDeparture>, ParseError> {
    let standard = standard_at(date, standard_time)?;
    let lasts = extreme_per_person(records, date, Action::Out, |candidate, current| {
        candidate > current
    })?;

    let mut early: Vec<EarlyDeparture> = lasts
        .into_iter()
        .filter(|(_, at)| *at < standard)
        .map(|(name, at)| EarlyDeparture {
            name,
            departure_time: at.format(CLOCK_TIME_FORMAT).to_string(),
            minutes_early: (standard - at).num_seconds() / 60,
        })
        .collect();
    early.sort_by(|a, b| b.minutes_early.cmp(&a.minutes_early));
    Ok(early)
}

fn standard_at(date: &str, standard_time: &str) -> Result<NaiveDateTime, ParseError> {
    Ok(parse_date(date)?.and_time(parse_time_of_day(standard_time)?))
}

/// For each person with `action` events on `date`, the event time preferred
/// by `replaces(candidate, current)`, in first-appearance order.
fn extreme_per_person(
    records: &[AttendanceRecord],
    date: &str,
    action: Action,
    replaces: impl Fn(NaiveDateTime, NaiveDateTime) -> bool,
) -> Result<Vec<(String, NaiveDateTime)>, ParseError> {
    let mut order: Vec<(String, NaiveDateTime)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for record in by_date(records, date)
        .into_iter()
        .filter(|r| r.action == action)
    {
        let at = record.parsed_timestamp()?;
        match index.get(&record.name) {
            Some(&i) => {
                if replaces(at, order[i].1) {
                    order[i].1 = at;
                }
            }
            None => {
                index.insert(record.name.clone(), order.len());
                order.push((record.name, at));
            }
        }
    }
    Ok(order)
}
