//! Picking the timetable that applies on a given day.
//!
//! A station may carry rows for specific weekdays, for weekdays/weekends,
//! and for every day. The most specific label present wins: an exact
//! weekday, then the weekday's group, then `daily`. With none of those the
//! full timetable is returned.

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Weekday};

use super::day::DayLabel;
use super::entry::DailyEntry;

/// Rows that apply on `day`, by label precedence.
pub fn resolve_daily(entries: &[DailyEntry], day: Weekday) -> Vec<&DailyEntry> {
    let candidates = [
        DayLabel::for_weekday(day),
        DayLabel::group_of(day),
        DayLabel::Daily,
    ];

    for label in candidates {
        let matching: Vec<&DailyEntry> = entries.iter().filter(|e| e.day == label).collect();
        if !matching.is_empty() {
            return matching;
        }
    }

    entries.iter().collect()
}

/// Rows at or after `time`, in their original order.
pub fn times_from<'a>(
    entries: impl IntoIterator<Item = &'a DailyEntry>,
    time: NaiveTime,
) -> Vec<&'a DailyEntry> {
    entries.into_iter().filter(|e| e.time >= time).collect()
}

/// The full timetable that applies on `date`, from midnight.
pub fn daily_times(entries: &[DailyEntry], date: NaiveDate) -> Vec<&DailyEntry> {
    resolve_daily(entries, date.weekday())
}

/// Rows still to come on the day of `at`.
///
/// The cut-off is `at` truncated to the minute, so a departure in the
/// current minute is still listed.
pub fn next_daily_times(entries: &[DailyEntry], at: NaiveDateTime) -> Vec<&DailyEntry> {
    times_from(resolve_daily(entries, at.weekday()), minute_of(at))
}

fn minute_of(at: NaiveDateTime) -> NaiveTime {
    NaiveTime::from_hms_opt(at.hour(), at.minute(), 0).unwrap_or_else(|| at.time())
}

/// Combine several stations' rows into one list ordered by time.
///
/// Rows with equal times keep their input order.
pub fn merge_by_time(groups: impl IntoIterator<Item = Vec<DailyEntry>>) -> Vec<DailyEntry> {
    let mut merged: Vec<DailyEntry> = groups.into_iter().flatten().collect();
    merged.sort_by_key(|e| e.time);
    merged
}
