//! Timetable rows.

use chrono::NaiveTime;

use crate::domain::Record;

use super::day::DayLabel;
use super::error::ScheduleError;

/// One scheduled time at a station.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyEntry {
    /// Hyperlink of the row itself, when the API provides one.
    pub url: Option<String>,
    /// Hyperlink of the station.
    pub station: String,
    pub day: DayLabel,
    pub time: NaiveTime,
}

impl DailyEntry {
    /// Decode a timetable row record.
    pub fn from_record(record: &Record) -> Result<Self, ScheduleError> {
        let station = record
            .get_str("station")
            .ok_or(ScheduleError::MissingField("station"))?;
        let day = record
            .get_str("day")
            .ok_or(ScheduleError::MissingField("day"))?;
        let time = record
            .get_str("time")
            .ok_or(ScheduleError::MissingField("time"))?;

        Ok(Self {
            url: record.url().map(String::from),
            station: station.to_string(),
            day: DayLabel::parse(day)?,
            time: parse_time(time)?,
        })
    }

    /// Decode every row of a timetable listing.
    pub fn from_records(records: &[Record]) -> Result<Vec<Self>, ScheduleError> {
        records.iter().map(Self::from_record).collect()
    }

    /// `(day) HH:MM`, as shown next to a station.
    pub fn day_and_time(&self) -> String {
        format!("({}) {}", self.day, self.time.format("%H:%M"))
    }
}

/// Parse `HH:MM:SS` (as the API serializes times) or `HH:MM`.
pub fn parse_time(s: &str) -> Result<NaiveTime, ScheduleError> {
    NaiveTime::parse_from_str(s, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M"))
        .map_err(|_| ScheduleError::InvalidTime(s.to_string()))
}
