//! Day labels attached to timetable rows.

use std::fmt;
use std::str::FromStr;

use chrono::Weekday;

use super::error::ScheduleError;

/// Which days a timetable row applies to.
///
/// A row is labelled with a single weekday, with a weekday/weekend group,
/// or as running daily.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DayLabel {
    Day(Weekday),
    Weekdays,
    Weekends,
    Daily,
}

impl DayLabel {
    /// Parse a label as serialized by the API (`Mon`, `weekdays`, `daily`, ...).
    pub fn parse(s: &str) -> Result<Self, ScheduleError> {
        let label = match s {
            "Mon" => DayLabel::Day(Weekday::Mon),
            "Tue" => DayLabel::Day(Weekday::Tue),
            "Wed" => DayLabel::Day(Weekday::Wed),
            "Thu" => DayLabel::Day(Weekday::Thu),
            "Fri" => DayLabel::Day(Weekday::Fri),
            "Sat" => DayLabel::Day(Weekday::Sat),
            "Sun" => DayLabel::Day(Weekday::Sun),
            "weekdays" => DayLabel::Weekdays,
            "weekends" => DayLabel::Weekends,
            "daily" => DayLabel::Daily,
            other => return Err(ScheduleError::InvalidDay(other.to_string())),
        };
        Ok(label)
    }

    /// The label for exactly this weekday.
    pub fn for_weekday(day: Weekday) -> Self {
        DayLabel::Day(day)
    }

    /// The weekday/weekend group a weekday belongs to.
    pub fn group_of(day: Weekday) -> Self {
        match day {
            Weekday::Sat | Weekday::Sun => DayLabel::Weekends,
            _ => DayLabel::Weekdays,
        }
    }
}

impl FromStr for DayLabel {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for DayLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // chrono renders weekdays as three-letter abbreviations
            DayLabel::Day(day) => write!(f, "{day}"),
            DayLabel::Weekdays => write!(f, "weekdays"),
            DayLabel::Weekends => write!(f, "weekends"),
            DayLabel::Daily => write!(f, "daily"),
        }
    }
}
