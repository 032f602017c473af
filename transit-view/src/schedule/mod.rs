//! Station timetables.
//!
//! Timetable rows carry a day label and a wall-clock time. These helpers
//! pick the rows that apply on a given day and those still to come, and
//! merge several stations' timetables for a location.

mod day;
mod entry;
mod error;
mod resolve;

pub use day::DayLabel;
pub use entry::{DailyEntry, parse_time};
pub use error::ScheduleError;
pub use resolve::{daily_times, merge_by_time, next_daily_times, resolve_daily, times_from};
