//! Schedule error types.

use crate::api::ApiError;

/// Errors from loading or decoding station timetables.
#[derive(Debug, thiserror::Error)]
pub enum ScheduleError {
    /// Timetable row lacks a required field
    #[error("timetable row missing field: {0}")]
    MissingField(&'static str),

    /// Day label is not one the API produces
    #[error("invalid day label: {0:?}")]
    InvalidDay(String),

    /// Time is not `HH:MM` or `HH:MM:SS`
    #[error("invalid time: {0:?}")]
    InvalidTime(String),

    /// Fetching the timetable failed
    #[error(transparent)]
    Fetch(#[from] ApiError),
}
