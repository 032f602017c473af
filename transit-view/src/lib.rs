//! Transit lines and stations client.
//!
//! Fetches the lines and stations listings from a transit REST API, indexes
//! them by hyperlink so each station can be shown with its line, and
//! resolves station timetables for the current day.

pub mod api;
pub mod domain;
pub mod join;
pub mod schedule;
