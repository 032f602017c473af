//! Transit REST API access.
//!
//! The backend exposes hyperlinked listings of lines and stations and a
//! per-station timetable. Everything here goes through the
//! [`ResourceFetcher`] capability, so the HTTP transport can be swapped for
//! [`MockFetcher`] in tests.

mod client;
mod config;
mod error;
mod fetcher;
mod http;
mod mock;

pub use client::TransitClient;
pub use config::ApiConfig;
pub use error::ApiError;
pub use fetcher::{ResourceFetcher, parse_collection};
pub use http::HttpFetcher;
pub use mock::MockFetcher;
