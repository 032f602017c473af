//! Endpoint configuration for the transit API.

use super::error::ApiError;

/// Default path of the lines listing, relative to the base URL.
const DEFAULT_LINES_PATH: &str = "lines/";

/// Default path of the stations listing, relative to the base URL.
const DEFAULT_STATIONS_PATH: &str = "stations/";

/// Default request timeout.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for the transit API client.
///
/// Every endpoint the client touches is derived from this struct; nothing
/// is read from globals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Base URL of the API, e.g. `http://localhost:8000/api/v1`
    pub base_url: String,
    /// Path of the lines listing
    pub lines_path: String,
    /// Path of the stations listing
    pub stations_path: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl ApiConfig {
    /// Create a new config for the given base URL.
    ///
    /// A trailing slash on the base URL is ignored.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            lines_path: DEFAULT_LINES_PATH.to_string(),
            stations_path: DEFAULT_STATIONS_PATH.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set the lines listing path.
    pub fn with_lines_path(mut self, path: impl Into<String>) -> Self {
        self.lines_path = path.into();
        self
    }

    /// Set the stations listing path.
    pub fn with_stations_path(mut self, path: impl Into<String>) -> Self {
        self.stations_path = path.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Check that the base URL is an absolute http(s) URL.
    pub fn validate(&self) -> Result<(), ApiError> {
        let url = reqwest::Url::parse(&self.base_url).map_err(|e| ApiError::Config {
            message: format!("invalid base URL {:?}: {e}", self.base_url),
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ApiError::Config {
                message: format!("unsupported scheme {:?}", url.scheme()),
            });
        }
        Ok(())
    }

    /// URL of the lines listing.
    pub fn lines_url(&self) -> String {
        self.join(&self.lines_path)
    }

    /// URL of the stations listing.
    pub fn stations_url(&self) -> String {
        self.join(&self.stations_path)
    }

    /// URL of one station's timetable.
    ///
    /// `station_id` always lands in a single percent-encoded path segment.
    pub fn station_times_url(&self, station_id: &str) -> Result<String, ApiError> {
        if matches!(station_id, "" | "." | "..") {
            return Err(ApiError::Config {
                message: format!("invalid station id {station_id:?}"),
            });
        }

        let stations = self.stations_url();
        let mut url = reqwest::Url::parse(&stations).map_err(|e| ApiError::Config {
            message: format!("invalid stations URL {stations:?}: {e}"),
        })?;
        url.path_segments_mut()
            .map_err(|()| ApiError::Config {
                message: format!("stations URL {stations:?} cannot take path segments"),
            })?
            .pop_if_empty()
            .push(station_id)
            .push("times")
            .push("");
        Ok(url.into())
    }

    fn join(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}
