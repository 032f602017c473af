//! Typed transit API client.
//!
//! Binds a [`ResourceFetcher`] to an [`ApiConfig`] and exposes the
//! listings the views need, plus the joined lines/stations view.

use chrono::{NaiveDate, NaiveDateTime};
use futures::future::try_join_all;
use tracing::debug;

use crate::domain::Collection;
use crate::join::{FetchError, JoinOptions, JoinedView, load_joined_with};
use crate::schedule::{DailyEntry, ScheduleError, daily_times, merge_by_time, next_daily_times};

use super::config::ApiConfig;
use super::error::ApiError;
use super::fetcher::{ResourceFetcher, parse_collection};
use super::http::HttpFetcher;

/// Transit API client.
#[derive(Debug, Clone)]
pub struct TransitClient<F> {
    fetcher: F,
    config: ApiConfig,
}

impl TransitClient<HttpFetcher> {
    /// Create a client that talks HTTP.
    pub fn http(config: ApiConfig) -> Result<Self, ApiError> {
        let fetcher = HttpFetcher::new(&config)?;
        Ok(Self { fetcher, config })
    }
}

impl<F: ResourceFetcher> TransitClient<F> {
    /// Create a client over any fetcher.
    pub fn new(fetcher: F, config: ApiConfig) -> Self {
        Self { fetcher, config }
    }

    async fn collection(&self, url: &str) -> Result<Collection, ApiError> {
        let body = self.fetcher.get(url).await?;
        let records = parse_collection(url, body)?;
        debug!(url, count = records.len(), "fetched collection");
        Ok(records)
    }

    /// Fetch all lines.
    pub async fn lines(&self) -> Result<Collection, ApiError> {
        self.collection(&self.config.lines_url()).await
    }

    /// Fetch all stations.
    pub async fn stations(&self) -> Result<Collection, ApiError> {
        self.collection(&self.config.stations_url()).await
    }

    /// Fetch the raw timetable rows of one station.
    pub async fn station_times(&self, station_id: &str) -> Result<Collection, ApiError> {
        let url = self.config.station_times_url(station_id)?;
        self.collection(&url).await
    }

    /// Fetch and decode the timetable of one station.
    pub async fn daily_schedule(&self, station_id: &str) -> Result<Vec<DailyEntry>, ScheduleError> {
        let records = self.station_times(station_id).await?;
        DailyEntry::from_records(&records)
    }

    /// The timetable that applies to one station on `date`, from midnight.
    pub async fn daily_times(
        &self,
        station_id: &str,
        date: NaiveDate,
    ) -> Result<Vec<DailyEntry>, ScheduleError> {
        let entries = self.daily_schedule(station_id).await?;
        Ok(daily_times(&entries, date).into_iter().cloned().collect())
    }

    /// Fetch lines then stations and index both.
    pub async fn load_joined(&self) -> Result<JoinedView, FetchError> {
        self.load_joined_with(&JoinOptions::default()).await
    }

    /// Fetch lines then stations and index them as `options` says.
    pub async fn load_joined_with(&self, options: &JoinOptions) -> Result<JoinedView, FetchError> {
        load_joined_with(options, || self.lines(), || self.stations()).await
    }

    /// Upcoming times across several stations, earliest first.
    ///
    /// The stations' timetables are fetched concurrently. Each one is
    /// narrowed to the rows that apply on the day of `at` and are not yet
    /// past; the results are then merged by time.
    pub async fn location_times(
        &self,
        station_ids: &[&str],
        at: NaiveDateTime,
    ) -> Result<Vec<DailyEntry>, ScheduleError> {
        let schedules = try_join_all(station_ids.iter().map(|id| self.daily_schedule(id))).await?;

        let upcoming = schedules.iter().map(|entries| {
            next_daily_times(entries, at)
                .into_iter()
                .cloned()
                .collect::<Vec<_>>()
        });

        Ok(merge_by_time(upcoming))
    }
}
