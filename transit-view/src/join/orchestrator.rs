//! Sequential fetch-then-join of lines and stations.
//!
//! One orchestration run fetches the lines listing, then (only if that
//! succeeded) the stations listing, then indexes both by their join key.
//! The two fetches are never issued concurrently, so a lines failure
//! short-circuits before stations are requested. No partial view is ever
//! returned.

use std::fmt;
use std::future::Future;

use tracing::{debug, warn};

use crate::api::ApiError;
use crate::domain::{Collection, Index, Record, URL_FIELD, index, record_key};

/// Field on a station record holding its line's hyperlink.
pub const LINE_FIELD: &str = "line";

/// Which fetch of a run failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FetchStage {
    Lines,
    Stations,
}

impl fmt::Display for FetchStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchStage::Lines => write!(f, "lines"),
            FetchStage::Stations => write!(f, "stations"),
        }
    }
}

/// A fetch failed during an orchestration run.
///
/// The underlying error is passed through unchanged.
#[derive(Debug, thiserror::Error)]
#[error("failed to fetch {stage}: {source}")]
pub struct FetchError {
    pub stage: FetchStage,
    pub source: ApiError,
}

/// Progress of one orchestration run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Idle,
    FetchingLines,
    FetchingStations,
    Joined,
    Failed(FetchStage),
}

impl RunState {
    /// `Joined` and `Failed` end a run.
    pub fn is_terminal(self) -> bool {
        matches!(self, RunState::Joined | RunState::Failed(_))
    }

    /// Check whether `next` may follow `self`.
    pub fn can_advance_to(self, next: RunState) -> bool {
        use RunState::*;
        matches!(
            (self, next),
            (Idle, FetchingLines)
                | (FetchingLines, FetchingStations)
                | (FetchingLines, Failed(FetchStage::Lines))
                | (FetchingStations, Joined)
                | (FetchingStations, Failed(FetchStage::Stations))
        )
    }

    /// The state after moving to `next`, or `None` if that move is illegal.
    pub fn advance(self, next: RunState) -> Option<RunState> {
        self.can_advance_to(next).then_some(next)
    }
}

/// Options for an orchestration run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinOptions {
    /// Field both collections are indexed by.
    pub key_field: String,
    /// Whether to build the stations index as well as the lines index.
    pub index_stations: bool,
}

impl Default for JoinOptions {
    fn default() -> Self {
        Self {
            key_field: URL_FIELD.to_string(),
            index_stations: true,
        }
    }
}

impl JoinOptions {
    /// Skip building the stations index.
    pub fn without_stations_index(mut self) -> Self {
        self.index_stations = false;
        self
    }

    /// Index by a different field.
    pub fn with_key_field(mut self, field: impl Into<String>) -> Self {
        self.key_field = field.into();
        self
    }
}

/// Lines and stations together with their indices.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinedView {
    pub lines: Collection,
    pub stations: Collection,
    pub lines_index: Index,
    /// Present unless the run was asked to skip it.
    pub stations_index: Option<Index>,
}

impl JoinedView {
    /// Look up a line by key.
    pub fn line(&self, key: &str) -> Option<&Record> {
        self.lines_index.get(key)
    }

    /// Look up a station by key, if the stations index was built.
    pub fn station(&self, key: &str) -> Option<&Record> {
        self.stations_index.as_ref()?.get(key)
    }

    /// Resolve the line a station belongs to.
    pub fn line_of(&self, station: &Record) -> Option<&Record> {
        let key = record_key(station, LINE_FIELD)?;
        self.lines_index.get(&key)
    }

    /// Stations paired with their resolved line, in listing order.
    pub fn stations_with_lines(&self) -> impl Iterator<Item = (&Record, Option<&Record>)> {
        self.stations.iter().map(|s| (s, self.line_of(s)))
    }
}

/// One orchestration run and its current state.
#[derive(Debug, Clone)]
pub struct JoinRun {
    options: JoinOptions,
    state: RunState,
}

impl JoinRun {
    /// Create an idle run.
    pub fn new(options: JoinOptions) -> Self {
        Self {
            options,
            state: RunState::Idle,
        }
    }

    /// Current state.
    pub fn state(&self) -> RunState {
        self.state
    }

    fn advance(&mut self, next: RunState) {
        match self.state.advance(next) {
            Some(state) => {
                debug!(from = ?self.state, to = ?state, "join run transition");
                self.state = state;
            }
            None => warn!(from = ?self.state, to = ?next, "illegal join run transition ignored"),
        }
    }

    /// Fetch lines, then stations, then index both.
    ///
    /// Each call is a fresh run: the state is reset to `Idle` first.
    pub async fn execute<L, LF, S, SF>(
        &mut self,
        fetch_lines: L,
        fetch_stations: S,
    ) -> Result<JoinedView, FetchError>
    where
        L: FnOnce() -> LF,
        LF: Future<Output = Result<Collection, ApiError>>,
        S: FnOnce() -> SF,
        SF: Future<Output = Result<Collection, ApiError>>,
    {
        self.state = RunState::Idle;

        self.advance(RunState::FetchingLines);
        let lines = match fetch_lines().await {
            Ok(lines) => lines,
            Err(source) => {
                self.advance(RunState::Failed(FetchStage::Lines));
                return Err(FetchError {
                    stage: FetchStage::Lines,
                    source,
                });
            }
        };

        self.advance(RunState::FetchingStations);
        let stations = match fetch_stations().await {
            Ok(stations) => stations,
            Err(source) => {
                self.advance(RunState::Failed(FetchStage::Stations));
                return Err(FetchError {
                    stage: FetchStage::Stations,
                    source,
                });
            }
        };

        let key = self.options.key_field.as_str();
        let lines_index = index(&lines, key);
        let stations_index = self
            .options
            .index_stations
            .then(|| index(&stations, key));

        self.advance(RunState::Joined);
        debug!(
            lines = lines.len(),
            stations = stations.len(),
            "joined lines and stations"
        );

        Ok(JoinedView {
            lines,
            stations,
            lines_index,
            stations_index,
        })
    }
}

/// Run one orchestration with default options.
pub async fn load_joined<L, LF, S, SF>(
    fetch_lines: L,
    fetch_stations: S,
) -> Result<JoinedView, FetchError>
where
    L: FnOnce() -> LF,
    LF: Future<Output = Result<Collection, ApiError>>,
    S: FnOnce() -> SF,
    SF: Future<Output = Result<Collection, ApiError>>,
{
    load_joined_with(&JoinOptions::default(), fetch_lines, fetch_stations).await
}

/// Run one orchestration with the given options.
pub async fn load_joined_with<L, LF, S, SF>(
    options: &JoinOptions,
    fetch_lines: L,
    fetch_stations: S,
) -> Result<JoinedView, FetchError>
where
    L: FnOnce() -> LF,
    LF: Future<Output = Result<Collection, ApiError>>,
    S: FnOnce() -> SF,
    SF: Future<Output = Result<Collection, ApiError>>,
{
    JoinRun::new(options.clone())
        .execute(fetch_lines, fetch_stations)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    fn collection(value: Value) -> Collection {
        serde_json::from_value(value).unwrap()
    }

    fn red_line() -> Collection {
        collection(json!([{"url": "/l/1", "name": "Red"}]))
    }

    fn main_st() -> Collection {
        collection(json!([{"url": "/s/1", "name": "Main St", "line": "/l/1"}]))
    }

    fn unavailable() -> ApiError {
        ApiError::Api {
            status: 503,
            message: "unavailable".into(),
        }
    }

    async fn fetch_red_line() -> Result<Collection, ApiError> {
        Ok(red_line())
    }

    async fn fetch_main_st() -> Result<Collection, ApiError> {
        Ok(main_st())
    }

    async fn fetch_nothing() -> Result<Collection, ApiError> {
        Ok(Vec::new())
    }

    async fn fetch_unavailable() -> Result<Collection, ApiError> {
        Err(unavailable())
    }

    #[tokio::test]
    async fn joins_lines_and_stations() {
        let view = load_joined(fetch_red_line, fetch_main_st).await.unwrap();

        assert_eq!(view.line("/l/1").and_then(Record::name), Some("Red"));
        assert_eq!(view.station("/s/1").and_then(Record::name), Some("Main St"));
        assert_eq!(view.lines.len(), 1);
        assert_eq!(view.stations.len(), 1);
    }

    #[tokio::test]
    async fn line_of_resolves_station_line() {
        let view = load_joined(fetch_red_line, fetch_main_st).await.unwrap();

        let station = &view.stations[0];
        assert_eq!(view.line_of(station).and_then(Record::name), Some("Red"));

        let pairs: Vec<_> = view.stations_with_lines().collect();
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].1.and_then(Record::name), Some("Red"));
    }

    #[tokio::test]
    async fn line_of_unknown_line_is_none() {
        let stations = collection(json!([
            {"url": "/s/2", "line": "/l/9"},
            {"url": "/s/3"}
        ]));
        let view = load_joined(fetch_red_line, || async move { Ok::<_, ApiError>(stations) })
            .await
            .unwrap();

        assert!(view.line_of(&view.stations[0]).is_none());
        assert!(view.line_of(&view.stations[1]).is_none());
    }

    #[tokio::test]
    async fn lines_failure_skips_stations_fetch() {
        let stations_called = AtomicBool::new(false);

        let mut run = JoinRun::new(JoinOptions::default());
        let err = run
            .execute(
                fetch_unavailable,
                || async {
                    stations_called.store(true, Ordering::SeqCst);
                    fetch_main_st().await
                },
            )
            .await
            .unwrap_err();

        assert_eq!(err.stage, FetchStage::Lines);
        assert!(matches!(err.source, ApiError::Api { status: 503, .. }));
        assert!(!stations_called.load(Ordering::SeqCst));
        assert_eq!(run.state(), RunState::Failed(FetchStage::Lines));
    }

    #[tokio::test]
    async fn stations_failure_is_tagged() {
        let mut run = JoinRun::new(JoinOptions::default());
        let err = run
            .execute(fetch_red_line, fetch_unavailable)
            .await
            .unwrap_err();

        assert_eq!(err.stage, FetchStage::Stations);
        assert_eq!(run.state(), RunState::Failed(FetchStage::Stations));
        assert_eq!(
            err.to_string(),
            "failed to fetch stations: API error 503: unavailable"
        );
    }

    #[tokio::test]
    async fn stations_fetched_after_lines() {
        let order = AtomicUsize::new(0);
        let lines_at = AtomicUsize::new(usize::MAX);
        let stations_at = AtomicUsize::new(usize::MAX);

        load_joined(
            || async {
                lines_at.store(order.fetch_add(1, Ordering::SeqCst), Ordering::SeqCst);
                fetch_red_line().await
            },
            || async {
                stations_at.store(order.fetch_add(1, Ordering::SeqCst), Ordering::SeqCst);
                fetch_main_st().await
            },
        )
        .await
        .unwrap();

        assert_eq!(lines_at.load(Ordering::SeqCst), 0);
        assert_eq!(stations_at.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn stations_index_can_be_skipped() {
        let options = JoinOptions::default().without_stations_index();
        let view = load_joined_with(&options, fetch_red_line, fetch_main_st)
            .await
            .unwrap();

        assert!(view.stations_index.is_none());
        assert!(view.station("/s/1").is_none());
        assert_eq!(view.stations.len(), 1);
        assert!(view.line("/l/1").is_some());
    }

    #[tokio::test]
    async fn custom_key_field() {
        let lines = collection(json!([{"id": 1, "name": "Red"}]));
        let options = JoinOptions::default().with_key_field("id");
        let view = load_joined_with(
            &options,
            || async move { Ok::<_, ApiError>(lines) },
            fetch_nothing,
        )
        .await
        .unwrap();

        assert_eq!(view.line("1").and_then(Record::name), Some("Red"));
    }

    #[tokio::test]
    async fn repeated_runs_are_structurally_equal() {
        let first = load_joined(fetch_red_line, fetch_main_st).await.unwrap();
        let second = load_joined(fetch_red_line, fetch_main_st).await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn successful_run_ends_joined() {
        let mut run = JoinRun::new(JoinOptions::default());
        assert_eq!(run.state(), RunState::Idle);
        run.execute(fetch_nothing, fetch_nothing).await.unwrap();
        assert_eq!(run.state(), RunState::Joined);
        assert!(run.state().is_terminal());
    }

    #[test]
    fn transitions() {
        use RunState::*;
        assert!(Idle.can_advance_to(FetchingLines));
        assert!(FetchingLines.can_advance_to(FetchingStations));
        assert!(FetchingLines.can_advance_to(Failed(FetchStage::Lines)));
        assert!(FetchingStations.can_advance_to(Joined));
        assert!(FetchingStations.can_advance_to(Failed(FetchStage::Stations)));

        assert!(!Idle.can_advance_to(FetchingStations));
        assert!(!FetchingLines.can_advance_to(Joined));
        assert!(!FetchingLines.can_advance_to(Failed(FetchStage::Stations)));
        assert!(!FetchingStations.can_advance_to(Failed(FetchStage::Lines)));
        assert!(!Joined.can_advance_to(FetchingLines));
        assert!(!Failed(FetchStage::Lines).can_advance_to(FetchingStations));

        assert!(!Idle.is_terminal());
        assert!(!FetchingStations.is_terminal());
        assert!(Failed(FetchStage::Stations).is_terminal());
    }

    #[test]
    fn advance_rejects_illegal_moves() {
        use RunState::*;
        assert_eq!(Idle.advance(FetchingLines), Some(FetchingLines));
        assert_eq!(FetchingStations.advance(Joined), Some(Joined));
        assert_eq!(Idle.advance(Joined), None);
        assert_eq!(Joined.advance(FetchingStations), None);
        assert_eq!(Failed(FetchStage::Lines).advance(Idle), None);
    }

    #[test]
    fn run_keeps_state_on_illegal_move() {
        let mut run = JoinRun::new(JoinOptions::default());
        run.advance(RunState::Joined);
        assert_eq!(run.state(), RunState::Idle);

        run.advance(RunState::FetchingLines);
        run.advance(RunState::Failed(FetchStage::Stations));
        assert_eq!(run.state(), RunState::FetchingLines);
    }
}
