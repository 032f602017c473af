//! Fetch-then-join orchestration of lines and stations.
//!
//! Lines are always fetched before stations; both are then indexed by
//! their hyperlink so station records can be resolved to their line.

mod orchestrator;
mod slot;

pub use orchestrator::{
    FetchError, FetchStage, JoinOptions, JoinRun, JoinedView, LINE_FIELD, RunState, load_joined,
    load_joined_with,
};
pub use slot::{RefreshSummary, ViewSlot};
