//! Holder for the view currently shown to the presentation layer.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::api::{ResourceFetcher, TransitClient};

use super::orchestrator::{FetchError, JoinOptions, JoinedView};

/// Counts reported after a successful refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshSummary {
    pub lines: usize,
    pub stations: usize,
}

/// Thread-safe holder for the current joined view.
///
/// Refreshes are not cancelled when a newer one starts. If two overlap,
/// whichever finishes last is what the slot ends up holding, regardless of
/// which was requested last.
#[derive(Clone, Default)]
pub struct ViewSlot {
    inner: Arc<RwLock<Option<Arc<JoinedView>>>>,
    options: JoinOptions,
}

impl ViewSlot {
    /// Create an empty slot using default join options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty slot using the given join options.
    pub fn with_options(options: JoinOptions) -> Self {
        Self {
            inner: Arc::new(RwLock::new(None)),
            options,
        }
    }

    /// The view currently held, if any.
    pub async fn current(&self) -> Option<Arc<JoinedView>> {
        let guard = self.inner.read().await;
        guard.clone()
    }

    /// Check whether a view has been loaded.
    pub async fn is_loaded(&self) -> bool {
        let guard = self.inner.read().await;
        guard.is_some()
    }

    /// Replace the held view.
    pub async fn replace(&self, view: JoinedView) {
        let mut guard = self.inner.write().await;
        *guard = Some(Arc::new(view));
    }

    /// Run one orchestration and store its result.
    ///
    /// On success, replaces the current view. On failure, the existing view
    /// is preserved and the error is returned.
    pub async fn refresh<F: ResourceFetcher>(
        &self,
        client: &TransitClient<F>,
    ) -> Result<RefreshSummary, FetchError> {
        let view = match client.load_joined_with(&self.options).await {
            Ok(view) => view,
            Err(e) => {
                warn!(stage = %e.stage, error = %e.source, "refresh failed, keeping previous view");
                return Err(e);
            }
        };

        let summary = RefreshSummary {
            lines: view.lines.len(),
            stations: view.stations.len(),
        };
        self.replace(view).await;

        info!(
            lines = summary.lines,
            stations = summary.stations,
            "view refreshed"
        );
        Ok(summary)
    }
}
