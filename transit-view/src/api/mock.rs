//! In-memory fetcher for tests and offline development.
//!
//! Serves canned JSON bodies keyed by URL and records every request, so
//! tests can assert which endpoints were hit and in what order.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde_json::Value;

use super::error::ApiError;
use super::fetcher::ResourceFetcher;

#[derive(Debug, Clone)]
enum Canned {
    Json(Value),
    Failure { status: u16, message: String },
}

#[derive(Debug, Clone)]
struct Route {
    canned: Canned,
    delay: Option<Duration>,
}

/// Mock fetcher that serves canned responses.
///
/// Unknown URLs yield [`ApiError::NotFound`].
#[derive(Debug, Clone, Default)]
pub struct MockFetcher {
    routes: HashMap<String, Route>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockFetcher {
    /// Create a mock with no routes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `body` for `url`.
    pub fn with_json(mut self, url: impl Into<String>, body: Value) -> Self {
        self.routes.insert(
            url.into(),
            Route {
                canned: Canned::Json(body),
                delay: None,
            },
        );
        self
    }

    /// Fail requests for `url` with an API error status.
    pub fn with_failure(
        mut self,
        url: impl Into<String>,
        status: u16,
        message: impl Into<String>,
    ) -> Self {
        self.routes.insert(
            url.into(),
            Route {
                canned: Canned::Failure {
                    status,
                    message: message.into(),
                },
                delay: None,
            },
        );
        self
    }

    /// Delay the response for an already-registered `url`.
    pub fn with_delay(mut self, url: &str, delay: Duration) -> Self {
        if let Some(route) = self.routes.get_mut(url) {
            route.delay = Some(delay);
        }
        self
    }

    /// URLs requested so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    /// Number of requests made for `url`.
    pub fn call_count(&self, url: &str) -> usize {
        self.calls().iter().filter(|c| c.as_str() == url).count()
    }
}

impl ResourceFetcher for MockFetcher {
    async fn get(&self, url: &str) -> Result<Value, ApiError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(url.to_string());
        }

        let route = self.routes.get(url).cloned().ok_or_else(|| ApiError::NotFound {
            url: url.to_string(),
        })?;

        if let Some(delay) = route.delay {
            tokio::time::sleep(delay).await;
        }

        match route.canned {
            Canned::Json(body) => Ok(body),
            Canned::Failure { status, message } => Err(ApiError::Api { status, message }),
        }
    }
}
