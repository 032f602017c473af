//! reqwest-backed fetcher.

use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use serde_json::Value;
use tracing::trace;

use super::config::ApiConfig;
use super::error::ApiError;
use super::fetcher::ResourceFetcher;

/// How much of an unparseable body to keep in the error.
const BODY_EXCERPT_CHARS: usize = 500;

/// HTTP implementation of [`ResourceFetcher`].
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    http: reqwest::Client,
}

impl HttpFetcher {
    /// Create a new fetcher with the timeout from `config`.
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        config.validate()?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { http })
    }
}

impl ResourceFetcher for HttpFetcher {
    async fn get(&self, url: &str) -> Result<Value, ApiError> {
        trace!(url, "GET");

        let response = self.http.get(url).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(ApiError::Unauthorized);
        }

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound {
                url: url.to_string(),
            });
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| ApiError::Json {
            message: e.to_string(),
            body: Some(body.chars().take(BODY_EXCERPT_CHARS).collect()),
        })
    }
}
