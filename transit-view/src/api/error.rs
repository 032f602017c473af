//! Transit API error types.

/// Errors that can occur when talking to the transit API.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Authentication failed
    #[error("unauthorized")]
    Unauthorized,

    /// Resource does not exist
    #[error("not found: {url}")]
    NotFound { url: String },

    /// API returned an error status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Response body was not valid JSON
    #[error("JSON parse error: {message}")]
    Json {
        message: String,
        body: Option<String>,
    },

    /// Response was JSON but not the expected shape
    #[error("unexpected response from {url}: expected {expected}")]
    UnexpectedShape { url: String, expected: &'static str },

    /// Client configuration is unusable
    #[error("invalid configuration: {message}")]
    Config { message: String },
}
