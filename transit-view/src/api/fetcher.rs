//! The GET capability and listing decoding.

use std::future::Future;

use serde_json::Value;

use crate::domain::{Collection, Record};

use super::error::ApiError;

/// Performs GET requests and returns the parsed JSON body.
///
/// This abstraction allows the client and orchestrator to be tested with
/// mock data.
pub trait ResourceFetcher: Send + Sync {
    /// Fetch `url` and parse the body as JSON.
    fn get(&self, url: &str) -> impl Future<Output = Result<Value, ApiError>> + Send;
}

impl<F: ResourceFetcher> ResourceFetcher for &F {
    fn get(&self, url: &str) -> impl Future<Output = Result<Value, ApiError>> + Send {
        (**self).get(url)
    }
}

/// Decode a listing body into a collection.
///
/// Accepts a bare array of objects or a paginated envelope whose `results`
/// field is one. Only the page present in the body is decoded.
pub fn parse_collection(url: &str, body: Value) -> Result<Collection, ApiError> {
    const EXPECTED: &str = "array of objects";

    let items = match body {
        Value::Array(items) => items,
        Value::Object(mut envelope) => match envelope.remove("results") {
            Some(Value::Array(items)) => items,
            _ => {
                return Err(ApiError::UnexpectedShape {
                    url: url.to_string(),
                    expected: EXPECTED,
                });
            }
        },
        _ => {
            return Err(ApiError::UnexpectedShape {
                url: url.to_string(),
                expected: EXPECTED,
            });
        }
    };

    items
        .into_iter()
        .map(|item| {
            Record::from_value(item).ok_or_else(|| ApiError::UnexpectedShape {
                url: url.to_string(),
                expected: EXPECTED,
            })
        })
        .collect()
}
