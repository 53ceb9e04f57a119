//! HTTP seam between the table and the marketplace backend.
//!
//! DESIGN
//! ======
//! The table never builds requests itself. Hosts supply an
//! [`EntityTransport`] configured from one [`ClientConfig`] (base URL plus a
//! single request timeout shared by every call) and holding the bearer
//! token. The browser client implements it over `gloo-net`, the CLI over
//! `reqwest`, and tests with in-memory mocks.
//!
//! The trait is `?Send` because browser futures are not `Send`.

#[cfg(test)]
#[path = "transport_test.rs"]
mod transport_test;

use std::time::Duration;

use serde_json::Value;

use crate::error::ApiError;
use crate::record::{Record, records_from_value};
use crate::registry::EndpointRegistry;

pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:3000";

/// Connection settings shared by every transport.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl ClientConfig {
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim().trim_end_matches('/').to_owned(),
            timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Absolute URL for an API path. An empty base URL yields the path
    /// unchanged, which browsers resolve against the page origin.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{path}", self.base_url)
        } else {
            format!("{}/{path}", self.base_url)
        }
    }
}

/// `Authorization` header value for a stored token, if any.
#[must_use]
pub fn bearer_header_value(token: Option<&str>) -> Option<String> {
    let token = token?.trim();
    if token.is_empty() { None } else { Some(format!("Bearer {token}")) }
}

/// Async HTTP operations the table issues. Paths are API-relative.
#[async_trait::async_trait(?Send)]
pub trait EntityTransport {
    /// `GET path`, decoded as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure, timeout, non-success
    /// status, or an undecodable body.
    async fn get(&self, path: &str) -> Result<Value, ApiError>;

    /// `DELETE path`. Empty success bodies decode as `Value::Null`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure, timeout or non-success
    /// status.
    async fn delete(&self, path: &str) -> Result<Value, ApiError>;
}

/// Load the collection for `route_key` from its list endpoint.
///
/// # Errors
///
/// Returns the transport error, or [`ApiError::Decode`] when the body is not
/// a collection of identifiable records.
pub async fn fetch_collection<T: EntityTransport + ?Sized>(
    transport: &T,
    registry: &EndpointRegistry,
    route_key: &str,
) -> Result<Vec<Record>, ApiError> {
    let routes = registry.resolve(route_key);
    let body = transport.get(&routes.list).await?;
    records_from_value(body).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Load one record for the detail page, when the entity type has a view route.
///
/// # Errors
///
/// Returns the transport error, or [`ApiError::Decode`] when the body is not
/// an identifiable record.
pub async fn fetch_detail<T: EntityTransport + ?Sized>(transport: &T, api_path: &str) -> Result<Record, ApiError> {
    let body = transport.get(api_path).await?;
    let body = match body {
        Value::Object(mut map) if !map.contains_key("_id") && !map.contains_key("id") => {
            map.remove("data").unwrap_or(Value::Object(map))
        }
        other => other,
    };
    Record::from_value(body).map_err(|e| ApiError::Decode(e.to_string()))
}
