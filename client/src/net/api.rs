//! Browser HTTP transport for entity endpoints.
//!
//! Client-side (csr): real HTTP calls via `gloo-net`, raced against a
//! `gloo-timers` timeout so every request honours `ClientConfig::timeout`.
//! Native builds (tests): requests fail with a network error since there is
//! no browser to issue them.
//!
//! ERROR HANDLING
//! ==============
//! Every failure is mapped into `ApiError` here; components only ever see
//! the shared taxonomy and turn it into a notice.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use entities::{ApiError, ClientConfig, EntityTransport};
use serde_json::Value;

/// `localStorage` key holding the operator's bearer token.
pub const TOKEN_STORAGE_KEY: &str = "token";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Method {
    Get,
    Delete,
}

/// `EntityTransport` backed by the browser fetch API.
#[derive(Clone, Debug)]
pub struct BrowserTransport {
    config: ClientConfig,
    authorization: Option<String>,
}

impl BrowserTransport {
    pub fn new(config: ClientConfig, token: Option<&str>) -> Self {
        Self { config, authorization: entities::bearer_header_value(token) }
    }

    /// Same-origin transport using the token stored by the login flow.
    pub fn from_storage() -> Self {
        Self::new(ClientConfig::new(""), stored_token().as_deref())
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    async fn send(&self, method: Method, path: &str) -> Result<Value, ApiError> {
        #[cfg(feature = "csr")]
        {
            use futures::future::{Either, select};
            use gloo_net::http::Request;

            let url = self.config.url(path);
            let mut builder = match method {
                Method::Get => Request::get(&url),
                Method::Delete => Request::delete(&url),
            };
            if let Some(value) = &self.authorization {
                builder = builder.header("Authorization", value);
            }
            let millis = u32::try_from(self.config.timeout.as_millis()).unwrap_or(u32::MAX);
            let request = Box::pin(builder.send());
            let timer = Box::pin(gloo_timers::future::TimeoutFuture::new(millis));
            let resp = match select(request, timer).await {
                Either::Left((result, _)) => result.map_err(|e| ApiError::Network(e.to_string()))?,
                Either::Right(_) => {
                    log::warn!("{method:?} {path} timed out");
                    return Err(ApiError::Timeout(self.config.timeout));
                }
            };
            let body = resp.text().await.map_err(|e| ApiError::Network(e.to_string()))?;
            response_result(resp.status(), &body)
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (method, &self.authorization);
            Err(ApiError::Network(format!("{path}: not available outside the browser")))
        }
    }
}

#[async_trait::async_trait(?Send)]
impl EntityTransport for BrowserTransport {
    async fn get(&self, path: &str) -> Result<Value, ApiError> {
        self.send(Method::Get, path).await
    }

    async fn delete(&self, path: &str) -> Result<Value, ApiError> {
        self.send(Method::Delete, path).await
    }
}

/// Read the bearer token from `localStorage`, if one is stored.
pub fn stored_token() -> Option<String> {
    #[cfg(feature = "csr")]
    {
        let storage = web_sys::window()?.local_storage().ok()??;
        storage.get_item(TOKEN_STORAGE_KEY).ok()?.filter(|t| !t.trim().is_empty())
    }
    #[cfg(not(feature = "csr"))]
    {
        None
    }
}

/// Map a settled response into the shared result shape.
fn response_result(status: u16, body: &str) -> Result<Value, ApiError> {
    if !(200..300).contains(&status) {
        return Err(ApiError::from_response(status, body));
    }
    if body.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))
}
