//! `reqwest` implementation of the entity transport.

use entities::{ApiError, ClientConfig, EntityTransport, bearer_header_value};
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use serde_json::Value;

use crate::CliError;

pub struct ReqwestTransport {
    client: reqwest::Client,
    config: ClientConfig,
}

impl ReqwestTransport {
    /// Build a client that sends the bearer token on every request and
    /// applies the configured timeout.
    pub fn new(config: ClientConfig, token: Option<&str>) -> Result<Self, CliError> {
        let mut headers = HeaderMap::new();
        if let Some(value) = bearer_header_value(token) {
            headers.insert(AUTHORIZATION, HeaderValue::from_str(&value)?);
        }
        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()?;
        Ok(Self { client, config })
    }

    async fn send(&self, method: reqwest::Method, path: &str) -> Result<Value, ApiError> {
        let url = self.config.url(path);
        let response = self
            .client
            .request(method, &url)
            .send()
            .await
            .map_err(|error| self.transport_error(&error))?;
        let status = response.status();
        let body = response.text().await.map_err(|error| self.transport_error(&error))?;

        if !status.is_success() {
            return Err(ApiError::from_response(status.as_u16(), &body));
        }
        decode_body(&body)
    }

    fn transport_error(&self, error: &reqwest::Error) -> ApiError {
        if error.is_timeout() {
            ApiError::Timeout(self.config.timeout)
        } else {
            ApiError::Network(error.to_string())
        }
    }
}

#[async_trait::async_trait(?Send)]
impl EntityTransport for ReqwestTransport {
    async fn get(&self, path: &str) -> Result<Value, ApiError> {
        self.send(reqwest::Method::GET, path).await
    }

    async fn delete(&self, path: &str) -> Result<Value, ApiError> {
        self.send(reqwest::Method::DELETE, path).await
    }
}

pub(crate) fn decode_body(body: &str) -> Result<Value, ApiError> {
    if body.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(body).map_err(|error| ApiError::Decode(error.to_string()))
}
