//! Error taxonomy for backend calls made by the table.
//!
//! ERROR HANDLING
//! ==============
//! Every network operation returns [`ApiError`]; callers convert it into a
//! [`crate::Notice`] instead of propagating further. Transport failures and
//! timeouts share one generic connectivity message. Server failures keep
//! the body's `message` field and the raw payload for diagnostics.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use std::time::Duration;

use serde_json::Value;

use crate::registry::RegistryError;

pub const CONNECTIVITY_MESSAGE: &str = "Unable to reach the server. Check your connection and try again.";
pub const SERVER_FALLBACK_MESSAGE: &str = "The server could not complete the request.";
pub const INVALID_REQUEST_MESSAGE: &str = "This record cannot be addressed by the backend.";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),
    #[error("request timed out after {}s", .0.as_secs())]
    Timeout(Duration),
    #[error("server returned {status}: {message}")]
    Server { status: u16, message: String, payload: Option<Value> },
    #[error("invalid response body: {0}")]
    Decode(String),
    /// The request was never sent because its path could not be built.
    #[error("request not sent: {0}")]
    InvalidRequest(String),
}

impl ApiError {
    /// Build a server error from a non-success status and raw body text.
    #[must_use]
    pub fn from_response(status: u16, body: &str) -> Self {
        let payload = serde_json::from_str::<Value>(body)
            .ok()
            .or_else(|| (!body.trim().is_empty()).then(|| Value::String(body.to_owned())));
        let message = payload
            .as_ref()
            .and_then(server_message)
            .unwrap_or_else(|| SERVER_FALLBACK_MESSAGE.to_owned());
        Self::Server { status, message, payload }
    }

    /// Message suitable for the notice headline.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Network(_) | Self::Timeout(_) => CONNECTIVITY_MESSAGE.to_owned(),
            Self::Server { message, .. } => message.clone(),
            Self::Decode(_) => SERVER_FALLBACK_MESSAGE.to_owned(),
            Self::InvalidRequest(_) => INVALID_REQUEST_MESSAGE.to_owned(),
        }
    }

    /// Diagnostic text for the notice details area.
    #[must_use]
    pub fn details(&self) -> Option<String> {
        match self {
            Self::Network(detail) | Self::Decode(detail) | Self::InvalidRequest(detail) => Some(detail.clone()),
            Self::Timeout(_) => Some(self.to_string()),
            Self::Server { status, payload, .. } => Some(match payload {
                Some(Value::String(raw)) => format!("HTTP {status}: {raw}"),
                Some(value) => format!("HTTP {status}: {value}"),
                None => format!("HTTP {status}"),
            }),
        }
    }

    #[must_use]
    pub fn is_connectivity(&self) -> bool {
        matches!(self, Self::Network(_) | Self::Timeout(_))
    }
}

fn server_message(payload: &Value) -> Option<String> {
    ["message", "error", "msg"]
        .iter()
        .find_map(|key| payload.get(*key).and_then(Value::as_str))
        .filter(|message| !message.trim().is_empty())
        .map(ToOwned::to_owned)
}

impl From<RegistryError> for ApiError {
    fn from(err: RegistryError) -> Self {
        Self::InvalidRequest(err.to_string())
    }
}
