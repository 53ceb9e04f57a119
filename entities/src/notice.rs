//! Dismissible acknowledgments shown after a table action settles.

use serde::{Deserialize, Serialize};

use crate::error::ApiError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoticeKind {
    Success,
    /// Some requests of a bulk action succeeded, others failed.
    Partial,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub message: String,
    /// Raw diagnostics (server payload, transport error) for the footer.
    pub details: Option<String>,
}

impl Notice {
    #[must_use]
    pub fn success(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Success, title: title.into(), message: message.into(), details: None }
    }

    #[must_use]
    pub fn from_error(title: impl Into<String>, err: &ApiError) -> Self {
        Self { kind: NoticeKind::Error, title: title.into(), message: err.user_message(), details: err.details() }
    }
}
