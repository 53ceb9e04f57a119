//! Loosely-typed entity records and their identifiers.
//!
//! DESIGN
//! ======
//! Backend payloads differ per entity type, so a record is a JSON object plus
//! an identifier extracted once at load time. Rows without a stable `_id` or
//! `id` are rejected here rather than given a synthetic key, which keeps row
//! identity stable across re-renders and selection changes.

#[cfg(test)]
#[path = "record_test.rs"]
mod record_test;

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Field names checked for a record identifier, in priority order.
pub const ID_FIELDS: [&str; 2] = ["_id", "id"];

/// Wrapper keys accepted around a collection payload.
const COLLECTION_KEYS: [&str; 3] = ["data", "items", "results"];

pub type Fields = Map<String, Value>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecordError {
    #[error("record has no `_id` or `id` field")]
    MissingId,
    #[error("record is not a JSON object")]
    NotAnObject,
    #[error("response is not a record collection")]
    NotACollection,
    #[error("record {index}: {source}")]
    AtIndex {
        index: usize,
        #[source]
        source: Box<RecordError>,
    },
}

/// Stable row identifier. Backends use Mongo-style string ids for most
/// types and integer ids for a few.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Number(i64),
    Text(String),
}

impl RecordId {
    /// Extract an identifier from a JSON value. Empty strings and
    /// non-integral numbers are not identifiers.
    #[must_use]
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) if !s.trim().is_empty() => Some(Self::Text(s.clone())),
            Value::Number(n) => n.as_i64().map(Self::Number),
            _ => None,
        }
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for RecordId {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for RecordId {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

/// One entity row as served by the backend.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Fields", into = "Fields")]
pub struct Record {
    id: RecordId,
    fields: Fields,
}

impl Record {
    /// Build a record from an object map.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::MissingId`] when neither `_id` nor `id` holds
    /// a usable identifier.
    pub fn from_fields(fields: Fields) -> Result<Self, RecordError> {
        let id = ID_FIELDS
            .iter()
            .find_map(|key| fields.get(*key).and_then(RecordId::from_value))
            .ok_or(RecordError::MissingId)?;
        Ok(Self { id, fields })
    }

    /// Build a record from an arbitrary JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::NotAnObject`] for non-object values, or
    /// [`RecordError::MissingId`] when no identifier is present.
    pub fn from_value(value: Value) -> Result<Self, RecordError> {
        match value {
            Value::Object(fields) => Self::from_fields(fields),
            _ => Err(RecordError::NotAnObject),
        }
    }

    #[must_use]
    pub fn id(&self) -> &RecordId {
        &self.id
    }

    #[must_use]
    pub fn fields(&self) -> &Fields {
        &self.fields
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Display text for a field: strings verbatim, numbers and booleans
    /// formatted, `null`/missing/compound values as `None`.
    #[must_use]
    pub fn text(&self, key: &str) -> Option<String> {
        match self.fields.get(key)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    #[must_use]
    pub fn into_value(self) -> Value {
        Value::Object(self.fields)
    }
}

impl TryFrom<Fields> for Record {
    type Error = RecordError;

    fn try_from(fields: Fields) -> Result<Self, Self::Error> {
        Self::from_fields(fields)
    }
}

impl From<Record> for Fields {
    fn from(record: Record) -> Self {
        record.fields
    }
}

/// Parse a list response into records.
///
/// Accepts a bare array or an object wrapping the array under `data`,
/// `items` or `results`.
///
/// # Errors
///
/// Returns [`RecordError::NotACollection`] when no array is found, or
/// [`RecordError::AtIndex`] naming the first invalid row.
pub fn records_from_value(value: Value) -> Result<Vec<Record>, RecordError> {
    let items = match value {
        Value::Array(items) => items,
        Value::Object(mut map) => COLLECTION_KEYS
            .iter()
            .find_map(|key| match map.remove(*key) {
                Some(Value::Array(items)) => Some(items),
                _ => None,
            })
            .ok_or(RecordError::NotACollection)?,
        _ => return Err(RecordError::NotACollection),
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            Record::from_value(item).map_err(|source| RecordError::AtIndex { index, source: Box::new(source) })
        })
        .collect()
}
