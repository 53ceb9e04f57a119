//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. It
//! holds one in-memory collection per route key. Records flagged
//! `"locked": true` refuse deletion so clients can exercise partial bulk
//! failures against a real server.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use entities::{Record, records_from_value};
use serde_json::Value;
use tokio::sync::RwLock;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("record not found")]
    NotFound,
    #[error("record is locked")]
    Locked,
    #[error("read seed file: {0}")]
    SeedIo(#[from] std::io::Error),
    #[error("parse seed file: {0}")]
    SeedJson(#[from] serde_json::Error),
    #[error("seed collection `{key}`: {source}")]
    SeedRecords {
        key: String,
        #[source]
        source: entities::RecordError,
    },
}

// =============================================================================
// ENTITY STORE
// =============================================================================

#[derive(Debug, Default)]
pub struct EntityStore {
    collections: BTreeMap<String, Vec<Record>>,
}

impl EntityStore {
    /// Build from `{ route_key: [records] }`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::SeedRecords`] when a collection holds rows
    /// without ids.
    pub fn from_seed(seed: Value) -> Result<Self, StoreError> {
        let mut collections = BTreeMap::new();
        if let Value::Object(map) = seed {
            for (key, rows) in map {
                let records =
                    records_from_value(rows).map_err(|source| StoreError::SeedRecords { key: key.clone(), source })?;
                collections.insert(key, records);
            }
        }
        Ok(Self { collections })
    }

    /// Load a seed JSON file.
    ///
    /// # Errors
    ///
    /// Returns an I/O, JSON or record error.
    pub fn from_seed_file(path: &Path) -> Result<Self, StoreError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_seed(serde_json::from_str(&raw)?)
    }

    #[must_use]
    pub fn list(&self, key: &str) -> Vec<Value> {
        self.collections
            .get(key)
            .map(|rows| rows.iter().cloned().map(Record::into_value).collect())
            .unwrap_or_default()
    }

    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] for unknown ids.
    pub fn find(&self, key: &str, id: &str) -> Result<Value, StoreError> {
        self.collections
            .get(key)
            .and_then(|rows| rows.iter().find(|r| r.id().to_string() == id))
            .cloned()
            .map(Record::into_value)
            .ok_or(StoreError::NotFound)
    }

    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] for unknown ids and
    /// [`StoreError::Locked`] for locked records.
    pub fn remove(&mut self, key: &str, id: &str) -> Result<Value, StoreError> {
        let rows = self.collections.get_mut(key).ok_or(StoreError::NotFound)?;
        let index = rows.iter().position(|r| r.id().to_string() == id).ok_or(StoreError::NotFound)?;
        if rows[index].get("locked").and_then(Value::as_bool).unwrap_or(false) {
            return Err(StoreError::Locked);
        }
        Ok(rows.remove(index).into_value())
    }

    #[must_use]
    pub fn len(&self, key: &str) -> usize {
        self.collections.get(key).map_or(0, Vec::len)
    }
}

// =============================================================================
// APP STATE
// =============================================================================

/// Shared application state, injected into Axum handlers via State extractor.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RwLock<EntityStore>>,
    pub api_token: Option<String>,
}

impl AppState {
    #[must_use]
    pub fn new(store: EntityStore, api_token: Option<String>) -> Self {
        Self { store: Arc::new(RwLock::new(store)), api_token }
    }
}
