//! Entity record routes.
//!
//! DESIGN
//! ======
//! One list, detail and delete handler serve every entity type. The route
//! key travels with each generated `MethodRouter` so the handlers never parse
//! it back out of the URL.
//!
//! ERROR HANDLING
//! ==============
//! Failures render as `{"message": ...}` bodies, the shape clients read
//! their user-facing text from.

use std::collections::{BTreeMap, BTreeSet};

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{MethodRouter, delete, get};
use entities::{EndpointRegistry, ViewRoute};
use serde_json::{Value, json};

use crate::state::{AppState, StoreError};

/// Error response carrying a status and a user-facing message.
#[derive(Debug)]
pub struct ApiFailure {
    status: StatusCode,
    message: String,
}

impl ApiFailure {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self { status, message: message.into() }
    }
}

impl From<StoreError> for ApiFailure {
    fn from(err: StoreError) -> Self {
        let status = match err {
            StoreError::NotFound => StatusCode::NOT_FOUND,
            StoreError::Locked => StatusCode::CONFLICT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self::new(status, err.to_string())
    }
}

impl IntoResponse for ApiFailure {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "message": self.message }))).into_response()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
enum Action {
    List,
    Detail,
    Delete,
}

/// Every `(path, action, route key)` the registry exposes. A path/action
/// pair claimed by two keys is served by the first.
fn endpoints(registry: &EndpointRegistry) -> Vec<(String, Action, String)> {
    let mut seen = BTreeSet::new();
    let mut out = Vec::new();
    for routes in registry.iter() {
        let mut candidates = vec![(routes.list.clone(), Action::List), (routes.delete.clone(), Action::Delete)];
        if let ViewRoute::Profile { fetch, .. } | ViewRoute::Detail { fetch, .. } = &routes.view {
            candidates.push((fetch.clone(), Action::Detail));
        }
        for (path, action) in candidates {
            if seen.insert((path.clone(), action)) {
                out.push((path, action, routes.key.clone()));
            }
        }
    }
    out
}

/// Method routers grouped by path, ready to mount with `Router::route`.
pub fn method_routers(registry: &EndpointRegistry) -> Vec<(String, MethodRouter<AppState>)> {
    let mut grouped: BTreeMap<String, MethodRouter<AppState>> = BTreeMap::new();
    for (path, action, key) in endpoints(registry) {
        let router = match action {
            Action::List => get(move |State(state): State<AppState>| list(state, key)),
            Action::Detail => {
                get(move |State(state): State<AppState>, Path(id): Path<String>| detail(state, key, id))
            }
            Action::Delete => {
                delete(move |State(state): State<AppState>, Path(id): Path<String>| remove(state, key, id))
            }
        };
        let merged = match grouped.remove(&path) {
            Some(existing) => existing.merge(router),
            None => router,
        };
        grouped.insert(path, merged);
    }
    grouped.into_iter().collect()
}

async fn list(state: AppState, key: String) -> Json<Value> {
    let store = state.store.read().await;
    Json(Value::Array(store.list(&key)))
}

async fn detail(state: AppState, key: String, id: String) -> Result<Json<Value>, ApiFailure> {
    let store = state.store.read().await;
    Ok(Json(json!({ "data": store.find(&key, &id)? })))
}

async fn remove(state: AppState, key: String, id: String) -> Result<Json<Value>, ApiFailure> {
    let mut store = state.store.write().await;
    match store.remove(&key, &id) {
        Ok(removed) => {
            tracing::info!(%key, %id, remaining = store.len(&key), "record deleted");
            Ok(Json(json!({ "message": "deleted", "data": removed })))
        }
        Err(err) => {
            tracing::warn!(%key, %id, error = %err, "delete refused");
            Err(err.into())
        }
    }
}
