//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! Entity endpoints are generated from the same `EndpointRegistry` the
//! client and CLI resolve against, so the stub can never drift from the
//! table's view of the backend. `/healthz` stays open; everything else
//! passes the bearer check when a token is configured. Non-API paths fall
//! back to the built client bundle when one is configured.

pub mod records;

#[cfg(test)]
#[path = "mod_test.rs"]
mod mod_test;

use std::path::Path;

use axum::Router;
use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::http::header::AUTHORIZATION;
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use entities::EndpointRegistry;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::state::AppState;
use records::ApiFailure;

/// Full router: generated entity routes, health check, optional static client.
pub fn app(state: AppState, registry: &EndpointRegistry, static_dir: Option<&Path>) -> Router {
    let router = api_routes(state, registry);
    match static_dir {
        Some(dir) => router.fallback_service(ServeDir::new(dir).fallback(ServeFile::new(dir.join("index.html")))),
        None => router,
    }
}

fn api_routes(state: AppState, registry: &EndpointRegistry) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let mut router = Router::new();
    for (path, method_router) in records::method_routers(registry) {
        router = router.route(&path, method_router);
    }

    router
        .route_layer(middleware::from_fn_with_state(state.clone(), require_bearer))
        .route("/healthz", get(healthz))
        .layer(cors)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn require_bearer(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let Some(expected) = state.api_token.as_deref() else {
        return next.run(request).await;
    };
    let provided = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "));
    if provided == Some(expected) {
        next.run(request).await
    } else {
        tracing::warn!(path = %request.uri().path(), "rejected request without valid bearer token");
        ApiFailure::new(StatusCode::UNAUTHORIZED, "unauthorized").into_response()
    }
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
