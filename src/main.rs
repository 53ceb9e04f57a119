mod config;
mod routes;
mod seed;
mod state;

use entities::EndpointRegistry;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let config = config::ServerConfig::from_env();
    let store = match &config.seed_file {
        Some(path) => state::EntityStore::from_seed_file(path).expect("seed file load failed"),
        None => state::EntityStore::from_seed(seed::default_seed()).expect("built-in seed is valid"),
    };
    let state = state::AppState::new(store, config.api_token.clone());
    let registry = EndpointRegistry::marketplace();

    let app = routes::app(state, &registry, config.static_dir.as_deref());
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port))
        .await
        .expect("failed to bind");

    tracing::info!(port = config.port, auth = config.api_token.is_some(), "tripdesk listening");
    axum::serve(listener, app).await.expect("server failed");
}
