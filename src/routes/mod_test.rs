use super::*;
use crate::seed::default_seed;
use crate::state::EntityStore;
use entities::{ApiError, EntityTransport, NoticeKind, RecordId, TableState, fetch_collection, fetch_detail};
use serde_json::Value;

async fn spawn(api_token: Option<&str>) -> (String, AppState) {
    let store = EntityStore::from_seed(default_seed()).unwrap();
    let state = AppState::new(store, api_token.map(str::to_owned));
    let router = app(state.clone(), &EndpointRegistry::marketplace(), None);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    (format!("http://{addr}"), state)
}

struct TestTransport {
    base: String,
    client: reqwest::Client,
}

impl TestTransport {
    fn new(base: &str) -> Self {
        Self { base: base.to_owned(), client: reqwest::Client::new() }
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<Value, ApiError> {
        let response = request.send().await.map_err(|e| ApiError::Network(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| ApiError::Network(e.to_string()))?;
        if (200..300).contains(&status) {
            serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))
        } else {
            Err(ApiError::from_response(status, &body))
        }
    }
}

#[async_trait::async_trait(?Send)]
impl EntityTransport for TestTransport {
    async fn get(&self, path: &str) -> Result<Value, ApiError> {
        self.send(self.client.get(format!("{}{path}", self.base))).await
    }

    async fn delete(&self, path: &str) -> Result<Value, ApiError> {
        self.send(self.client.delete(format!("{}{path}", self.base))).await
    }
}

#[tokio::test]
async fn healthz_is_open_even_with_token() {
    let (base, _) = spawn(Some("secret")).await;
    let resp = reqwest::get(format!("{base}/healthz")).await.unwrap();
    assert_eq!(resp.status(), reqwest::StatusCode::OK);
}

#[tokio::test]
async fn list_routes_follow_registry() {
    let (base, _) = spawn(None).await;
    let users: Value = reqwest::get(format!("{base}/api/users/all")).await.unwrap().json().await.unwrap();
    assert_eq!(users.as_array().unwrap().len(), 3);
    let hotels: Value = reqwest::get(format!("{base}/api/hotels")).await.unwrap().json().await.unwrap();
    assert_eq!(hotels[0]["_id"], "h-200");
}

#[tokio::test]
async fn detail_wraps_record_and_unknown_is_404() {
    let (base, _) = spawn(None).await;
    let transport = TestTransport::new(&base);
    let hotel = fetch_detail(&transport, "/api/hotels/find/h-201").await.unwrap();
    assert_eq!(hotel.text("name").as_deref(), Some("Alpine Lodge"));

    let err = fetch_detail(&transport, "/api/hotels/find/missing").await.unwrap_err();
    match err {
        ApiError::Server { status, message, .. } => {
            assert_eq!(status, 404);
            assert_eq!(message, "record not found");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn delete_removes_record_and_locked_is_conflict() {
    let (base, state) = spawn(None).await;
    let client = reqwest::Client::new();

    let resp = client.delete(format!("{base}/api/tours/t-300")).send().await.unwrap();
    assert_eq!(resp.status(), reqwest::StatusCode::OK);
    assert_eq!(state.store.read().await.len("tours"), 1);

    let resp = client.delete(format!("{base}/api/hotels/h-202")).send().await.unwrap();
    assert_eq!(resp.status(), reqwest::StatusCode::CONFLICT);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "record is locked");
    assert_eq!(state.store.read().await.len("hotels"), 3);
}

#[tokio::test]
async fn token_is_required_when_configured() {
    let (base, _) = spawn(Some("secret")).await;
    let client = reqwest::Client::new();

    let resp = client.get(format!("{base}/api/tours")).send().await.unwrap();
    assert_eq!(resp.status(), reqwest::StatusCode::UNAUTHORIZED);

    let resp = client.get(format!("{base}/api/tours")).bearer_auth("wrong").send().await.unwrap();
    assert_eq!(resp.status(), reqwest::StatusCode::UNAUTHORIZED);

    let resp = client.get(format!("{base}/api/tours")).bearer_auth("secret").send().await.unwrap();
    assert_eq!(resp.status(), reqwest::StatusCode::OK);
}

#[tokio::test]
async fn unregistered_paths_are_not_served() {
    let (base, _) = spawn(None).await;
    let resp = reqwest::get(format!("{base}/api/widgets")).await.unwrap();
    assert_eq!(resp.status(), reqwest::StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn bulk_delete_against_server_reports_partial_failure() {
    let (base, state) = spawn(None).await;
    let transport = TestTransport::new(&base);
    let registry = EndpointRegistry::marketplace();
    let routes = registry.resolve("hotels");

    let mut rows = fetch_collection(&transport, &registry, "hotels").await.unwrap();
    let mut table = TableState::new();
    table.toggle(&RecordId::from("h-200"));
    table.toggle(&RecordId::from("h-202"));
    table.request_bulk_delete().unwrap();

    let outcome = table.run_confirmed(&mut rows, &routes, &transport, None).await.unwrap();
    assert!(outcome.is_partial());
    assert_eq!(outcome.succeeded, vec![RecordId::from("h-200")]);
    assert_eq!(outcome.failed.len(), 1);

    // Local rows stay intact until the host refreshes.
    assert_eq!(rows.len(), 3);
    assert_eq!(table.selection().len(), 2);
    assert_eq!(table.notice().unwrap().kind, NoticeKind::Partial);

    // The server applied the delete that succeeded.
    assert_eq!(state.store.read().await.len("hotels"), 2);
    let refreshed = fetch_collection(&transport, &registry, "hotels").await.unwrap();
    assert!(refreshed.iter().all(|r| r.id() != &RecordId::from("h-200")));
}
