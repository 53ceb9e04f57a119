use super::*;
use crate::record::RecordId;
use crate::test_support::MockTransport;
use serde_json::json;

#[test]
fn client_config_normalizes_base_url_and_defaults_timeout() {
    let config = ClientConfig::new(" https://admin.trips.test/ ");
    assert_eq!(config.base_url, "https://admin.trips.test");
    assert_eq!(config.timeout, Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS));
    assert_eq!(config.url("/api/hotels"), "https://admin.trips.test/api/hotels");
    assert_eq!(config.url("api/hotels"), "https://admin.trips.test/api/hotels");
}

#[test]
fn client_config_with_empty_base_keeps_relative_paths() {
    let config = ClientConfig::new("").with_timeout(Duration::from_secs(3));
    assert_eq!(config.url("/api/tours"), "/api/tours");
    assert_eq!(config.timeout, Duration::from_secs(3));
}

#[test]
fn bearer_header_value_skips_missing_or_blank_tokens() {
    assert_eq!(bearer_header_value(Some("abc")).as_deref(), Some("Bearer abc"));
    assert_eq!(bearer_header_value(Some("  ")), None);
    assert_eq!(bearer_header_value(None), None);
}

#[tokio::test]
async fn fetch_collection_uses_registered_list_endpoint() {
    let transport = MockTransport::new().respond("/api/users/all", Ok(json!({ "data": [{ "_id": "u1" }] })));
    let rows = fetch_collection(&transport, &EndpointRegistry::marketplace(), "users").await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id(), &RecordId::from("u1"));
    assert_eq!(transport.started(), vec!["GET /api/users/all".to_owned()]);
}

#[tokio::test]
async fn fetch_collection_reports_rows_without_ids_as_decode_errors() {
    let transport = MockTransport::new().respond("/api/trains", Ok(json!([{ "name": "Night train" }])));
    let err = fetch_collection(&transport, &EndpointRegistry::marketplace(), "trains").await.unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)));
}

#[tokio::test]
async fn fetch_detail_unwraps_data_envelope() {
    let transport = MockTransport::new()
        .respond("/api/hotels/find/h1", Ok(json!({ "success": true, "data": { "_id": "h1", "name": "Seaside" } })));
    let record = fetch_detail(&transport, "/api/hotels/find/h1").await.unwrap();
    assert_eq!(record.text("name").as_deref(), Some("Seaside"));
}

#[tokio::test]
async fn fetch_detail_propagates_server_errors() {
    let transport =
        MockTransport::new().respond("/api/tours/t9", Err(ApiError::from_response(404, r#"{"message":"not found"}"#)));
    let err = fetch_detail(&transport, "/api/tours/t9").await.unwrap_err();
    assert_eq!(err.user_message(), "not found");
}
