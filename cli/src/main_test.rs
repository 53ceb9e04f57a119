use super::*;
use entities::EntityTransport;
use serde_json::json;

fn rows() -> Vec<Record> {
    vec![
        Record::from_value(json!({ "_id": "h1", "name": "Seaside", "type": "resort", "price": 99 })).unwrap(),
        Record::from_value(json!({ "id": 42, "name": "Old Mill" })).unwrap(),
    ]
}

#[test]
fn parse_confirmation_accepts_only_yes() {
    assert!(parse_confirmation("y\n"));
    assert!(parse_confirmation(" YES "));
    assert!(!parse_confirmation("\n"));
    assert!(!parse_confirmation("no"));
    assert!(!parse_confirmation("yep"));
}

#[test]
fn find_id_matches_text_and_numeric_ids() {
    let rows = rows();
    assert_eq!(find_id(&rows, "h1").unwrap(), RecordId::from("h1"));
    assert_eq!(find_id(&rows, "42").unwrap(), RecordId::Number(42));
    assert!(matches!(
        find_id(&rows, "nope"),
        Err(CliError::Table(TableError::UnknownRecord(RecordId::Text(id)))) if id == "nope"
    ));
}

#[test]
fn routes_report_lists_every_registered_type() {
    let lines = routes_report(&EndpointRegistry::marketplace());
    assert_eq!(lines.len(), 5);
    let hotels = lines.iter().find(|l| l.starts_with("hotels")).unwrap();
    assert!(hotels.contains("delete=DELETE /api/hotels/{id}"));
    assert!(hotels.contains("view=GET /api/hotels/find/{id}"));
    let restaurant = lines.iter().find(|l| l.starts_with("restaurant")).unwrap();
    assert!(restaurant.contains("view=edit form /restaurant/{id}/edit"));
}

#[test]
fn render_rows_prints_id_then_default_columns() {
    let lines = render_rows("hotels", &rows());
    assert_eq!(lines[0], "ID\tName\tType\tCountry\tOwner\tPrice / night");
    assert_eq!(lines[1], "h1\tSeaside\tresort\t\t\t$99.00");
    assert_eq!(lines[2], "42\tOld Mill\t\t\t\t");
}

#[test]
fn unregistered_key_requires_allow_fallback() {
    let config = ClientConfig::new("http://127.0.0.1:9");
    let mut ctx = CliContext {
        registry: EndpointRegistry::marketplace(),
        transport: ReqwestTransport::new(config, Some("t0k3n")).unwrap(),
        allow_fallback: false,
    };
    assert!(matches!(ctx.routes("widgets"), Err(CliError::Unregistered(_))));
    ctx.allow_fallback = true;
    assert_eq!(ctx.routes("widgets").unwrap().delete, "/api/widgets/{id}");
}

#[test]
fn decode_body_treats_empty_as_null() {
    assert_eq!(http::decode_body("").unwrap(), Value::Null);
    assert_eq!(http::decode_body(r#"{"ok":true}"#).unwrap(), json!({ "ok": true }));
    assert!(matches!(http::decode_body("<html>"), Err(ApiError::Decode(_))));
}

#[test]
fn cli_parses_bulk_delete_matching() {
    let cli = Cli::try_parse_from(["tripdesk-cli", "bulk-delete", "hotels", "--matching", "sea", "--yes"]).unwrap();
    match cli.command {
        Command::BulkDelete(args) => {
            assert_eq!(args.route_key, "hotels");
            assert!(args.ids.is_empty());
            assert_eq!(args.matching.as_deref(), Some("sea"));
            assert!(args.yes);
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn escaped_ids_stay_under_their_entity_endpoint() {
    let registry = EndpointRegistry::marketplace();
    let base = reqwest::Url::parse("http://127.0.0.1:3000").unwrap();
    let path = registry.resolve("users").delete_path(&RecordId::from(r"..\..\hotels\h-200")).unwrap();
    let url = base.join(&path).unwrap();
    assert!(url.path().starts_with("/api/users/delete/"), "{}", url.path());
    assert_eq!(url.path_segments().unwrap().count(), 4);

    let dots = registry.resolve("hotels").delete_path(&RecordId::from(".."));
    assert!(matches!(dots, Err(RegistryError::UnsafeId(_))));
}

#[test]
fn view_rejects_dot_segment_ids() {
    let routes = EndpointRegistry::marketplace().resolve("hotels").into_owned();
    let err = routes.view_fetch_path(&parse_record_id(".")).map_err(CliError::from).unwrap_err();
    assert!(matches!(err, CliError::Registry(RegistryError::UnsafeId(_))));
    assert!(!err.to_string().contains("--allow-fallback"));
}

#[test]
fn api_errors_describe_connectivity_causes() {
    let timeout = CliError::from(ApiError::Timeout(std::time::Duration::from_secs(10)));
    assert_eq!(
        timeout.to_string(),
        format!("{} (request timed out after 10s)", entities::error::CONNECTIVITY_MESSAGE)
    );
    let server = CliError::from(ApiError::from_response(409, r#"{"message":"record is locked"}"#));
    assert_eq!(server.to_string(), "record is locked");
}

#[tokio::test]
async fn silent_server_times_out_with_connectivity_message() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let holder = tokio::spawn(async move {
        let mut open = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            open.push(socket);
        }
    });

    let config = ClientConfig::new(&format!("http://{addr}")).with_timeout(std::time::Duration::from_millis(100));
    let transport = ReqwestTransport::new(config, None).unwrap();
    let err = transport.get("/api/hotels").await.unwrap_err();

    assert_eq!(err, ApiError::Timeout(std::time::Duration::from_millis(100)));
    assert!(err.is_connectivity());
    assert_eq!(err.user_message(), entities::error::CONNECTIVITY_MESSAGE);
    holder.abort();
}
