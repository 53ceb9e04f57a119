use super::*;
use serde_json::json;

#[test]
fn from_value_prefers_mongo_style_id() {
    let record = Record::from_value(json!({ "_id": "abc", "id": 7, "name": "Alpha" })).unwrap();
    assert_eq!(record.id(), &RecordId::from("abc"));
}

#[test]
fn from_value_falls_back_to_numeric_id() {
    let record = Record::from_value(json!({ "id": 42, "name": "Beta" })).unwrap();
    assert_eq!(record.id(), &RecordId::Number(42));
    assert_eq!(record.id().to_string(), "42");
}

#[test]
fn from_value_rejects_missing_or_blank_id() {
    assert_eq!(Record::from_value(json!({ "name": "x" })), Err(RecordError::MissingId));
    assert_eq!(Record::from_value(json!({ "_id": "  " })), Err(RecordError::MissingId));
    assert_eq!(Record::from_value(json!({ "id": 1.5 })), Err(RecordError::MissingId));
}

#[test]
fn from_value_rejects_non_objects() {
    assert_eq!(Record::from_value(json!("row")), Err(RecordError::NotAnObject));
}

#[test]
fn text_formats_scalars_and_skips_compound_values() {
    let record = Record::from_value(json!({
        "_id": "1",
        "name": "Alpha",
        "rooms": 12,
        "active": true,
        "owner": null,
        "tags": ["a"],
    }))
    .unwrap();
    assert_eq!(record.text("name").as_deref(), Some("Alpha"));
    assert_eq!(record.text("rooms").as_deref(), Some("12"));
    assert_eq!(record.text("active").as_deref(), Some("true"));
    assert_eq!(record.text("owner"), None);
    assert_eq!(record.text("tags"), None);
    assert_eq!(record.text("missing"), None);
}

#[test]
fn records_from_value_accepts_bare_and_wrapped_arrays() {
    let bare = records_from_value(json!([{ "_id": "1" }, { "_id": "2" }])).unwrap();
    assert_eq!(bare.len(), 2);

    let wrapped = records_from_value(json!({ "success": true, "data": [{ "id": 9 }] })).unwrap();
    assert_eq!(wrapped.len(), 1);
    assert_eq!(wrapped[0].id(), &RecordId::Number(9));
}

#[test]
fn records_from_value_reports_the_first_bad_row() {
    let err = records_from_value(json!([{ "_id": "1" }, { "name": "no id" }])).unwrap_err();
    assert_eq!(err, RecordError::AtIndex { index: 1, source: Box::new(RecordError::MissingId) });
    assert_eq!(err.to_string(), "record 1: record has no `_id` or `id` field");
}

#[test]
fn records_from_value_rejects_non_collections() {
    assert_eq!(records_from_value(json!({ "data": "nope" })), Err(RecordError::NotACollection));
    assert_eq!(records_from_value(json!(3)), Err(RecordError::NotACollection));
}

#[test]
fn record_serde_round_trips_through_plain_object() {
    let value = json!({ "_id": "h1", "name": "Seaside" });
    let record: Record = serde_json::from_value(value.clone()).unwrap();
    assert_eq!(serde_json::to_value(&record).unwrap(), value);
    assert!(serde_json::from_value::<Record>(json!({ "name": "x" })).is_err());
}
