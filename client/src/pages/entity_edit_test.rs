use super::*;
use serde_json::json;

#[test]
fn editable_fields_skip_identifiers() {
    let record = Record::from_value(json!({ "_id": "r-500", "id": 7, "name": "Tasca do Rio", "open": true })).unwrap();
    let fields = editable_fields(&record);
    assert_eq!(fields.len(), 2);
    assert!(fields.contains(&("name".to_owned(), "Tasca do Rio".to_owned())));
    assert!(fields.contains(&("open".to_owned(), "true".to_owned())));
}
