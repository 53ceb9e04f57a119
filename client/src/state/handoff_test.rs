use super::*;
use serde_json::json;

#[test]
fn take_for_matching_page_returns_record_once() {
    let mut handoff = RecordHandoff::default();
    let record = Record::from_value(json!({ "_id": "r-500", "name": "Tasca" })).unwrap();
    handoff.stash("/restaurant/r-500/edit", record.clone());
    assert_eq!(handoff.take_for("/restaurant/r-500/edit"), Some(record));
    assert_eq!(handoff.take_for("/restaurant/r-500/edit"), None);
}

#[test]
fn take_for_other_page_clears_stash() {
    let mut handoff = RecordHandoff::default();
    handoff.stash("/hotels/h1", Record::from_value(json!({ "_id": "h1" })).unwrap());
    assert_eq!(handoff.take_for("/hotels/h2"), None);
    assert_eq!(handoff, RecordHandoff::default());
}
