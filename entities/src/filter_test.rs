use super::*;
use serde_json::json;

fn rows() -> Vec<Record> {
    vec![
        Record::from_value(json!({ "_id": "1", "name": "Alpha", "type": "hotel", "country": "Portugal" })).unwrap(),
        Record::from_value(json!({ "_id": "2", "name": "Beta", "email": "beta@trips.test" })).unwrap(),
        Record::from_value(json!({ "_id": "3", "ownerName": "Carla Alpine", "vehicleType": "SUV", "mobile": 5550101 }))
            .unwrap(),
    ]
}

fn ids(view: &[Record]) -> Vec<String> {
    view.iter().map(|r| r.id().to_string()).collect()
}

#[test]
fn prefix_query_keeps_only_matching_row() {
    let two = rows().into_iter().take(2).collect::<Vec<_>>();
    let view = filter_rows(&two, "alp");
    assert_eq!(ids(&view), vec!["1"]);
    assert_eq!(view[0].text("name").as_deref(), Some("Alpha"));
}

#[test]
fn match_is_case_insensitive_and_trimmed() {
    assert_eq!(ids(&filter_rows(&rows(), "  BETA@TRIPS ")), vec!["2"]);
    assert_eq!(ids(&filter_rows(&rows(), "suv")), vec!["3"]);
}

#[test]
fn query_searches_owner_and_numeric_fields() {
    assert_eq!(ids(&filter_rows(&rows(), "alp")), vec!["1", "3"]);
    assert_eq!(ids(&filter_rows(&rows(), "555")), vec!["3"]);
}

#[test]
fn fields_outside_the_search_set_do_not_match() {
    let rows = vec![Record::from_value(json!({ "_id": "x", "description": "lakeside" })).unwrap()];
    assert!(filter_rows(&rows, "lake").is_empty());
}

#[test]
fn regex_metacharacters_match_literally() {
    let rows = vec![
        Record::from_value(json!({ "_id": "1", "name": "Inn (Old Town)" })).unwrap(),
        Record::from_value(json!({ "_id": "2", "name": "Inn Old Town" })).unwrap(),
    ];
    assert_eq!(ids(&filter_rows(&rows, "(old")), vec!["1"]);
    assert!(filter_rows(&rows, ".*").is_empty());
}

#[test]
fn empty_query_is_identity() {
    let all = rows();
    assert_eq!(filter_rows(&all, ""), all);
    assert_eq!(filter_rows(&all, "   "), all);
    for q in ["alp", "beta", "zzz", ""] {
        assert_eq!(filter_rows(&filter_rows(&all, q), ""), filter_rows(&all, q));
    }
}

#[test]
fn filtering_is_idempotent() {
    let all = rows();
    for q in ["a", "alp", "SUV", "nothing", " "] {
        let once = filter_rows(&all, q);
        assert_eq!(filter_rows(&once, q), once);
    }
}

#[test]
fn filtering_does_not_mutate_input() {
    let all = rows();
    let before = all.clone();
    let _ = filter_rows(&all, "beta");
    assert_eq!(all, before);
}

#[test]
fn matches_query_agrees_with_filter_rows() {
    let all = rows();
    let view = filter_rows(&all, "alp");
    let by_predicate = all.iter().filter(|r| matches_query(r, "alp")).cloned().collect::<Vec<_>>();
    assert_eq!(view, by_predicate);
}
