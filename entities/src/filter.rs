//! Live search over the row collection.
//!
//! The query is trimmed and matched case-insensitively as a literal substring
//! against the concatenation of [`SEARCH_FIELDS`]. Filtering is a pure
//! derivation: the same `(rows, query)` always yields the same view and the
//! input rows are never touched.

#[cfg(test)]
#[path = "filter_test.rs"]
mod filter_test;

use crate::record::Record;

/// Fields that participate in search, across every entity type.
pub const SEARCH_FIELDS: [&str; 7] = ["name", "type", "email", "mobile", "country", "ownerName", "vehicleType"];

/// Lowercased search text for a record. Missing fields contribute nothing.
#[must_use]
pub fn search_haystack(record: &Record) -> String {
    SEARCH_FIELDS
        .iter()
        .filter_map(|field| record.text(field))
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Whether `record` matches `query`. A blank query matches everything.
#[must_use]
pub fn matches_query(record: &Record, query: &str) -> bool {
    let needle = query.trim().to_lowercase();
    needle.is_empty() || search_haystack(record).contains(&needle)
}

/// Filtered view of `rows` for `query`, preserving row order.
#[must_use]
pub fn filter_rows(rows: &[Record], query: &str) -> Vec<Record> {
    if query.trim().is_empty() {
        return rows.to_vec();
    }
    rows.iter().filter(|record| matches_query(record, query)).cloned().collect()
}
