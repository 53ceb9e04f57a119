//! Record hand-off between the table and the page it navigates to.
//!
//! The detail flow fetches before navigating and the edit flow passes the
//! row it was opened from. The receiving page takes the record if it was
//! stashed for its own path and loads it itself otherwise.

#[cfg(test)]
#[path = "handoff_test.rs"]
mod handoff_test;

use entities::Record;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct RecordHandoff {
    entry: Option<(String, Record)>,
}

impl RecordHandoff {
    pub fn stash(&mut self, page: impl Into<String>, record: Record) {
        self.entry = Some((page.into(), record));
    }

    /// Take the stashed record when it was meant for `page`. Any stash is
    /// cleared either way.
    pub fn take_for(&mut self, page: &str) -> Option<Record> {
        match self.entry.take() {
            Some((target, record)) if target == page => Some(record),
            _ => None,
        }
    }
}
