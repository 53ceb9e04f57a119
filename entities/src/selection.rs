//! Checkbox selection over table rows.

#[cfg(test)]
#[path = "selection_test.rs"]
mod selection_test;

use std::collections::BTreeSet;

use crate::record::{Record, RecordId};

/// Identifiers of the rows the user has checked.
///
/// The set is not pruned when the search filter changes, so ids hidden by
/// a query stay selected. [`SelectionSet::select_all`] only ever takes ids
/// from the view it is given.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectionSet {
    ids: BTreeSet<RecordId>,
}

impl SelectionSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip membership for `id`. Returns whether it is now selected.
    pub fn toggle(&mut self, id: &RecordId) -> bool {
        if self.ids.remove(id) {
            false
        } else {
            self.ids.insert(id.clone());
            true
        }
    }

    /// Replace the selection with every id in `view`.
    pub fn select_all(&mut self, view: &[Record]) {
        self.ids = view.iter().map(|r| r.id().clone()).collect();
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Drop ids that no longer name a row in `rows`.
    pub fn retain_existing(&mut self, rows: &[Record]) {
        let live = rows.iter().map(Record::id).collect::<BTreeSet<_>>();
        self.ids.retain(|id| live.contains(id));
    }

    #[must_use]
    pub fn contains(&self, id: &RecordId) -> bool {
        self.ids.contains(id)
    }

    /// Header-checkbox state: true when `view` is non-empty and fully selected.
    #[must_use]
    pub fn covers(&self, view: &[Record]) -> bool {
        !view.is_empty() && view.iter().all(|r| self.ids.contains(r.id()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Selected ids in stable order.
    #[must_use]
    pub fn to_vec(&self) -> Vec<RecordId> {
        self.ids.iter().cloned().collect()
    }
}
