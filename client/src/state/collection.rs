//! Load bookkeeping for a list page's entity collection.
//!
//! SYSTEM CONTEXT
//! ==============
//! The list page owns the rows in their own signal; the table mutates them
//! through `TableState::finish`. This state tracks which route key the rows
//! belong to and re-fetches whenever the shared `RefreshBus` sequence for
//! that key moves past the one it loaded.

#[cfg(test)]
#[path = "collection_test.rs"]
mod collection_test;

use entities::{ApiError, Record, RefreshBus};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct CollectionState {
    pub route_key: String,
    pub loading: bool,
    pub error: Option<ApiError>,
    /// `RefreshBus` sequence the current rows were loaded at.
    pub loaded_seq: Option<u64>,
}

impl CollectionState {
    pub fn for_key(route_key: &str) -> Self {
        Self { route_key: route_key.to_owned(), ..Self::default() }
    }

    /// Whether a fetch should start: never loaded, switched entity type, or
    /// marked stale on the bus. A fetch already in flight wins.
    pub fn needs_load(&self, route_key: &str, bus: &RefreshBus) -> bool {
        if self.route_key != route_key {
            return true;
        }
        if self.loading {
            return false;
        }
        self.loaded_seq.is_none_or(|seen| bus.is_stale(route_key, seen))
    }

    /// Start a fetch for `route_key`. Returns true when the key changed and
    /// the caller must drop rows of the previous type.
    pub fn begin(&mut self, route_key: &str) -> bool {
        let switched = self.route_key != route_key;
        if switched {
            *self = Self::for_key(route_key);
        }
        self.loading = true;
        self.error = None;
        switched
    }

    /// Apply a settled fetch. Returns the rows to install, or `None` when the
    /// fetch failed or belongs to a route key the page has since left.
    pub fn settle(
        &mut self,
        route_key: &str,
        seq: u64,
        result: Result<Vec<Record>, ApiError>,
    ) -> Option<Vec<Record>> {
        if self.route_key != route_key {
            return None;
        }
        self.loading = false;
        self.loaded_seq = Some(seq);
        match result {
            Ok(rows) => {
                self.error = None;
                Some(rows)
            }
            Err(err) => {
                self.error = Some(err);
                None
            }
        }
    }
}
