//! Cross-page "needs refresh" signalling.
//!
//! DESIGN
//! ======
//! Pages that mutate an entity type bump that type's sequence; listing pages
//! remember the last sequence they loaded and re-fetch when it moves. This
//! replaces ad hoc browser-storage flags with an explicit shared store that
//! the client provides as a reactive context.

#[cfg(test)]
#[path = "refresh_test.rs"]
mod refresh_test;

use std::collections::BTreeMap;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RefreshBus {
    seqs: BTreeMap<String, u64>,
}

impl RefreshBus {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `route_key` stale. Returns the new sequence.
    pub fn bump(&mut self, route_key: &str) -> u64 {
        let seq = self.seqs.entry(route_key.to_owned()).or_insert(0);
        *seq = seq.wrapping_add(1);
        *seq
    }

    #[must_use]
    pub fn seq(&self, route_key: &str) -> u64 {
        self.seqs.get(route_key).copied().unwrap_or(0)
    }

    /// Whether `route_key` was bumped after the listing saw `seen`.
    #[must_use]
    pub fn is_stale(&self, route_key: &str, seen: u64) -> bool {
        self.seq(route_key) != seen
    }
}
