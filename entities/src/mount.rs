//! Liveness flag for work that outlives the view that started it.
//!
//! Deletes cannot be cancelled once issued. Hosts create a guard on mount,
//! call [`MountGuard::unmount`] on cleanup, and skip every post-await state
//! update when [`MountGuard::is_mounted`] is false.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Clone, Debug)]
pub struct MountGuard {
    alive: Arc<AtomicBool>,
}

impl Default for MountGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl MountGuard {
    #[must_use]
    pub fn new() -> Self {
        Self { alive: Arc::new(AtomicBool::new(true)) }
    }

    pub fn unmount(&self) {
        self.alive.store(false, Ordering::Relaxed);
    }

    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.alive.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_liveness() {
        let guard = MountGuard::new();
        let task_copy = guard.clone();
        assert!(task_copy.is_mounted());
        guard.unmount();
        assert!(!task_copy.is_mounted());
    }
}
