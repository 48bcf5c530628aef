//! Lock-free session counters

use std::sync::atomic::{AtomicU64, Ordering};

/// Snapshot of store activity
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    /// Sessions currently held.
    pub active: usize,
    /// Sessions created since the store was opened.
    pub total_created: u64,
    /// Sessions removed because they timed out.
    pub expired: u64,
    /// Sessions removed by explicit invalidation.
    pub invalidated: u64,
}

#[derive(Debug, Default)]
pub(crate) struct Counters {
    created: AtomicU64,
    expired: AtomicU64,
    invalidated: AtomicU64,
}

impl Counters {
    pub(crate) fn record_created(&self) {
        self.created.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_expired(&self) {
        self.expired.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_invalidated(&self) {
        self.invalidated.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn snapshot(&self, active: usize) -> SessionStats {
        SessionStats {
            active,
            total_created: self.created.load(Ordering::Relaxed),
            expired: self.expired.load(Ordering::Relaxed),
            invalidated: self.invalidated.load(Ordering::Relaxed),
        }
    }
}
