use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Lifetime counters for one engine instance. Written with relaxed atomics;
/// these inform logs and tests, not control flow.
#[derive(Debug, Default)]
pub struct EngineStats {
    loads: AtomicU64,
    reports: AtomicU64,
    cache_hits: AtomicU64,
    status_edits: AtomicU64,
}

impl EngineStats {
    pub(crate) fn record_load(&self) {
        self.loads.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_report(&self) {
        self.reports.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_cache_hit(&self) {
        self.cache_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_status_edit(&self) {
        self.status_edits.fetch_add(1, Ordering::Relaxed);
    }

    #[must_use]
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            loads: self.loads.load(Ordering::Relaxed),
            reports: self.reports.load(Ordering::Relaxed),
            cache_hits: self.cache_hits.load(Ordering::Relaxed),
            status_edits: self.status_edits.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time copy of the counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatsSnapshot {
    pub loads: u64,
    pub reports: u64,
    pub cache_hits: u64,
    pub status_edits: u64,
}
