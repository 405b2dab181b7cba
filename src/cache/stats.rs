//! Cache counters.

use serde::Serialize;

/// Point-in-time cache statistics.
///
/// Mutated only by the store while it holds the cache lock; `snapshot`
/// fills in the derived entry/byte counts.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CacheStats {
    /// Lookups that returned a body.
    pub hits: u64,
    /// Lookups that found nothing.
    pub misses: u64,
    /// Entries removed to make room for an insertion.
    pub evictions: u64,
    /// Successful insertions (oversized no-ops excluded).
    pub insertions: u64,
    /// Entries currently stored.
    pub entries: usize,
    /// Bytes currently stored.
    pub bytes: usize,
}

impl CacheStats {
    /// Hit rate over all lookups, or 0.0 before any lookup.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    pub(crate) fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub(crate) fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub(crate) fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    pub(crate) fn record_insertion(&mut self) {
        self.insertions += 1;
    }
}
