//! Recency ordering for eviction.
//!
//! Each key carries the tick of its last use; an ordered map from tick to
//! key gives the eviction order, smallest tick first. Promotion and
//! removal are map operations, not scans, which matters because every
//! cache hit touches this under the store's lock. The tracker never
//! touches entry storage; the store keeps the two consistent.

use std::collections::{BTreeMap, HashMap};

/// Tracks the most-recently-used to least-recently-used key order.
#[derive(Debug, Default)]
pub struct LruTracker {
    /// Key to the tick of its last use.
    ticks: HashMap<String, u64>,
    /// Tick to key; the first entry is the next eviction victim.
    order: BTreeMap<u64, String>,
    next_tick: u64,
}

impl LruTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a key as just used, moving (or inserting) it at the MRU end.
    pub fn touch(&mut self, key: &str) {
        if let Some(&old) = self.ticks.get(key) {
            self.order.remove(&old);
        }
        let tick = self.next_tick;
        self.next_tick += 1;
        self.ticks.insert(key.to_string(), tick);
        self.order.insert(tick, key.to_string());
    }

    /// Drop a key from the order, if present.
    pub fn remove(&mut self, key: &str) {
        if let Some(tick) = self.ticks.remove(key) {
            self.order.remove(&tick);
        }
    }

    /// Remove and return the LRU-end key.
    pub fn pop_lru(&mut self) -> Option<String> {
        let (_, key) = self.order.pop_first()?;
        self.ticks.remove(&key);
        Some(key)
    }

    /// The LRU-end key without removing it.
    pub fn peek_lru(&self) -> Option<&str> {
        self.order.values().next().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.ticks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ticks.is_empty()
    }
}
