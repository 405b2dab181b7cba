//! The object cache.
//!
//! # Responsibilities
//! - Map request-target keys to cached response bodies
//! - Keep the byte total under capacity by evicting from the LRU end
//! - Refuse bodies over the per-object limit or the whole capacity
//! - Make every operation atomic with respect to concurrent handlers
//!
//! # Design Decisions
//! - One `Mutex` over map + recency order + size accounting + stats:
//!   the invariants relate all four, so they change together or not at all
//! - `get` promotes under the same lock as the existence check
//! - Handed-out `Bytes` are refcounted; a concurrent eviction only drops
//!   the cache's reference

use std::collections::HashMap;
use std::sync::Mutex;

use bytes::Bytes;

use crate::cache::{CacheEntry, CacheStats, LruTracker};
use crate::config::CacheConfig;

/// Bounded, thread-safe LRU store of response bodies.
#[derive(Debug)]
pub struct ObjectCache {
    /// Total capacity in bytes across all entries.
    capacity: usize,
    /// Largest single body the cache will accept.
    max_object_size: usize,
    inner: Mutex<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    entries: HashMap<String, CacheEntry>,
    lru: LruTracker,
    current_size: usize,
    stats: CacheStats,
}

impl ObjectCache {
    pub fn new(config: &CacheConfig) -> Self {
        Self {
            capacity: config.capacity,
            max_object_size: config.max_object_size,
            inner: Mutex::new(Inner::default()),
        }
    }

    /// Look up a body and promote it to MRU.
    ///
    /// Check, promotion and handout all happen under one lock acquisition.
    pub fn get(&self, key: &str) -> Option<Bytes> {
        let mut inner = self.lock();
        let body = inner.entries.get(key).map(CacheEntry::body);
        match body {
            Some(body) => {
                inner.lru.touch(key);
                inner.stats.record_hit();
                Some(body)
            }
            None => {
                inner.stats.record_miss();
                None
            }
        }
    }

    /// Insert a body, evicting LRU entries until it fits.
    ///
    /// Bodies over the object limit, or larger than the whole cache, are
    /// silently skipped. A duplicate key is replaced (last writer wins;
    /// origin responses for one target are treated as equivalent).
    pub fn put(&self, key: &str, body: Bytes) {
        // The capacity check matters when the object limit is configured
        // above capacity: no amount of eviction makes such a body fit.
        if body.len() > self.max_object_size || body.len() > self.capacity {
            tracing::trace!(
                key = %key,
                size = body.len(),
                limit = self.max_object_size.min(self.capacity),
                "body over cache limits, not caching"
            );
            return;
        }

        let mut inner = self.lock();

        if let Some(old) = inner.entries.remove(key) {
            inner.current_size -= old.size();
            inner.lru.remove(key);
        }

        while inner.current_size + body.len() > self.capacity {
            let Some(victim) = inner.lru.pop_lru() else {
                break;
            };
            if let Some(evicted) = inner.entries.remove(&victim) {
                inner.current_size -= evicted.size();
                inner.stats.record_eviction();
                tracing::trace!(key = %victim, freed = evicted.size(), "evicted LRU entry");
            }
        }

        inner.current_size += body.len();
        inner.entries.insert(key.to_string(), CacheEntry::new(body));
        inner.lru.touch(key);
        inner.stats.record_insertion();
    }

    /// Counter snapshot with current entry and byte totals filled in.
    pub fn stats(&self) -> CacheStats {
        let inner = self.lock();
        let mut stats = inner.stats.clone();
        stats.entries = inner.entries.len();
        stats.bytes = inner.current_size;
        stats
    }

    /// Number of entries currently stored.
    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().entries.is_empty()
    }

    /// Bytes currently stored.
    pub fn current_size(&self) -> usize {
        self.lock().current_size
    }

    /// Total capacity in bytes.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Per-object size limit in bytes.
    pub fn max_object_size(&self) -> usize {
        self.max_object_size
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().expect("object cache lock poisoned")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cache(capacity: usize, max_object_size: usize) -> ObjectCache {
        ObjectCache::new(&CacheConfig {
            capacity,
            max_object_size,
        })
    }

    fn body(len: usize) -> Bytes {
        Bytes::from(vec![0xAB; len])
    }

    #[test]
    fn get_returns_what_put_stored() {
        let cache = cache(1_000, 500);
        cache.put("http://a/", Bytes::from_static(b"response"));
        assert_eq!(cache.get("http://a/"), Some(Bytes::from_static(b"response")));
    }

    #[test]
    fn miss_returns_none_and_counts() {
        let cache = cache(1_000, 500);
        assert_eq!(cache.get("http://absent/"), None);
        assert_eq!(cache.stats().misses, 1);
    }

    #[test]
    fn oversized_body_is_never_stored() {
        let cache = cache(1_000_000, 100);
        cache.put("http://big/", body(101));
        assert_eq!(cache.get("http://big/"), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn body_at_the_limit_is_stored() {
        let cache = cache(1_000_000, 100);
        cache.put("http://ok/", body(100));
        assert!(cache.get("http://ok/").is_some());
    }

    #[test]
    fn body_over_capacity_is_never_stored() {
        // Object limit above total capacity: a body that passes the
        // object gate still must not blow the byte budget or drain the
        // cache trying.
        let cache = cache(100, 200);
        cache.put("small", body(40));
        cache.put("big", body(150));
        assert!(cache.get("big").is_none());
        assert!(cache.get("small").is_some());
        assert!(cache.current_size() <= cache.capacity());
    }

    #[test]
    fn capacity_is_never_exceeded() {
        let cache = cache(90_000, 50_000);
        cache.put("a", body(50_000));
        cache.put("b", body(50_000));
        cache.put("c", body(50_000));
        assert!(cache.current_size() <= cache.capacity());
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn eviction_starts_at_the_lru_end() {
        // A then B; inserting C must evict A first.
        let cache = cache(90_000, 50_000);
        cache.put("a", body(50_000));
        cache.put("b", body(30_000));
        cache.put("c", body(50_000));
        assert!(cache.get("a").is_none());
        assert!(cache.get("b").is_some());
        assert!(cache.get("c").is_some());
    }

    #[test]
    fn get_promotion_changes_the_victim() {
        // Touching A between B and C makes B the eviction victim.
        let cache = cache(90_000, 50_000);
        cache.put("a", body(40_000));
        cache.put("b", body(40_000));
        assert!(cache.get("a").is_some());
        cache.put("c", body(40_000));
        assert!(cache.get("a").is_some());
        assert!(cache.get("b").is_none());
        assert!(cache.get("c").is_some());
    }

    #[test]
    fn duplicate_key_is_replaced_not_duplicated() {
        let cache = cache(1_000, 500);
        cache.put("k", body(100));
        cache.put("k", body(200));
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.current_size(), 200);
        assert_eq!(cache.get("k").unwrap().len(), 200);
    }

    #[test]
    fn eviction_can_remove_several_entries() {
        let cache = cache(100, 100);
        cache.put("a", body(40));
        cache.put("b", body(40));
        cache.put("c", body(90));
        assert_eq!(cache.len(), 1);
        assert!(cache.get("c").is_some());
        assert_eq!(cache.stats().evictions, 2);
    }

    #[test]
    fn handed_out_body_survives_eviction() {
        let cache = cache(100, 100);
        cache.put("a", body(80));
        let held = cache.get("a").unwrap();
        cache.put("b", body(80)); // evicts "a"
        assert!(cache.get("a").is_none());
        assert_eq!(held.len(), 80);
        assert!(held.iter().all(|&b| b == 0xAB));
    }

    #[test]
    fn stats_reflect_the_history() {
        let cache = cache(1_000, 500);
        cache.put("a", body(10));
        cache.get("a");
        cache.get("gone");
        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.insertions, 1);
        assert_eq!(stats.entries, 1);
        assert_eq!(stats.bytes, 10);
    }
}
