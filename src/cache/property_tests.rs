//! Randomized cache tests.
//!
//! Proptest drives sequences of get/put operations, sequentially and
//! across threads, and checks that the capacity invariant holds and that
//! no stored body is ever corrupted by a concurrent interleaving.

use std::sync::Arc;
use std::thread;

use bytes::Bytes;
use proptest::prelude::*;

use crate::cache::ObjectCache;
use crate::config::CacheConfig;

const TEST_CAPACITY: usize = 4_096;
const TEST_MAX_OBJECT: usize = 1_024;

fn test_cache() -> ObjectCache {
    ObjectCache::new(&CacheConfig {
        capacity: TEST_CAPACITY,
        max_object_size: TEST_MAX_OBJECT,
    })
}

/// The body every test stores under a key is a deterministic function of
/// that key, so any body a lookup returns can be checked for corruption.
fn body_for(key: &str, len: usize) -> Bytes {
    let tag = key.as_bytes().iter().fold(0u8, |acc, b| acc.wrapping_add(*b));
    Bytes::from(vec![tag; len])
}

#[derive(Debug, Clone)]
enum CacheOp {
    Put { key: String, len: usize },
    Get { key: String },
}

fn key_strategy() -> impl Strategy<Value = String> {
    // A handful of keys so interleavings actually collide.
    prop_oneof![
        Just("http://a.test/".to_string()),
        Just("http://b.test/".to_string()),
        Just("http://c.test/page".to_string()),
        Just("http://d.test/img".to_string()),
    ]
}

fn op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        (key_strategy(), 1usize..2_048).prop_map(|(key, len)| CacheOp::Put { key, len }),
        key_strategy().prop_map(|key| CacheOp::Get { key }),
    ]
}

fn apply(cache: &ObjectCache, op: &CacheOp) {
    match op {
        CacheOp::Put { key, len } => cache.put(key, body_for(key, *len)),
        CacheOp::Get { key } => {
            if let Some(body) = cache.get(key) {
                let tag = body_for(key, 1)[0];
                assert!(
                    body.iter().all(|&b| b == tag),
                    "corrupted body for key {key}"
                );
            }
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Total stored bytes never exceed capacity, after any op sequence.
    #[test]
    fn capacity_invariant_holds(ops in prop::collection::vec(op_strategy(), 1..80)) {
        let cache = test_cache();
        for op in &ops {
            apply(&cache, op);
            prop_assert!(cache.current_size() <= cache.capacity());
        }
    }

    /// Bodies over the object size limit are never retrievable.
    #[test]
    fn oversized_bodies_are_excluded(
        key in key_strategy(),
        extra in 1usize..1_024,
    ) {
        let cache = test_cache();
        cache.put(&key, body_for(&key, TEST_MAX_OBJECT + extra));
        prop_assert!(cache.get(&key).is_none());
    }

    /// Whatever a lookup returns is exactly what some put stored for that
    /// key, byte for byte.
    #[test]
    fn lookups_never_see_torn_bodies(ops in prop::collection::vec(op_strategy(), 1..80)) {
        let cache = test_cache();
        for op in &ops {
            apply(&cache, op);
        }
    }
}

proptest! {
    // Threaded cases are slower; fewer of them still cover plenty of
    // interleavings because each case runs four racing threads.
    #![proptest_config(ProptestConfig::with_cases(20))]

    /// Concurrent handlers hammering overlapping keys leave the cache
    /// within capacity, with no corrupted entries.
    #[test]
    fn concurrent_interleavings_preserve_invariants(
        per_thread in prop::collection::vec(
            prop::collection::vec(op_strategy(), 1..40),
            4,
        )
    ) {
        let cache = Arc::new(test_cache());

        let handles: Vec<_> = per_thread
            .into_iter()
            .map(|ops| {
                let cache = Arc::clone(&cache);
                thread::spawn(move || {
                    for op in &ops {
                        apply(&cache, op);
                        assert!(cache.current_size() <= cache.capacity());
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().expect("cache worker panicked");
        }

        prop_assert!(cache.current_size() <= cache.capacity());

        // Every surviving entry must still be intact.
        for key in [
            "http://a.test/",
            "http://b.test/",
            "http://c.test/page",
            "http://d.test/img",
        ] {
            if let Some(body) = cache.get(key) {
                let tag = body_for(key, 1)[0];
                prop_assert!(body.iter().all(|&b| b == tag));
            }
        }
    }
}
