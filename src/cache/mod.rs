//! Bounded LRU object cache subsystem.
//!
//! # Data Flow
//! ```text
//! Connection handler (cache hit check)
//!     → store.rs ObjectCache::get (lookup + MRU promotion, one lock scope)
//!     → cached bytes written straight to the client
//!
//! Connection handler (after a relayed miss)
//!     → store.rs ObjectCache::put (size gate, eviction loop, insert at MRU)
//!         → lru.rs recency order
//!         → entry.rs stored body
//!         → stats.rs counters
//! ```
//!
//! # Design Decisions
//! - The cache is the only shared mutable state in the proxy; one mutex
//!   guards the map, the recency order, the size accounting and the stats
//!   so no operation is ever partially visible
//! - Lookup and promotion happen under the same lock acquisition, closing
//!   the check-then-promote race
//! - Bodies are handed out as refcounted `Bytes`, so eviction can never
//!   free a body another task is still writing to its client

pub mod entry;
pub mod lru;
pub mod stats;
pub mod store;

#[cfg(test)]
mod property_tests;

pub use entry::CacheEntry;
pub use lru::LruTracker;
pub use stats::CacheStats;
pub use store::ObjectCache;
