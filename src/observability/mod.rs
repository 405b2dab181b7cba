//! Observability subsystem.
//!
//! # Design Decisions
//! - Structured logging through `tracing`; every event carries its context
//!   as fields (`peer_addr`, `target`, sizes), never stitched into strings
//! - `RUST_LOG` overrides the configured level when set
//! - Cache counters live with the cache (`cache::stats`); this module only
//!   wires up the subscriber

pub mod logging;
