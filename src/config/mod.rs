//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! CLI argument (listening port)
//!     → ProxyConfig::for_port (defaults + port splice)
//!     → shared via Arc to all subsystems
//! ```
//!
//! # Design Decisions
//! - No configuration file: cache sizing and rewrite rules are fixed
//!   constants carried by the Default impls
//! - Config is immutable once built; every section has defaults
//! - Types keep their serde derives so a file loader can be added later
//!   without touching the schema

pub mod schema;

pub use schema::CacheConfig;
pub use schema::ListenerConfig;
pub use schema::ProxyConfig;
pub use schema::TimeoutConfig;
pub use schema::UpstreamConfig;
