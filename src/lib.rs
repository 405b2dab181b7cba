//! Concurrent caching forward HTTP proxy.
//!
//! # Architecture Overview
//!
//! ```text
//!                     ┌──────────────────────────────────────────────┐
//!                     │                FORWARD PROXY                  │
//!                     │                                               │
//!  Client Request     │  ┌─────────┐   ┌─────────┐   ┌────────────┐  │
//!  ───────────────────┼─▶│   net   │──▶│  proxy  │──▶│    http    │  │
//!                     │  │listener │   │ handler │   │ target +   │  │
//!                     │  └─────────┘   └────┬────┘   │ rebuild    │  │
//!                     │                     │        └─────┬──────┘  │
//!                     │               hit?  │              │ miss    │
//!                     │              ┌──────▼─────┐  ┌─────▼──────┐  │     Origin
//!  Client Response    │              │   cache    │  │  upstream  │──┼──── Server
//!  ◀──────────────────┼──────────────│ LRU store  │◀─│   relay    │  │
//!                     │              └────────────┘  └────────────┘  │
//!                     │                                               │
//!                     │  ┌─────────────────────────────────────────┐ │
//!                     │  │          Cross-Cutting Concerns          │ │
//!                     │  │  ┌────────┐ ┌───────────┐ ┌───────────┐ │ │
//!                     │  │  │ config │ │ lifecycle │ │observa-   │ │ │
//!                     │  │  │        │ │ shutdown  │ │bility     │ │ │
//!                     │  │  └────────┘ └───────────┘ └───────────┘ │ │
//!                     │  └─────────────────────────────────────────┘ │
//!                     └──────────────────────────────────────────────┘
//! ```
//!
//! Each accepted connection runs in its own task. The LRU object cache is
//! the only shared mutable state; everything else is exclusively owned by
//! its handler.

// Core subsystems
pub mod cache;
pub mod config;
pub mod http;
pub mod net;
pub mod proxy;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;

pub use cache::ObjectCache;
pub use config::ProxyConfig;
pub use lifecycle::Shutdown;
pub use proxy::ProxyServer;
