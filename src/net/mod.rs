//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming TCP connection
//!     → listener.rs (accept loop, semaphore-bounded connection slots)
//!     → connection.rs (per-connection id, lifecycle tracking)
//!     → handed to the proxy layer
//! ```
//!
//! # Design Decisions
//! - A semaphore caps in-flight connections instead of letting every
//!   accept spawn unchecked
//! - Each connection holds a tracking guard so shutdown can drain
//!   in-flight work before exiting

pub mod connection;
pub mod listener;

pub use connection::{ConnectionGuard, ConnectionId, ConnectionTracker};
pub use listener::{ConnectionPermit, Listener, ListenerError};
