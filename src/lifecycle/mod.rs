//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! SIGINT/SIGTERM (signals.rs)
//!     → Shutdown::trigger (shutdown.rs)
//!     → dispatch loop stops accepting
//!     → in-flight connections drain (bounded wait)
//!     → process exits
//! ```
//!
//! # Design Decisions
//! - Ordered shutdown: stop accepting, drain, exit
//! - The drain wait is bounded; stragglers are logged and abandoned

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
pub use signals::wait_for_signal;
