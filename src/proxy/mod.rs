//! Proxy engine subsystem.
//!
//! # Data Flow
//! ```text
//! Accepted connection
//!     → server.rs (dispatch loop: one task per connection)
//!     → handler.rs (read request → cache check → forward or serve)
//!         → cache hit: cached bytes straight back to the client
//!         → cache miss: upstream.rs (connect, send rebuilt request,
//!           relay origin bytes to client while staging a cacheable copy)
//!     → cache put (only if the whole response fit the object limit)
//! ```
//!
//! # Design Decisions
//! - Handler failures are logged and die with their task; nothing
//!   propagates to the accept loop
//! - The cache is injected as an explicit `Arc<ObjectCache>` dependency,
//!   not reached through a global

pub mod handler;
pub mod server;
pub mod upstream;

use thiserror::Error;

pub use handler::ConnectionHandler;
pub use server::ProxyServer;

/// Errors a connection handler can die with.
///
/// These cover mid-stream failures only; protocol errors the handler can
/// answer (bad method, bad target, unreachable origin) are handled in
/// place and never surface here.
#[derive(Debug, Error)]
pub enum ProxyError {
    /// Socket I/O failed mid-request.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}
