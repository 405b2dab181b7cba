//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! Client socket
//!     → request.rs (read request line + raw header lines)
//!     → target.rs (decompose request-target into host/port/path)
//!     → rebuild.rs (produce the outbound HTTP/1.0 header block)
//!     → proxy layer relays origin bytes back
//!     → response.rs (synthesized error pages when something fails)
//! ```
//!
//! # Design Decisions
//! - The outbound protocol version is always HTTP/1.0: the origin closes
//!   after one response, so response length falls out of end-of-stream and
//!   no chunked or keep-alive handling is needed
//! - Header lines are kept as raw strings in client order; rebuilding
//!   filters by name case-insensitively instead of parsing into a map

pub mod rebuild;
pub mod request;
pub mod response;
pub mod target;

pub use rebuild::build_upstream_request;
pub use request::RequestHead;
pub use target::{RequestTarget, TargetError};
