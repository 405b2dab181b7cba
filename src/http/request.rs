//! Request reading.
//!
//! # Responsibilities
//! - Read the request line and raw header lines from the client socket
//! - Reject malformed request lines without a response (peer sent garbage)
//! - Enforce explicit bounds on the size of the request head
//!
//! # Design Decisions
//! - Header lines are preserved verbatim (minus line endings) in client
//!   order; the rebuilder decides what to forward
//! - A malformed head reads as `None`, same as end-of-stream: the handler
//!   drops the connection silently in both cases

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt};

/// Maximum number of header lines accepted in one request head.
pub const MAX_HEADER_LINES: usize = 128;

/// Maximum total bytes accepted for the request line plus headers.
pub const MAX_HEAD_BYTES: usize = 64 * 1024;

/// One client request as read off the wire, before any rewriting.
///
/// Owned exclusively by its connection handler and discarded when the
/// request completes.
#[derive(Debug, Clone)]
pub struct RequestHead {
    /// Request method, verbatim.
    pub method: String,
    /// Request-target, verbatim. Doubles as the cache key.
    pub target: String,
    /// Protocol version as sent by the client (`HTTP/1.0` or `HTTP/1.1`).
    pub version: String,
    /// Raw header lines in client order, line endings stripped.
    pub headers: Vec<String>,
}

impl RequestHead {
    /// Case-insensitive lookup of a header value.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.iter().find_map(|line| {
            let (field, value) = line.split_once(':')?;
            if field.trim().eq_ignore_ascii_case(name) {
                Some(value.trim())
            } else {
                None
            }
        })
    }
}

/// Read one request head from the client.
///
/// Returns `Ok(None)` when the stream ends before a request line arrives,
/// when the request line cannot be split into exactly method, target and
/// version, or when the head exceeds its bounds. The caller drops the
/// connection without a response in all of those cases.
pub async fn read_head<R>(reader: &mut R) -> std::io::Result<Option<RequestHead>>
where
    R: AsyncBufRead + Unpin,
{
    // Cap at the reader level so a head with no line endings cannot grow
    // a buffer past the bound.
    let mut reader = reader.take(MAX_HEAD_BYTES as u64);

    let mut line = String::new();
    let n = reader.read_line(&mut line).await?;
    if n == 0 {
        return Ok(None);
    }
    let mut head_bytes = n;

    let request_line = line.trim_end();
    let mut parts = request_line.split_whitespace();
    let (method, target, version) = match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(method), Some(target), Some(version), None) => (method, target, version),
        _ => {
            tracing::debug!(line = %request_line, "malformed request line, dropping");
            return Ok(None);
        }
    };

    let mut head = RequestHead {
        method: method.to_string(),
        target: target.to_string(),
        version: version.to_string(),
        headers: Vec::new(),
    };

    loop {
        let mut line = String::new();
        let n = reader.read_line(&mut line).await?;
        if n == 0 {
            break;
        }
        head_bytes += n;
        if head_bytes >= MAX_HEAD_BYTES || head.headers.len() >= MAX_HEADER_LINES {
            tracing::debug!(target = %head.target, "request head too large, dropping");
            return Ok(None);
        }
        let line = line.trim_end_matches(['\r', '\n']);
        if line.is_empty() {
            break;
        }
        head.headers.push(line.to_string());
    }

    Ok(Some(head))
}
