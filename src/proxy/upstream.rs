//! Origin connection and response relay.
//!
//! # Responsibilities
//! - Dial the decomposed host:port with a connect deadline
//! - Stream the origin's response to the client as it arrives
//! - Stage a copy for the cache while the body stays under the object limit
//!
//! # Design Decisions
//! - Relaying is chunk-by-chunk, never buffer-then-send: the client sees
//!   bytes as soon as the origin produces them
//! - Once the staged copy would exceed the object limit it is discarded
//!   and only the relay continues; caching is best-effort and must never
//!   slow or fail the client-facing path

use std::time::Duration;

use bytes::Bytes;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpStream;

/// Relay read-chunk size.
const CHUNK_SIZE: usize = 8 * 1024;

/// Open a TCP connection to the origin within the deadline.
pub async fn connect(host: &str, port: u16, deadline: Duration) -> std::io::Result<TcpStream> {
    match tokio::time::timeout(deadline, TcpStream::connect((host, port))).await {
        Ok(result) => result,
        Err(_) => Err(std::io::Error::new(
            std::io::ErrorKind::TimedOut,
            format!("connect to {}:{} timed out", host, port),
        )),
    }
}

/// What a completed relay produced.
#[derive(Debug)]
pub struct RelayOutcome {
    /// Total bytes forwarded to the client.
    pub bytes_relayed: u64,
    /// The full response, present only if it never exceeded the object
    /// limit and the relay ran to end-of-stream.
    pub body: Option<Bytes>,
}

/// Stream the origin's response to the client until end-of-stream.
///
/// Every chunk goes to the client immediately; the same chunk is appended
/// to a staging buffer until the accumulated size would pass
/// `max_object_size`, at which point staging stops for good. A write
/// failure toward the client aborts the relay with the error; the partial
/// staging buffer is dropped with it.
pub async fn relay<R, W>(
    origin: &mut R,
    client: &mut W,
    max_object_size: usize,
) -> std::io::Result<RelayOutcome>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut chunk = [0u8; CHUNK_SIZE];
    let mut staging: Vec<u8> = Vec::new();
    let mut cacheable = true;
    let mut bytes_relayed: u64 = 0;

    loop {
        let n = origin.read(&mut chunk).await?;
        if n == 0 {
            break;
        }
        client.write_all(&chunk[..n]).await?;
        bytes_relayed += n as u64;

        if cacheable {
            if staging.len() + n <= max_object_size {
                staging.extend_from_slice(&chunk[..n]);
            } else {
                cacheable = false;
                staging = Vec::new();
            }
        }
    }
    client.flush().await?;

    let body = if cacheable && !staging.is_empty() {
        Some(Bytes::from(staging))
    } else {
        None
    };
    Ok(RelayOutcome {
        bytes_relayed,
        body,
    })
}
