//! Per-connection request handling.
//!
//! # Responsibilities
//! - Read and validate one client request
//! - Serve it from the cache, or forward it to the origin and relay back
//! - Store cacheable responses after the relay completes
//!
//! # Design Decisions
//! - The cache key is the original request-target string, not the
//!   decomposed triple; get and put must key identically
//! - Cached bytes are a complete origin response, so a hit writes them
//!   verbatim with no header regeneration
//! - Targets containing "favicon" are dropped without any response, a
//!   long-standing rule kept explicit here

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncWrite, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;

use crate::cache::ObjectCache;
use crate::config::ProxyConfig;
use crate::http::request::{read_head, RequestHead};
use crate::http::target::RequestTarget;
use crate::http::{build_upstream_request, response};
use crate::proxy::upstream;
use crate::proxy::ProxyError;

/// Handles one accepted client connection, start to finish.
///
/// The shared cache is injected at construction; everything else the
/// handler touches is exclusively its own.
pub struct ConnectionHandler {
    cache: Arc<ObjectCache>,
    config: Arc<ProxyConfig>,
    peer_addr: SocketAddr,
}

impl ConnectionHandler {
    pub fn new(cache: Arc<ObjectCache>, config: Arc<ProxyConfig>, peer_addr: SocketAddr) -> Self {
        Self {
            cache,
            config,
            peer_addr,
        }
    }

    /// Drive the request through to completion.
    ///
    /// Protocol errors are answered (or deliberately dropped) in place and
    /// return `Ok`; only mid-stream I/O failures surface as errors, for
    /// the dispatcher to log. The client socket closes when the stream
    /// halves drop.
    pub async fn handle(&self, stream: TcpStream) -> Result<(), ProxyError> {
        let (read_half, mut client) = stream.into_split();
        let mut reader = BufReader::new(read_half);

        let head_deadline = Duration::from_secs(self.config.timeouts.client_header_secs);
        let head = match tokio::time::timeout(head_deadline, read_head(&mut reader)).await {
            Ok(Ok(Some(head))) => head,
            Ok(Ok(None)) => {
                // Peer disconnected or sent garbage; no response owed.
                return Ok(());
            }
            Ok(Err(e)) => return Err(e.into()),
            Err(_) => {
                tracing::debug!(peer_addr = %self.peer_addr, "timed out reading request head");
                return Ok(());
            }
        };

        tracing::debug!(
            peer_addr = %self.peer_addr,
            method = %head.method,
            target = %head.target,
            version = %head.version,
            "request received"
        );

        if !is_supported_method(&head.method) {
            client.write_all(&response::not_implemented(&head.method)).await?;
            client.flush().await?;
            return Ok(());
        }

        if head.target.contains("favicon") {
            tracing::trace!(peer_addr = %self.peer_addr, "favicon request dropped");
            return Ok(());
        }

        let target = match RequestTarget::parse(&head.target, head.header("Host")) {
            Ok(target) => target,
            Err(e) => {
                tracing::debug!(
                    peer_addr = %self.peer_addr,
                    target = %head.target,
                    error = %e,
                    "unusable request-target"
                );
                client
                    .write_all(&response::bad_request(&head.target, &e.to_string()))
                    .await?;
                client.flush().await?;
                return Ok(());
            }
        };

        if let Some(body) = self.cache.get(&head.target) {
            tracing::debug!(
                peer_addr = %self.peer_addr,
                target = %head.target,
                size = body.len(),
                "served from cache"
            );
            client.write_all(&body).await?;
            client.flush().await?;
            return Ok(());
        }

        self.forward(&head, &target, &mut client).await
    }

    /// Cache-miss path: connect to the origin, relay, maybe store.
    async fn forward(
        &self,
        head: &RequestHead,
        target: &RequestTarget,
        client: &mut (impl AsyncWrite + Unpin),
    ) -> Result<(), ProxyError> {
        let connect_deadline = Duration::from_secs(self.config.timeouts.connect_secs);
        let mut origin = match upstream::connect(&target.host, target.port, connect_deadline).await
        {
            Ok(stream) => stream,
            Err(e) => {
                tracing::warn!(
                    peer_addr = %self.peer_addr,
                    origin = %target.authority(),
                    error = %e,
                    "origin connect failed"
                );
                client
                    .write_all(&response::connect_failed(&target.authority()))
                    .await?;
                client.flush().await?;
                return Ok(());
            }
        };

        let request = build_upstream_request(
            &head.method,
            target,
            &head.headers,
            &self.config.upstream.user_agent,
        );
        origin.write_all(request.as_bytes()).await?;

        let outcome =
            upstream::relay(&mut origin, client, self.config.cache.max_object_size).await?;

        if let Some(body) = outcome.body {
            self.cache.put(&head.target, body);
        }

        tracing::debug!(
            peer_addr = %self.peer_addr,
            origin = %target.authority(),
            bytes = outcome.bytes_relayed,
            "relay complete"
        );
        Ok(())
        // origin socket closes here on drop
    }
}

fn is_supported_method(method: &str) -> bool {
    method.eq_ignore_ascii_case("GET") || method.eq_ignore_ascii_case("HEAD")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_get_and_head_are_supported() {
        assert!(is_supported_method("GET"));
        assert!(is_supported_method("get"));
        assert!(is_supported_method("HEAD"));
        assert!(!is_supported_method("POST"));
        assert!(!is_supported_method("CONNECT"));
        assert!(!is_supported_method("DELETE"));
    }
}
