//! Accept-and-dispatch loop.
//!
//! # Responsibilities
//! - Accept connections from the bounded listener
//! - Spawn one handler task per connection, carrying its slot permit and
//!   tracking guard
//! - Keep accepting no matter what any single handler does
//! - Stop and drain on the shutdown signal

use std::sync::Arc;
use std::time::Duration;

use crate::cache::ObjectCache;
use crate::config::ProxyConfig;
use crate::lifecycle::Shutdown;
use crate::net::{ConnectionTracker, Listener, ListenerError};
use crate::proxy::ConnectionHandler;

/// The proxy server: shared cache plus the dispatch loop.
pub struct ProxyServer {
    config: Arc<ProxyConfig>,
    cache: Arc<ObjectCache>,
    tracker: ConnectionTracker,
}

impl ProxyServer {
    pub fn new(config: ProxyConfig) -> Self {
        let cache = Arc::new(ObjectCache::new(&config.cache));
        Self {
            config: Arc::new(config),
            cache,
            tracker: ConnectionTracker::new(),
        }
    }

    /// The shared object cache.
    pub fn cache(&self) -> Arc<ObjectCache> {
        Arc::clone(&self.cache)
    }

    /// Run the dispatch loop until shutdown triggers, then drain.
    ///
    /// Handler tasks are fire-and-forget as far as request flow goes, but
    /// each carries a tracker guard so the drain below can wait for them.
    pub async fn run(&self, listener: Listener, shutdown: &Shutdown) -> Result<(), ListenerError> {
        let mut shutdown_rx = shutdown.subscribe();

        loop {
            tokio::select! {
                accepted = listener.accept() => {
                    let (stream, peer_addr, permit) = match accepted {
                        Ok(accepted) => accepted,
                        Err(e) => {
                            tracing::warn!(error = %e, "accept failed");
                            continue;
                        }
                    };

                    let handler = ConnectionHandler::new(
                        Arc::clone(&self.cache),
                        Arc::clone(&self.config),
                        peer_addr,
                    );
                    let guard = self.tracker.track();

                    tokio::spawn(async move {
                        let _permit = permit;
                        let connection_id = guard.id();
                        let _guard = guard;
                        if let Err(e) = handler.handle(stream).await {
                            tracing::debug!(
                                connection_id = %connection_id,
                                peer_addr = %peer_addr,
                                error = %e,
                                "connection handler failed"
                            );
                        }
                    });
                }
                _ = shutdown_rx.recv() => {
                    tracing::info!("shutdown requested, draining connections");
                    break;
                }
            }
        }

        let deadline = Duration::from_secs(self.config.timeouts.drain_secs);
        if !self.tracker.drain(deadline).await {
            tracing::warn!(
                remaining = self.tracker.active_count(),
                "drain deadline passed with connections still in flight"
            );
        }
        Ok(())
    }
}
