//! Bounded TCP listener.
//!
//! # Responsibilities
//! - Bind the configured address
//! - Accept incoming TCP connections
//! - Enforce the connection limit via a semaphore permit per connection

use std::net::SocketAddr;
use std::sync::Arc;

use thiserror::Error;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::{OwnedSemaphorePermit, Semaphore};

use crate::config::ListenerConfig;

/// Errors from the listening socket.
#[derive(Debug, Error)]
pub enum ListenerError {
    /// The bind address could not be parsed or bound.
    #[error("failed to bind listener: {0}")]
    Bind(#[source] std::io::Error),

    /// Accepting a connection failed.
    #[error("failed to accept connection: {0}")]
    Accept(#[source] std::io::Error),
}

/// TCP listener that caps the number of in-flight connections.
///
/// `accept` waits for a free slot before accepting, so a flood of clients
/// queues in the kernel backlog instead of exhausting the process.
pub struct Listener {
    inner: TcpListener,
    slots: Arc<Semaphore>,
    max_connections: usize,
}

impl Listener {
    /// Bind the configured address.
    pub async fn bind(config: &ListenerConfig) -> Result<Self, ListenerError> {
        let listener = TcpListener::bind(&config.bind_address)
            .await
            .map_err(ListenerError::Bind)?;
        let local_addr = listener.local_addr().map_err(ListenerError::Bind)?;

        tracing::info!(
            address = %local_addr,
            max_connections = config.max_connections,
            "listener bound"
        );

        Ok(Self {
            inner: listener,
            slots: Arc::new(Semaphore::new(config.max_connections)),
            max_connections: config.max_connections,
        })
    }

    /// Accept one connection, waiting for a free slot first.
    ///
    /// The returned permit must be held for the connection's lifetime; the
    /// slot frees when it drops, even if the handler panics.
    pub async fn accept(
        &self,
    ) -> Result<(TcpStream, SocketAddr, ConnectionPermit), ListenerError> {
        let permit = self
            .slots
            .clone()
            .acquire_owned()
            .await
            .expect("listener semaphore closed");

        let (stream, peer_addr) = self.inner.accept().await.map_err(ListenerError::Accept)?;

        tracing::debug!(
            peer_addr = %peer_addr,
            free_slots = self.slots.available_permits(),
            "connection accepted"
        );

        Ok((stream, peer_addr, ConnectionPermit { _permit: permit }))
    }

    /// Address the listener is actually bound to.
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.inner.local_addr()
    }

    /// Configured connection cap.
    pub fn max_connections(&self) -> usize {
        self.max_connections
    }
}

/// A held connection slot; dropping it releases the slot.
#[derive(Debug)]
pub struct ConnectionPermit {
    _permit: OwnedSemaphorePermit,
}
