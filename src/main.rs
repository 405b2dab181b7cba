//! Entrypoint for the caching forward proxy.

use std::sync::Arc;

use clap::Parser;

use forward_proxy::config::ProxyConfig;
use forward_proxy::lifecycle::{wait_for_signal, Shutdown};
use forward_proxy::net::Listener;
use forward_proxy::observability;
use forward_proxy::proxy::ProxyServer;

/// Caching forward HTTP proxy.
#[derive(Parser)]
#[command(name = "forward-proxy", version, about)]
struct Cli {
    /// TCP port to listen on.
    port: u16,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = ProxyConfig::for_port(cli.port);

    observability::logging::init(&config.observability);

    tracing::info!(
        bind_address = %config.listener.bind_address,
        max_connections = config.listener.max_connections,
        cache_capacity = config.cache.capacity,
        max_object_size = config.cache.max_object_size,
        "forward-proxy starting"
    );

    let listener = Listener::bind(&config.listener).await?;

    let shutdown = Arc::new(Shutdown::new());
    {
        let shutdown = Arc::clone(&shutdown);
        tokio::spawn(async move {
            wait_for_signal().await;
            shutdown.trigger();
        });
    }

    let server = ProxyServer::new(config);
    server.run(listener, &shutdown).await?;

    tracing::info!("shutdown complete");
    Ok(())
}
