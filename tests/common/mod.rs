//! Shared utilities for integration testing: mock origins and a proxy
//! harness bound to ephemeral ports.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use forward_proxy::config::ProxyConfig;
use forward_proxy::lifecycle::Shutdown;
use forward_proxy::net::Listener;
use forward_proxy::proxy::ProxyServer;

/// Start a mock origin that answers every connection with a complete
/// HTTP/1.0 response carrying `body`, then closes.
///
/// Returns the origin's address and a counter of accepted connections,
/// which is how tests observe whether the proxy re-fetched or served from
/// cache.
pub async fn start_origin(body: Vec<u8>) -> (SocketAddr, Arc<AtomicUsize>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let connections = Arc::new(AtomicUsize::new(0));

    let counter = Arc::clone(&connections);
    tokio::spawn(async move {
        loop {
            let (mut socket, _) = match listener.accept().await {
                Ok(accepted) => accepted,
                Err(_) => break,
            };
            counter.fetch_add(1, Ordering::SeqCst);
            let body = body.clone();
            tokio::spawn(async move {
                read_request_head(&mut socket).await;
                let head = format!(
                    "HTTP/1.0 200 OK\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                    body.len()
                );
                let _ = socket.write_all(head.as_bytes()).await;
                let _ = socket.write_all(&body).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    (addr, connections)
}

/// Read until the blank line ending a request head (or EOF).
async fn read_request_head(socket: &mut TcpStream) {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        match socket.read(&mut chunk).await {
            Ok(0) | Err(_) => break,
            Ok(n) => {
                buf.extend_from_slice(&chunk[..n]);
                if buf.windows(4).any(|w| w == b"\r\n\r\n") {
                    break;
                }
            }
        }
    }
}

/// Bind the proxy on an ephemeral port and run it in the background.
pub async fn spawn_proxy(mut config: ProxyConfig) -> SocketAddr {
    config.listener.bind_address = "127.0.0.1:0".to_string();
    let listener = Listener::bind(&config.listener).await.unwrap();
    let addr = listener.local_addr().unwrap();

    let server = ProxyServer::new(config);
    tokio::spawn(async move {
        let shutdown = Shutdown::new();
        let _ = server.run(listener, &shutdown).await;
    });

    addr
}

/// Send one raw request through the proxy and collect the full response.
pub async fn send_raw(proxy: SocketAddr, request: &str) -> Vec<u8> {
    let mut stream = TcpStream::connect(proxy).await.unwrap();
    stream.write_all(request.as_bytes()).await.unwrap();
    let mut response = Vec::new();
    stream.read_to_end(&mut response).await.unwrap();
    response
}

/// GET an absolute-form target through the proxy.
pub async fn proxy_get(proxy: SocketAddr, target: &str) -> Vec<u8> {
    let request = format!("GET {} HTTP/1.1\r\nAccept: */*\r\n\r\n", target);
    send_raw(proxy, &request).await
}

/// The body portion of a raw HTTP response.
pub fn response_body(response: &[u8]) -> &[u8] {
    let pos = response
        .windows(4)
        .position(|w| w == b"\r\n\r\n")
        .expect("response has no header terminator");
    &response[pos + 4..]
}
