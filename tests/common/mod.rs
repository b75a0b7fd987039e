//! Shared utilities for integration testing.

#![allow(dead_code)]

use std::future::Future;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use service_chain::chain::ServiceRole;
use service_chain::config::{ChainConfig, DownstreamConfig};
use service_chain::http::ChainServer;
use service_chain::lifecycle::Shutdown;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

/// Inbound request as seen by a mock downstream.
#[derive(Debug, Clone, Default)]
pub struct SeenRequest {
    pub target: String,
    pub correlation_id: Option<String>,
}

/// Requests recorded by a capturing backend.
pub type Seen = Arc<Mutex<Vec<SeenRequest>>>;

/// A local address nothing is listening on.
pub fn dead_addr() -> SocketAddr {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    addr
}

/// Read the request head and pull out the target and correlation header.
async fn read_request(socket: &mut TcpStream) -> SeenRequest {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
        match socket.read(&mut chunk).await {
            Ok(0) | Err(_) => break,
            Ok(n) => buf.extend_from_slice(&chunk[..n]),
        }
    }

    let head = String::from_utf8_lossy(&buf);
    let mut lines = head.lines();
    let target = lines
        .next()
        .and_then(|l| l.split_whitespace().nth(1))
        .unwrap_or_default()
        .to_string();
    let correlation_id = lines
        .filter_map(|l| l.split_once(':'))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("x-correlation-id"))
        .map(|(_, value)| value.trim().to_string());

    SeenRequest {
        target,
        correlation_id,
    }
}

fn status_line(status: u16) -> &'static str {
    match status {
        200 => "200 OK",
        404 => "404 Not Found",
        500 => "500 Internal Server Error",
        502 => "502 Bad Gateway",
        503 => "503 Service Unavailable",
        _ => "200 OK",
    }
}

/// Start a programmable mock downstream on an ephemeral port.
///
/// `f` receives the parsed request and returns `(status, body)`.
pub async fn start_programmable_backend<F, Fut>(f: F) -> SocketAddr
where
    F: Fn(SeenRequest) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = (u16, String)> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let f = Arc::new(f);

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let f = f.clone();
                    tokio::spawn(async move {
                        let seen = read_request(&mut socket).await;
                        let (status, body) = f(seen).await;
                        let response = format!(
                            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status_line(status),
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}

/// Mock downstream answering every request with a fixed status and body.
pub async fn start_mock_backend(status: u16, body: &'static str) -> SocketAddr {
    start_programmable_backend(move |_| async move { (status, body.to_string()) }).await
}

/// Mock downstream that records every request and answers like a leaf.
pub async fn start_capturing_backend() -> (SocketAddr, Seen) {
    let seen: Seen = Arc::new(Mutex::new(Vec::new()));
    let log = seen.clone();
    let addr = start_programmable_backend(move |req| {
        let log = log.clone();
        async move {
            let id = req.correlation_id.clone().unwrap_or_default();
            log.lock().unwrap().push(req);
            (200, format!(r#"{{"echo":"captured","correlation_id":"{}"}}"#, id))
        }
    })
    .await;
    (addr, seen)
}

/// Mock downstream that accepts connections and never answers in time.
pub async fn start_stalling_backend(stall: Duration) -> SocketAddr {
    start_programmable_backend(move |_| async move {
        tokio::time::sleep(stall).await;
        (200, "{}".to_string())
    })
    .await
}

/// Config for `role` listening on an ephemeral port and calling `downstream`.
pub fn config_for(role: ServiceRole, downstream: Option<SocketAddr>, timeout_ms: u64) -> ChainConfig {
    let mut config = ChainConfig::for_role(role);
    config.service.bind_address = Some("127.0.0.1:0".to_string());
    if let (Some(ds), Some(addr)) = (config.downstream.as_mut(), downstream) {
        ds.base_url = format!("http://{}", addr);
        ds.timeout_ms = timeout_ms;
    }
    config
}

/// Start a chain service; returns its address.
pub async fn start_service(config: ChainConfig, shutdown: &Shutdown) -> SocketAddr {
    let server = ChainServer::new(config).unwrap();
    let listener = server.bind().await.unwrap();
    let addr = listener.local_addr().unwrap();
    let stopped = shutdown.signalled();
    tokio::spawn(async move {
        let _ = server.run(listener, stopped).await;
    });
    addr
}

/// A running C → B → A chain.
pub struct Chain {
    pub leaf: SocketAddr,
    pub middle: SocketAddr,
    pub root: SocketAddr,
    pub shutdown: Shutdown,
}

/// Start all three services with their default timeouts.
pub async fn start_chain() -> Chain {
    let shutdown = Shutdown::new();
    let leaf = start_service(config_for(ServiceRole::Leaf, None, 0), &shutdown).await;
    let middle = start_service(config_for(ServiceRole::Middle, Some(leaf), 1_000), &shutdown).await;
    let root = start_service(config_for(ServiceRole::Root, Some(middle), 2_000), &shutdown).await;
    Chain {
        leaf,
        middle,
        root,
        shutdown,
    }
}

/// Start middle and root with the leaf's address pointing nowhere.
pub async fn start_chain_without_leaf() -> Chain {
    let shutdown = Shutdown::new();
    let leaf = dead_addr();
    let middle = start_service(config_for(ServiceRole::Middle, Some(leaf), 1_000), &shutdown).await;
    let root = start_service(config_for(ServiceRole::Root, Some(middle), 2_000), &shutdown).await;
    Chain {
        leaf,
        middle,
        root,
        shutdown,
    }
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}

/// GET `url`, optionally with a correlation header; returns status and JSON body.
pub async fn get_json(url: &str, correlation_id: Option<&str>) -> (u16, serde_json::Value) {
    let mut req = client().get(url);
    if let Some(id) = correlation_id {
        req = req.header("X-Correlation-ID", id);
    }
    let res = req.send().await.expect("service unreachable");
    let status = res.status().as_u16();
    let body = res.json().await.expect("body is not JSON");
    (status, body)
}

/// GET `url` with a correlation header sent as raw bytes (may be non-ASCII).
pub async fn get_json_with_raw_id(url: &str, correlation_id: &[u8]) -> (u16, serde_json::Value) {
    let value = reqwest::header::HeaderValue::from_bytes(correlation_id).unwrap();
    let res = client()
        .get(url)
        .header("X-Correlation-ID", value)
        .send()
        .await
        .expect("service unreachable");
    let status = res.status().as_u16();
    let body = res.json().await.expect("body is not JSON");
    (status, body)
}

/// Downstream config pointing at a mock backend.
pub fn downstream_to(addr: SocketAddr, path: &str, timeout_ms: u64) -> DownstreamConfig {
    DownstreamConfig {
        base_url: format!("http://{}", addr),
        path: path.to_string(),
        timeout_ms,
    }
}
