//! Shared utilities for integration tests.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use search_link::ClientConfig;

/// A cluster-health body with the given status.
#[allow(dead_code)]
pub fn health_body(status: &str) -> String {
    serde_json::json!({
        "cluster_name": "test-cluster",
        "status": status,
        "timed_out": false,
        "number_of_nodes": 2,
        "number_of_data_nodes": 2,
        "active_primary_shards": 5,
        "active_shards": 10,
        "relocating_shards": 0,
        "initializing_shards": 0,
        "unassigned_shards": 0,
        "delayed_unassigned_shards": 0,
        "number_of_pending_tasks": 0,
        "number_of_in_flight_fetch": 0,
        "task_max_waiting_in_queue_millis": 0,
        "active_shards_percent_as_number": 100.0
    })
    .to_string()
}

/// Start a programmable mock node on an ephemeral port.
///
/// `f` receives the raw request head and returns status and body.
pub async fn start_programmable_node<F, Fut>(f: F) -> SocketAddr
where
    F: Fn(String) -> Fut + Send + Sync + 'static,
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
                        let head = read_head(&mut socket).await;
                        let (status, body) = f(head).await;
                        let status_text = match status {
                            200 => "200 OK",
                            401 => "401 Unauthorized",
                            500 => "500 Internal Server Error",
                            502 => "502 Bad Gateway",
                            503 => "503 Service Unavailable",
                            _ => "200 OK",
                        };
                        let response = format!(
                            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status_text,
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

/// Start a mock node that always answers with the same status and body.
#[allow(dead_code)]
pub async fn start_mock_node(status: u16, body: String) -> SocketAddr {
    start_programmable_node(move |_| {
        let body = body.clone();
        async move { (status, body) }
    })
    .await
}

/// Start a mock node that records every request head it sees.
#[allow(dead_code)]
pub async fn start_recording_node(body: String) -> (SocketAddr, Arc<Mutex<Vec<String>>>) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let log = seen.clone();
    let addr = start_programmable_node(move |head| {
        log.lock().unwrap().push(head);
        let body = body.clone();
        async move { (200, body) }
    })
    .await;
    (addr, seen)
}

/// Start a node that reads the request and closes the connection without
/// answering.
#[allow(dead_code)]
pub async fn start_hangup_node() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            tokio::spawn(async move {
                read_head(&mut socket).await;
                drop(socket);
            });
        }
    });

    addr
}

/// An address nothing listens on.
#[allow(dead_code)]
pub fn closed_addr() -> SocketAddr {
    std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
}

/// Client config pointing at `addrs`, with short timeouts.
pub fn config_for(addrs: &[SocketAddr]) -> ClientConfig {
    let mut config = ClientConfig {
        hosts: addrs.iter().map(|a| format!("http://{}", a)).collect(),
        ..Default::default()
    };
    config.timeouts.connect_secs = 2;
    config.timeouts.request_secs = 5;
    config
}

async fn read_head(socket: &mut tokio::net::TcpStream) -> String {
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
    String::from_utf8_lossy(&buf).into_owned()
}
