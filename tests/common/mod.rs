//! Shared utilities for integration testing.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use event_relay::config::ServiceConfig;
use event_relay::http::HttpServer;
use event_relay::lifecycle::Shutdown;

/// A downstream receiver that records every request it sees.
pub struct MockReceiver {
    pub addr: SocketAddr,
    pub received: Arc<Mutex<Vec<ReceivedRequest>>>,
}

#[derive(Debug, Clone)]
#[allow(dead_code)]
pub struct ReceivedRequest {
    /// Request line and headers, lowercased.
    pub head: String,
    pub body: Vec<u8>,
}

#[allow(dead_code)]
impl MockReceiver {
    pub fn url(&self) -> String {
        format!("http://{}/events", self.addr)
    }

    pub fn count(&self) -> usize {
        self.received.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<ReceivedRequest> {
        self.received.lock().unwrap().clone()
    }
}

/// Start a receiver that answers every request with a fixed status.
#[allow(dead_code)]
pub async fn start_mock_receiver(status: u16) -> MockReceiver {
    start_programmable_receiver(move |_| async move { (status, "ok".to_string()) }).await
}

/// Start a programmable receiver; `f` sees the request body and picks the answer.
pub async fn start_programmable_receiver<F, Fut>(f: F) -> MockReceiver
where
    F: Fn(Vec<u8>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = (u16, String)> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let received = Arc::new(Mutex::new(Vec::new()));
    let log = received.clone();
    let f = Arc::new(f);

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let f = f.clone();
                    let log = log.clone();
                    tokio::spawn(async move {
                        let Ok(request) = read_request(&mut socket).await else {
                            return;
                        };
                        let body = request.body.clone();
                        log.lock().unwrap().push(request);

                        let (status, reply) = f(body).await;
                        let status_text = match status {
                            200 => "200 OK",
                            201 => "201 Created",
                            202 => "202 Accepted",
                            400 => "400 Bad Request",
                            404 => "404 Not Found",
                            429 => "429 Too Many Requests",
                            500 => "500 Internal Server Error",
                            502 => "502 Bad Gateway",
                            503 => "503 Service Unavailable",
                            _ => "200 OK",
                        };

                        let response_str = format!(
                            "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status_text,
                            reply.len(),
                            reply
                        );
                        let _ = socket.write_all(response_str.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    MockReceiver { addr, received }
}

/// Start a receiver that reads requests and never answers.
#[allow(dead_code)]
pub async fn start_stalled_receiver() -> MockReceiver {
    start_programmable_receiver(|_| async {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        (200, String::new())
    })
    .await
}

/// Read one HTTP/1.1 request with a Content-Length body.
async fn read_request(socket: &mut TcpStream) -> std::io::Result<ReceivedRequest> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    loop {
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            let head = String::from_utf8_lossy(&buf[..pos]).to_ascii_lowercase();
            let content_length = head
                .lines()
                .find_map(|line| line.strip_prefix("content-length:"))
                .and_then(|v| v.trim().parse::<usize>().ok())
                .unwrap_or(0);

            let body_start = pos + 4;
            while buf.len() < body_start + content_length {
                let n = socket.read(&mut chunk).await?;
                if n == 0 {
                    break;
                }
                buf.extend_from_slice(&chunk[..n]);
            }
            let body_end = buf.len().min(body_start + content_length);
            return Ok(ReceivedRequest {
                head,
                body: buf[body_start..body_end].to_vec(),
            });
        }

        let n = socket.read(&mut chunk).await?;
        if n == 0 {
            return Err(std::io::ErrorKind::UnexpectedEof.into());
        }
        buf.extend_from_slice(&chunk[..n]);
    }
}

/// Config pointing at `downstream_url`, with short timeouts for tests.
pub fn test_config(downstream_url: String) -> ServiceConfig {
    let mut config = ServiceConfig::default();
    config.listener.bind_address = "127.0.0.1:0".to_string();
    config.downstream.url = downstream_url;
    config.downstream.timeout_secs = 5;
    config.downstream.connect_timeout_secs = 1;
    config.dispatch.timeout_secs = 10;
    config
}

/// Start the relay on an ephemeral port. Keep the `Shutdown` alive for the test.
pub async fn start_relay(config: ServiceConfig) -> (SocketAddr, Shutdown) {
    let shutdown = Shutdown::new();
    let server = HttpServer::new(config).unwrap();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    (addr, shutdown)
}

pub fn http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}

/// The nine required scalar fields with placeholder values.
#[allow(dead_code)]
pub fn base_payload() -> serde_json::Map<String, serde_json::Value> {
    let serde_json::Value::Object(map) = serde_json::json!({
        "ev": "x", "et": "y", "id": "a", "uid": "b", "mid": "c",
        "t": "d", "p": "e", "l": "f", "sc": "g",
    }) else {
        unreachable!()
    };
    map
}
