//! Scripted local HTTP server for integration tests.
//!
//! Each route is a path suffix plus a queue of canned replies. Replies are
//! served in order; the last one repeats. Unrouted paths get a 404.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use coinfolio::client::MarketDataClient;
use coinfolio::http::RetryConfig;
use coinfolio::store::LocalStore;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

#[derive(Debug, Clone)]
pub struct Reply {
    pub status: u16,
    pub body: String,
    /// Read the request, then never answer.
    pub hang: bool,
}

impl Reply {
    pub fn json(body: &str) -> Self {
        Self {
            status: 200,
            body: body.to_string(),
            hang: false,
        }
    }

    pub fn status(status: u16) -> Self {
        Self {
            status,
            body: format!(r#"{{"error":"status {status}"}}"#),
            hang: false,
        }
    }

    pub fn hang() -> Self {
        Self {
            status: 200,
            body: String::new(),
            hang: true,
        }
    }
}

/// One request as seen by the server.
#[derive(Debug, Clone)]
pub struct Recorded {
    /// Path plus query string.
    pub target: String,
    /// Raw request head, header lines included.
    pub head: String,
    /// When the head was fully read.
    pub at: Instant,
}

struct Route {
    suffix: String,
    replies: VecDeque<Reply>,
}

#[derive(Default)]
struct State {
    routes: Vec<Route>,
    requests: Vec<Recorded>,
}

impl State {
    fn next_reply(&mut self, target: &str) -> Reply {
        let path = target.split('?').next().unwrap_or(target);
        let Some(route) = self.routes.iter_mut().find(|r| path.ends_with(&r.suffix)) else {
            return Reply::status(404);
        };
        if route.replies.len() > 1 {
            route.replies.pop_front().unwrap()
        } else {
            route.replies.front().cloned().unwrap_or_else(|| Reply::status(404))
        }
    }
}

pub struct MockServer {
    addr: SocketAddr,
    state: Arc<Mutex<State>>,
    task: JoinHandle<()>,
}

impl MockServer {
    pub async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let state = Arc::new(Mutex::new(State::default()));

        let task_state = Arc::clone(&state);
        let task = tokio::spawn(async move {
            while let Ok((socket, _)) = listener.accept().await {
                let state = Arc::clone(&task_state);
                tokio::spawn(async move {
                    let _ = serve(socket, state).await;
                });
            }
        });

        Self { addr, state, task }
    }

    /// Script replies for every path ending in `suffix`.
    pub fn route(&self, suffix: &str, replies: Vec<Reply>) -> &Self {
        self.state.lock().unwrap().routes.push(Route {
            suffix: suffix.to_string(),
            replies: replies.into(),
        });
        self
    }

    pub fn base_url(&self) -> String {
        format!("http://{}/api/v3", self.addr)
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.state.lock().unwrap().requests.clone()
    }

    /// Requests whose path ends in `suffix`.
    pub fn hits(&self, suffix: &str) -> usize {
        self.requests()
            .iter()
            .filter(|r| r.target.split('?').next().unwrap_or("").ends_with(suffix))
            .count()
    }

    /// Gaps between consecutive requests, in arrival order.
    pub fn gaps(&self) -> Vec<Duration> {
        self.requests()
            .windows(2)
            .map(|pair| pair[1].at.duration_since(pair[0].at))
            .collect()
    }
}

impl Drop for MockServer {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn serve(mut socket: TcpStream, state: Arc<Mutex<State>>) -> std::io::Result<()> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        let n = socket.read(&mut chunk).await?;
        if n == 0 {
            return Ok(());
        }
        buf.extend_from_slice(&chunk[..n]);
        if buf.windows(4).any(|w| w == b"\r\n\r\n") {
            break;
        }
    }

    let head = String::from_utf8_lossy(&buf).into_owned();
    let target = head.split_whitespace().nth(1).unwrap_or("/").to_string();
    let reply = {
        let mut state = state.lock().unwrap();
        state.requests.push(Recorded {
            target: target.clone(),
            head,
            at: Instant::now(),
        });
        state.next_reply(&target)
    };

    if reply.hang {
        std::future::pending::<()>().await;
    }

    let response = format!(
        "HTTP/1.1 {} Scripted\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        reply.status,
        reply.body.len(),
        reply.body
    );
    socket.write_all(response.as_bytes()).await?;
    socket.shutdown().await
}

// ─── Fixtures ────────────────────────────────────────────────────────────────

pub const COINS_LIST: &str = r#"[
    {"id": "bitcoin", "symbol": "btc", "name": "Bitcoin"},
    {"id": "ethereum", "symbol": "eth", "name": "Ethereum"},
    {"id": "ethereum-classic", "symbol": "etc", "name": "Ethereum Classic"},
    {"id": "tether", "symbol": "usdt", "name": "Tether"}
]"#;

pub const MARKETS: &str = r#"[
    {"id": "bitcoin", "symbol": "btc", "name": "Bitcoin", "current_price": 50000.0,
     "market_cap": 1.0e12, "total_volume": 3.0e10, "high_24h": 51000.0, "low_24h": 49000.0,
     "price_change_percentage_24h": 2.0, "image": "https://img/btc.png"},
    {"id": "ethereum", "symbol": "eth", "name": "Ethereum", "current_price": 3000.0,
     "price_change_percentage_24h": -1.0}
]"#;

pub const MARKET_CHART: &str = r#"{
    "prices": [[1700000000000, 100.0], [1700000060000, 101.5], [1700000120000, 99.25]],
    "market_caps": [],
    "total_volumes": []
}"#;

pub const TRENDING: &str = r#"{
    "coins": [
        {"item": {"id": "pepe", "symbol": "PEPE", "name": "Pepe", "market_cap_rank": 40, "thumb": "https://img/pepe.png"}},
        {"item": {"id": "bonk", "symbol": "BONK", "name": "Bonk"}}
    ]
}"#;

/// Client against `server` with the given spacing and fast retries.
pub fn client_for(server: &MockServer, spacing: Duration) -> MarketDataClient {
    client_with(server, spacing, fast_retry(), LocalStore::in_memory())
}

pub fn client_with(
    server: &MockServer,
    spacing: Duration,
    retry: RetryConfig,
    store: LocalStore,
) -> MarketDataClient {
    MarketDataClient::builder()
        .base_url(&server.base_url())
        .request_spacing(spacing)
        .request_timeout(Duration::from_secs(5))
        .retry(retry)
        .store(store)
        .build()
        .unwrap()
}

pub fn fast_retry() -> RetryConfig {
    RetryConfig::with_delays(Duration::from_millis(20), Duration::from_millis(100))
}
