//! In-process mock server for end-to-end tests.
//!
//! Runs an axum app on a random port in its own thread and runtime, so the
//! blocking client under test never shares a tokio runtime with it.

use std::io::{Read, Write};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, Method, StatusCode},
    routing::{any, get},
    Json, Router,
};
use serde_json::{json, Map, Value};

pub struct MockServer {
    addr: SocketAddr,
    hits: Arc<AtomicUsize>,
}

impl MockServer {
    pub fn start() -> Self {
        let hits = Arc::new(AtomicUsize::new(0));

        let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = std_listener.local_addr().unwrap();
        std_listener.set_nonblocking(true).unwrap();

        let app = app(hits.clone());
        std::thread::spawn(move || {
            let rt = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .unwrap();
            rt.block_on(async {
                let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
                axum::serve(listener, app).await
            })
            .unwrap();
        });

        Self { addr, hits }
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }

    /// Number of requests the server has seen
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

fn app(hits: Arc<AtomicUsize>) -> Router {
    Router::new()
        .route("/echo", any(echo))
        .route("/redirect", any(redirect))
        .route("/text", get(text))
        .with_state(hits)
}

/// Reflects method, headers and body back as JSON
async fn echo(
    State(hits): State<Arc<AtomicUsize>>,
    method: Method,
    headers: HeaderMap,
    body: Bytes,
) -> Json<Value> {
    hits.fetch_add(1, Ordering::SeqCst);

    let mut header_map = Map::new();
    for (name, value) in headers.iter() {
        header_map.insert(
            name.as_str().to_string(),
            Value::String(value.to_str().unwrap_or("").to_string()),
        );
    }

    Json(json!({
        "method": method.as_str(),
        "headers": header_map,
        "body": String::from_utf8_lossy(&body),
    }))
}

async fn redirect(
    State(hits): State<Arc<AtomicUsize>>,
) -> (StatusCode, [(header::HeaderName, &'static str); 1]) {
    hits.fetch_add(1, Ordering::SeqCst);
    (StatusCode::FOUND, [(header::LOCATION, "/echo")])
}

async fn text(State(hits): State<Arc<AtomicUsize>>) -> &'static str {
    hits.fetch_add(1, Ordering::SeqCst);
    "not json"
}

/// Serve `response` verbatim to the first connection, then close it.
///
/// For responses axum will not produce: truncated bodies, custom reason phrases.
#[allow(dead_code)]
pub fn canned_response(response: &'static [u8]) -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    std::thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            match stream.read(&mut buf) {
                Ok(0) | Err(_) => break,
                Ok(n) => request.extend_from_slice(&buf[..n]),
            }
        }
        let _ = stream.write_all(response);
    });

    format!("http://{addr}/")
}

/// Split rendered output into (head, body)
#[allow(dead_code)]
pub fn split_output(output: &[u8]) -> (String, String) {
    let text = String::from_utf8(output.to_vec()).unwrap();
    let (head, body) = text.split_once("\n\n").unwrap();
    (head.to_string(), body.to_string())
}
