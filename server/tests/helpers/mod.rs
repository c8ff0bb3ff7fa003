//! Reusable test helpers for HTTP integration tests.
//!
//! Provides `TestApp` for building and sending requests through the full axum router,
//! plus a `WebhookRecorder` that captures the callbacks the mock posts.
//!
//! ## Test Servers
//!
//! Use [`spawn_test_server()`] when a test needs a real listening address
//! instead of `tower::ServiceExt::oneshot`.
#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::extract::State;
use axum::http::{self, HeaderMap, Method, Request, Response, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use http_body_util::BodyExt;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tower::ServiceExt;
use wamock_server::api::{create_router, AppState};
use wamock_server::config::Config;

// ============================================================================
// Test App
// ============================================================================

/// A test application wrapping the full axum router.
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
}

impl TestApp {
    /// Create a new test app with default settings and a short webhook delay.
    pub fn new() -> Self {
        Self::with_config(Config::default_for_test())
    }

    /// Create a test app with a custom config.
    pub fn with_config(config: Config) -> Self {
        let state = AppState::from_config(&config).expect("Failed to build app state");
        let router = create_router(state.clone());
        Self { router, state }
    }

    /// Build an HTTP request with the given method and URI.
    pub fn request(method: Method, uri: &str) -> http::request::Builder {
        Request::builder().method(method).uri(uri)
    }

    /// Send a request through the router via `tower::ServiceExt::oneshot`.
    pub async fn oneshot(&self, request: Request<Body>) -> Response<Body> {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("oneshot request failed")
    }

    /// POST a JSON body and return the response.
    pub async fn post_json(&self, uri: &str, body: &serde_json::Value) -> Response<Body> {
        let req = Self::request(Method::POST, uri)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.oneshot(req).await
    }

    /// GET a path and return the response.
    pub async fn get(&self, uri: &str) -> Response<Body> {
        let req = Self::request(Method::GET, uri).body(Body::empty()).unwrap();
        self.oneshot(req).await
    }

    /// Update the simulation settings, asserting success.
    pub async fn configure(&self, update: serde_json::Value) -> serde_json::Value {
        let resp = self.post_json("/mock", &update).await;
        assert_eq!(resp.status(), StatusCode::OK, "mock update rejected");
        body_to_json(resp).await
    }
}

/// Parse a response body as JSON.
pub async fn body_to_json(response: Response<Body>) -> serde_json::Value {
    let bytes = body_bytes(response).await;
    serde_json::from_slice(&bytes).unwrap_or_else(|e| {
        let preview = String::from_utf8_lossy(&bytes);
        panic!("Failed to parse response as JSON: {e}\nBody: {preview}")
    })
}

/// Collect a response body.
pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .expect("Failed to collect response body")
        .to_bytes()
        .to_vec()
}

/// A text message request body.
pub fn text_message(to: &str, body: &str) -> serde_json::Value {
    serde_json::json!({
        "recipient_type": "individual",
        "to": to,
        "type": "text",
        "text": { "body": body }
    })
}

// ============================================================================
// Test Server
// ============================================================================

/// A running test server bound to a random port.
pub struct TestServer {
    /// Server address (127.0.0.1:PORT).
    pub addr: SocketAddr,
    /// Base URL for HTTP requests (e.g., `http://127.0.0.1:12345`).
    pub url: String,
    /// Handle to the server task for cleanup.
    _handle: JoinHandle<()>,
}

/// Spawn a real HTTP server on a random port.
pub async fn spawn_test_server(router: Router) -> TestServer {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test server");
    let addr = listener.local_addr().expect("Failed to get local addr");
    let url = format!("http://{addr}");

    let handle = tokio::spawn(async move {
        axum::serve(listener, router)
            .await
            .expect("Test server failed");
    });

    TestServer {
        addr,
        url,
        _handle: handle,
    }
}

// ============================================================================
// Webhook Recorder
// ============================================================================

/// A webhook call captured by the recorder.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub headers: HashMap<String, String>,
    pub body: serde_json::Value,
}

/// A webhook receiver that records every POST it gets.
pub struct WebhookRecorder {
    pub server: TestServer,
    calls: Mutex<mpsc::UnboundedReceiver<RecordedCall>>,
}

#[derive(Clone)]
struct RecorderState {
    tx: mpsc::UnboundedSender<RecordedCall>,
    status: StatusCode,
}

async fn record(
    State(recorder): State<RecorderState>,
    headers: HeaderMap,
    Json(body): Json<serde_json::Value>,
) -> StatusCode {
    let headers = headers
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|v| (name.as_str().to_string(), v.to_string()))
        })
        .collect();
    let _ = recorder.tx.send(RecordedCall { headers, body });
    recorder.status
}

impl WebhookRecorder {
    /// Start a recorder on a random port that answers `200 OK`.
    pub async fn start() -> Self {
        Self::with_status(StatusCode::OK).await
    }

    /// Start a recorder that answers every call with `status`.
    pub async fn with_status(status: StatusCode) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let router = Router::new()
            .route("/hook", post(record))
            .with_state(RecorderState { tx, status });
        let server = spawn_test_server(router).await;
        Self {
            server,
            calls: Mutex::new(rx),
        }
    }

    /// URL to configure as the webhook.
    pub fn url(&self) -> String {
        format!("{}/hook", self.server.url)
    }

    /// Wait for exactly `count` calls, panicking if they do not arrive in time.
    pub async fn expect_calls(&self, count: usize, timeout: Duration) -> Vec<RecordedCall> {
        let mut rx = self.calls.lock().await;
        let mut calls = Vec::with_capacity(count);
        while calls.len() < count {
            match tokio::time::timeout(timeout, rx.recv()).await {
                Ok(Some(call)) => calls.push(call),
                Ok(None) => panic!("Webhook recorder closed"),
                Err(_) => panic!(
                    "Expected {count} webhook calls, got {} within {timeout:?}",
                    calls.len()
                ),
            }
        }
        calls
    }

    /// Assert that no further call arrives within `window`.
    pub async fn expect_silence(&self, window: Duration) {
        let mut rx = self.calls.lock().await;
        if let Ok(Some(call)) = tokio::time::timeout(window, rx.recv()).await {
            panic!("Unexpected webhook call: {:?}", call.body);
        }
    }
}

// ============================================================================
// Dropping Listener
// ============================================================================

/// A TCP listener that closes every connection as soon as it is accepted.
pub struct DroppingListener {
    pub addr: SocketAddr,
    accepted: Arc<AtomicUsize>,
    _handle: JoinHandle<()>,
}

impl DroppingListener {
    /// Start on a random port.
    pub async fn start() -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind dropping listener");
        let addr = listener.local_addr().expect("Failed to get local addr");
        let accepted = Arc::new(AtomicUsize::new(0));

        let counter = accepted.clone();
        let handle = tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                counter.fetch_add(1, Ordering::SeqCst);
                drop(stream);
            }
        });

        Self {
            addr,
            accepted,
            _handle: handle,
        }
    }

    /// URL to configure as the webhook.
    pub fn url(&self) -> String {
        format!("http://{}/hook", self.addr)
    }

    /// Connections accepted so far.
    pub fn accepted(&self) -> usize {
        self.accepted.load(Ordering::SeqCst)
    }
}
