//! Stub peer service.
//!
//! Serves `GET /{id}` from a programmable table so lookup clients can be tested
//! against real HTTP without the peer running. Unknown ids answer 404.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde_json::Value;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Canned answer for one id.
#[derive(Debug, Clone)]
pub enum StubResponse {
    /// 200 with the given JSON body.
    Json(Value),
    /// Bare status with an empty body.
    Status(u16),
    /// 200 with the given body, sent only after the delay.
    Delayed(Duration, Value),
}

#[derive(Clone)]
struct StubState {
    responses: Arc<HashMap<i32, StubResponse>>,
    hits: Arc<AtomicUsize>,
}

/// Running stub server. Shuts down when dropped.
pub struct StubPeer {
    addr: SocketAddr,
    hits: Arc<AtomicUsize>,
    handle: JoinHandle<()>,
}

impl StubPeer {
    /// Bind to an ephemeral localhost port and start serving.
    pub async fn spawn(responses: HashMap<i32, StubResponse>) -> Self {
        let hits = Arc::new(AtomicUsize::new(0));
        let state = StubState {
            responses: Arc::new(responses),
            hits: Arc::clone(&hits),
        };
        let router = Router::new()
            .route("/{id}", get(answer))
            .with_state(state);

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind stub peer");
        let addr = listener.local_addr().expect("stub peer address");
        let handle = tokio::spawn(async move {
            let _ = axum::serve(listener, router).await;
        });
        Self { addr, hits, handle }
    }

    /// Base URL to configure a lookup client with, e.g. `http://127.0.0.1:40123`.
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Number of requests served so far.
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

impl Drop for StubPeer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn answer(State(state): State<StubState>, Path(id): Path<i32>) -> Response {
    state.hits.fetch_add(1, Ordering::SeqCst);
    match state.responses.get(&id) {
        Some(StubResponse::Json(body)) => Json(body.clone()).into_response(),
        Some(StubResponse::Status(code)) => StatusCode::from_u16(*code)
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            .into_response(),
        Some(StubResponse::Delayed(delay, body)) => {
            tokio::time::sleep(*delay).await;
            Json(body.clone()).into_response()
        }
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

/// Body a user service would return for `id`.
pub fn user_body(id: i32) -> Value {
    serde_json::json!({
        "userId": id,
        "firstName": "John",
        "lastName": "Doe",
        "email": "john.doe@example.com",
    })
}

/// Body a product service would return for `id`.
pub fn product_body(id: i32) -> Value {
    serde_json::json!({
        "productId": id,
        "productTitle": "Test Product",
        "priceUnit": 99.99,
    })
}
