//! Shared fixtures for router-level tests
//!
//! Builds the full HTTP router over an in-memory backend and offers a
//! counting store to observe which queries reach the backend.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use sheetdesk::auth::{AuthenticatedUser, SessionVerifier};
use sheetdesk::backend::{BackendFuture, MemoryBackend, RowStore};
use sheetdesk::http_server::{HttpServer, HttpServerConfig};
use sheetdesk::rest_api::SheetsState;
use sheetdesk::sheets::{DatasetHandle, QueryExecutor, Row, SearchQuery, SheetStats};

pub const GOOD_TOKEN: &str = "valid-session-token";

/// The two-row inventory sheet `S1`
pub fn inventory_rows() -> Vec<Row> {
    vec![
        Row::new().with("name", "bolt").with("qty", 5),
        Row::new().with("name", "nail").with("qty", 10),
    ]
}

/// A habits sheet with mixed value types
pub fn habit_rows() -> Vec<Row> {
    vec![
        Row::new().with("habit", "Morning run").with("streak", 12).with("done", true),
        Row::new().with("habit", "Read").with("streak", 3).with("done", false),
        Row::new().with("habit", "Evening run").with("streak", 3).with("done", true),
        Row::new().with("habit", "Stretch").with("streak", Value::Null).with("done", false),
    ]
}

pub fn seeded_backend() -> MemoryBackend {
    MemoryBackend::new()
        .with_sheet("S1", inventory_rows())
        .with_sheet("habits", habit_rows())
        .with_sheet("empty", Vec::new())
        .with_session(
            GOOD_TOKEN,
            AuthenticatedUser::new(Uuid::new_v4()).with_email("owner@example.com"),
        )
}

/// Row store wrapper counting every query issued
pub struct CountingStore {
    inner: MemoryBackend,
    queries: AtomicUsize,
}

impl CountingStore {
    pub fn new(inner: MemoryBackend) -> Self {
        Self {
            inner,
            queries: AtomicUsize::new(0),
        }
    }

    pub fn queries(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }
}

impl RowStore for CountingStore {
    fn search_rows<'a>(
        &'a self,
        dataset: &'a DatasetHandle,
        query: &'a SearchQuery,
    ) -> BackendFuture<'a, Vec<Row>> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        self.inner.search_rows(dataset, query)
    }

    fn aggregate<'a>(&'a self, dataset: &'a DatasetHandle) -> BackendFuture<'a, Option<SheetStats>> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        self.inner.aggregate(dataset)
    }
}

/// Full router with sessions from `sessions` and rows from `store`
pub fn router_with(sessions: Arc<MemoryBackend>, store: Arc<dyn RowStore>) -> Router {
    let state = SheetsState::new(SessionVerifier::new(sessions), QueryExecutor::new(store));
    HttpServer::new(HttpServerConfig::default(), Arc::new(state)).router()
}

/// Full router over the seeded backend
pub fn router() -> Router {
    let backend = Arc::new(seeded_backend());
    router_with(backend.clone(), backend)
}

pub fn search_request(sheet_id: &str, token: Option<&str>, body: &str) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(format!("/sheets/{}/search", sheet_id))
        .header("content-type", "application/json");
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub fn stats_request(sheet_id: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("GET")
        .uri(format!("/sheets/{}/stats", sheet_id));
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }
    builder.body(Body::empty()).unwrap()
}

/// Send a request and decode the JSON body
pub async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap();
    (status, body)
}
