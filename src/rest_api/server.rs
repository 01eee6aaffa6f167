//! # Sheet Routes
//!
//! Axum handlers for the two read-only sheet endpoints. Each request runs
//! session verification, sheet resolution and the query in that order;
//! a failed verification stops the request before any query is issued.
//! Path and body extraction never reject on their own: their failures
//! surface after verification, through the endpoint's failure envelope.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{
        rejection::{BytesRejection, PathRejection},
        Path, State,
    },
    http::HeaderMap,
    routing::{get, post},
    Json, Router,
};

use crate::auth::SessionVerifier;
use crate::sheets::{resolve, DatasetHandle, QueryExecutor, SheetError, SheetResult};

use super::errors::{ApiError, RestResult};
use super::parser::SearchRequest;
use super::response::{SearchResponse, StatsResponse};

/// Injected services shared by the sheet handlers
#[derive(Clone)]
pub struct SheetsState {
    pub verifier: SessionVerifier,
    pub executor: QueryExecutor,
}

impl SheetsState {
    pub fn new(verifier: SessionVerifier, executor: QueryExecutor) -> Self {
        Self { verifier, executor }
    }
}

/// Create sheet routes
pub fn sheet_routes(state: Arc<SheetsState>) -> Router {
    Router::new()
        .route("/sheets/:id/search", post(search_handler))
        .route("/sheets/:id/stats", get(stats_handler))
        .with_state(state)
}

/// Resolve the sheet named by the path segment. An undecodable segment
/// is an internal error, never an extractor rejection.
fn dataset_from_path(path: Result<Path<String>, PathRejection>) -> SheetResult<DatasetHandle> {
    let Path(sheet_id) = path.map_err(|e| SheetError::internal(e.body_text()))?;
    resolve(&sheet_id)
}

/// Search handler
async fn search_handler(
    State(state): State<Arc<SheetsState>>,
    path: Result<Path<String>, PathRejection>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> RestResult<Json<SearchResponse>> {
    let user = state.verifier.verify(&headers).await.map_err(ApiError::search)?;
    let dataset = dataset_from_path(path).map_err(ApiError::search)?;
    let body = body
        .map_err(|e| SheetError::internal(e.body_text()))
        .map_err(ApiError::search)?;
    let query = SearchRequest::parse(&body).map_err(ApiError::search)?;

    tracing::debug!(user = %user.id, sheet = %dataset, "sheet search");
    let result = state
        .executor
        .search(&dataset, &query)
        .await
        .map_err(ApiError::search)?;

    Ok(Json(SearchResponse::from(result)))
}

/// Stats handler
async fn stats_handler(
    State(state): State<Arc<SheetsState>>,
    path: Result<Path<String>, PathRejection>,
    headers: HeaderMap,
) -> RestResult<Json<StatsResponse>> {
    let user = state.verifier.verify(&headers).await.map_err(ApiError::stats)?;
    let dataset = dataset_from_path(path).map_err(ApiError::stats)?;

    tracing::debug!(user = %user.id, sheet = %dataset, "sheet stats");
    let stats = state
        .executor
        .compute_stats(&dataset)
        .await
        .map_err(ApiError::stats)?;

    Ok(Json(StatsResponse::from(stats)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MemoryBackend;

    #[test]
    fn test_router_builds() {
        let backend = Arc::new(MemoryBackend::new());
        let state = SheetsState::new(
            SessionVerifier::new(backend.clone()),
            QueryExecutor::new(backend),
        );
        let _router = sheet_routes(Arc::new(state));
    }
}
