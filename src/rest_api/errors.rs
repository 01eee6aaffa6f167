//! # REST API Errors
//!
//! Maps every [`SheetError`] to exactly one status code and envelope.
//! The endpoint decides the wording of the failure message.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::sheets::SheetError;

/// Result type for REST handlers
pub type RestResult<T> = Result<T, ApiError>;

/// Which endpoint produced a failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Search,
    Stats,
}

impl Endpoint {
    fn failure_message(self) -> &'static str {
        match self {
            Endpoint::Search => "Failed to search",
            Endpoint::Stats => "Failed to get stats",
        }
    }

    fn not_found_message(self) -> &'static str {
        match self {
            Endpoint::Search => "Not found",
            Endpoint::Stats => "Stats not found",
        }
    }
}

/// A sheet error tagged with the endpoint it surfaced from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub endpoint: Endpoint,
    pub error: SheetError,
}

impl ApiError {
    pub fn new(endpoint: Endpoint, error: SheetError) -> Self {
        Self { endpoint, error }
    }

    pub fn search(error: SheetError) -> Self {
        Self::new(Endpoint::Search, error)
    }

    pub fn stats(error: SheetError) -> Self {
        Self::new(Endpoint::Stats, error)
    }

    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self.error {
            SheetError::Unauthenticated => StatusCode::UNAUTHORIZED,
            SheetError::NotFound => StatusCode::NOT_FOUND,
            SheetError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Failure envelope
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorResponse {
    pub error: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl From<&ApiError> for ErrorResponse {
    fn from(err: &ApiError) -> Self {
        let error = match err.error {
            SheetError::Unauthenticated => SheetError::Unauthenticated.to_string(),
            SheetError::NotFound => err.endpoint.not_found_message().to_string(),
            SheetError::Internal(_) => err.endpoint.failure_message().to_string(),
        };

        Self {
            error,
            details: err.error.details().map(str::to_string),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(ErrorResponse::from(&self));
        (status, body).into_response()
    }
}
