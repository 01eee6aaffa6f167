//! # Backend Providers
//!
//! The row-query contract consumed by the query executor, plus the
//! concrete backends: an in-process store for tests and local
//! development, and a client for a remote PostgREST-style service.

pub mod memory;
pub mod rest;

use std::future::Future;
use std::pin::Pin;

use thiserror::Error;

use crate::sheets::{DatasetHandle, Row, SearchQuery, SheetStats};

pub use memory::{MemoryBackend, MemorySeed};
pub use rest::{RestBackend, RestBackendConfig};

/// Result type for backend calls
pub type BackendResult<T> = Result<T, BackendError>;

/// Boxed future returned by backend calls
pub type BackendFuture<'a, T> = Pin<Box<dyn Future<Output = BackendResult<T>> + Send + 'a>>;

/// Transport, decoding and upstream failures
#[derive(Debug, Error)]
pub enum BackendError {
    /// HTTP transport error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Upstream returned a non-success status
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Upstream payload did not have the expected shape
    #[error("decode error: {0}")]
    Decode(String),

    /// Local seed data could not be loaded
    #[error("seed error: {0}")]
    Seed(String),
}

/// Row-query provider: search and aggregate over a named dataset.
///
/// Implementations must not mutate rows. An unknown dataset is not an
/// error: `search_rows` yields no rows and `aggregate` yields `None`.
pub trait RowStore: Send + Sync {
    /// Rows matching the query, in store order
    fn search_rows<'a>(
        &'a self,
        dataset: &'a DatasetHandle,
        query: &'a SearchQuery,
    ) -> BackendFuture<'a, Vec<Row>>;

    /// Aggregate over every row, `None` when there is nothing to aggregate
    fn aggregate<'a>(&'a self, dataset: &'a DatasetHandle) -> BackendFuture<'a, Option<SheetStats>>;
}
