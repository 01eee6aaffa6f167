//! # In-Memory Backend
//!
//! Row store and session table held in process. Seeded once at
//! construction and read-only afterwards, so it needs no locking.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{BackendError, BackendFuture, BackendResult, RowStore};
use crate::auth::{AuthError, AuthenticatedUser, SessionFuture, SessionProvider};
use crate::sheets::{stats, DatasetHandle, Row, RowFilter, SearchQuery, SheetStats};

/// Seed file layout
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemorySeed {
    /// Sheet id to rows, in store order
    #[serde(default)]
    pub sheets: HashMap<String, Vec<Row>>,

    /// Access token to user
    #[serde(default)]
    pub sessions: HashMap<String, AuthenticatedUser>,
}

impl MemorySeed {
    /// Load a seed from a JSON file
    pub fn load(path: &Path) -> BackendResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            BackendError::Seed(format!("failed to read {}: {}", path.display(), e))
        })?;
        serde_json::from_str(&content)
            .map_err(|e| BackendError::Seed(format!("invalid seed JSON in {}: {}", path.display(), e)))
    }
}

/// In-process backend for tests and local development
#[derive(Debug, Default)]
pub struct MemoryBackend {
    sheets: HashMap<String, Vec<Row>>,
    sessions: HashMap<String, AuthenticatedUser>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_seed(seed: MemorySeed) -> Self {
        Self {
            sheets: seed.sheets,
            sessions: seed.sessions,
        }
    }

    pub fn with_sheet(mut self, sheet_id: impl Into<String>, rows: Vec<Row>) -> Self {
        self.sheets.insert(sheet_id.into(), rows);
        self
    }

    pub fn with_session(mut self, token: impl Into<String>, user: AuthenticatedUser) -> Self {
        self.sessions.insert(token.into(), user);
        self
    }

    pub fn sheet_count(&self) -> usize {
        self.sheets.len()
    }

    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    fn rows(&self, dataset: &DatasetHandle) -> &[Row] {
        self.sheets
            .get(dataset.sheet_id())
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

impl RowStore for MemoryBackend {
    fn search_rows<'a>(
        &'a self,
        dataset: &'a DatasetHandle,
        query: &'a SearchQuery,
    ) -> BackendFuture<'a, Vec<Row>> {
        Box::pin(async move {
            let filter = RowFilter::from_query(query);
            Ok(filter.apply(self.rows(dataset)))
        })
    }

    fn aggregate<'a>(&'a self, dataset: &'a DatasetHandle) -> BackendFuture<'a, Option<SheetStats>> {
        Box::pin(async move { Ok(stats::compute(self.rows(dataset))) })
    }
}

impl SessionProvider for MemoryBackend {
    fn get_user<'a>(&'a self, token: &'a str) -> SessionFuture<'a> {
        Box::pin(async move {
            self.sessions
                .get(token)
                .cloned()
                .ok_or(AuthError::SessionInvalid)
        })
    }
}
