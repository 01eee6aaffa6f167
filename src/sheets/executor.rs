//! # Query Executor
//!
//! Issues search and aggregate requests against the injected row store
//! and normalizes the outcome. Pure read: nothing here mutates rows.

use std::sync::Arc;

use crate::backend::RowStore;

use super::errors::{SheetError, SheetResult};
use super::model::{SearchQuery, SearchResult, SheetStats};
use super::resolver::DatasetHandle;

/// Executes sheet queries against a row store
#[derive(Clone)]
pub struct QueryExecutor {
    store: Arc<dyn RowStore>,
}

impl QueryExecutor {
    pub fn new(store: Arc<dyn RowStore>) -> Self {
        Self { store }
    }

    /// Rows matching the term and every column filter, in store order.
    ///
    /// An unknown sheet yields an empty result, not an error.
    pub async fn search(
        &self,
        dataset: &DatasetHandle,
        query: &SearchQuery,
    ) -> SheetResult<SearchResult> {
        let rows = self.store.search_rows(dataset, query).await.map_err(|e| {
            tracing::error!(sheet = %dataset, error = %e, "search query failed");
            SheetError::from(e)
        })?;

        tracing::debug!(
            sheet = %dataset,
            term = query.search_term.as_str(),
            filters = query.column_filters.len(),
            hits = rows.len(),
            "search completed"
        );
        Ok(SearchResult::new(rows))
    }

    /// Aggregate over every row of the sheet.
    ///
    /// Absent and empty sheets both yield [`SheetError::NotFound`].
    pub async fn compute_stats(&self, dataset: &DatasetHandle) -> SheetResult<SheetStats> {
        let stats = self.store.aggregate(dataset).await.map_err(|e| {
            tracing::error!(sheet = %dataset, error = %e, "stats query failed");
            SheetError::from(e)
        })?;

        match stats {
            Some(stats) if stats.row_count > 0 => Ok(stats),
            _ => {
                tracing::debug!(sheet = %dataset, "no stats for sheet");
                Err(SheetError::NotFound)
            }
        }
    }
}
