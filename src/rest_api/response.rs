//! # Response Formatting
//!
//! Success envelopes for the sheet endpoints.

use serde::Serialize;

use crate::sheets::{Row, SearchResult, SheetStats};

/// Search success envelope
#[derive(Debug, Clone, Serialize)]
pub struct SearchResponse {
    pub success: bool,
    pub results: Vec<Row>,
    pub count: usize,
}

impl From<SearchResult> for SearchResponse {
    fn from(result: SearchResult) -> Self {
        Self {
            success: true,
            count: result.rows.len(),
            results: result.rows,
        }
    }
}

/// Stats success envelope
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    pub success: bool,
    pub stats: SheetStats,
}

impl From<SheetStats> for StatsResponse {
    fn from(stats: SheetStats) -> Self {
        Self {
            success: true,
            stats,
        }
    }
}
