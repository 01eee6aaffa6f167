//! # Search Request Parsing
//!
//! Turns the raw search body into a [`SearchQuery`]. Parsing failures are
//! reported as internal errors so they share the endpoint's failure
//! envelope instead of a framework rejection.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;

use crate::sheets::filter::value_text;
use crate::sheets::{ColumnFilters, SearchQuery, SheetError, SheetResult};

/// Wire shape of `POST /sheets/:id/search`
#[derive(Debug, Default, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub search_term: Option<String>,

    #[serde(default)]
    pub column_filters: Option<BTreeMap<String, Value>>,
}

impl SearchRequest {
    /// Parse a request body. An empty body means "match everything".
    pub fn parse(body: &[u8]) -> SheetResult<SearchQuery> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(SearchQuery::all());
        }

        let request: SearchRequest = serde_json::from_slice(body)
            .map_err(|e| SheetError::internal(format!("invalid search body: {}", e)))?;
        request.into_query()
    }

    /// Normalize filter values to text. Null values impose no constraint.
    pub fn into_query(self) -> SheetResult<SearchQuery> {
        let mut column_filters = ColumnFilters::new();
        for (column, value) in self.column_filters.unwrap_or_default() {
            match value {
                Value::Null => {}
                Value::Array(_) | Value::Object(_) => {
                    return Err(SheetError::internal(format!(
                        "filter for column '{}' must be a scalar",
                        column
                    )))
                }
                scalar => {
                    if let Some(text) = value_text(&scalar) {
                        column_filters.insert(column, text);
                    }
                }
            }
        }

        Ok(SearchQuery {
            search_term: self.search_term.unwrap_or_default(),
            column_filters,
        })
    }
}
