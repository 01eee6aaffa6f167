//! # Row Filters
//!
//! Filter expressions evaluated against rows by stores that filter
//! in-process. A [`RowFilter`] combines every expression with AND.

use serde_json::Value;

use super::model::{Row, SearchQuery};

/// A single row predicate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterExpr {
    /// Any column's text contains the term (case-insensitive)
    Contains {
        /// Lowercased term
        term: String,
    },

    /// The named column's text equals the value (case-insensitive)
    ColumnEq {
        column: String,
        /// Lowercased expected value
        value: String,
    },
}

impl FilterExpr {
    pub fn contains(term: &str) -> Self {
        Self::Contains {
            term: term.to_lowercase(),
        }
    }

    pub fn column_eq(column: impl Into<String>, value: &str) -> Self {
        Self::ColumnEq {
            column: column.into(),
            value: value.to_lowercase(),
        }
    }

    /// Check if a row matches this filter
    pub fn matches(&self, row: &Row) -> bool {
        match self {
            FilterExpr::Contains { term } => row
                .values()
                .filter_map(value_text)
                .any(|text| text.to_lowercase().contains(term.as_str())),
            FilterExpr::ColumnEq { column, value } => row
                .get(column)
                .and_then(value_text)
                .map(|text| text.to_lowercase() == *value)
                .unwrap_or(false),
        }
    }
}

/// Render a cell as the text filters compare against.
///
/// Null has no text and never matches.
pub fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        other => Some(other.to_string()),
    }
}

/// A set of filters combined with AND logic
#[derive(Debug, Clone, Default)]
pub struct RowFilter {
    pub filters: Vec<FilterExpr>,
}

impl RowFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn and(mut self, filter: FilterExpr) -> Self {
        self.filters.push(filter);
        self
    }

    /// Build the filter for a search query.
    ///
    /// An empty term and empty-valued column filters contribute nothing.
    pub fn from_query(query: &SearchQuery) -> Self {
        let mut filter = Self::new();
        if let Some(term) = query.effective_term() {
            filter = filter.and(FilterExpr::contains(term));
        }
        for (column, value) in query.effective_filters() {
            filter = filter.and(FilterExpr::column_eq(column.clone(), value));
        }
        filter
    }

    /// Check if a row matches all filters
    pub fn matches(&self, row: &Row) -> bool {
        self.filters.iter().all(|f| f.matches(row))
    }

    /// Keep matching rows, preserving their order
    pub fn apply<'a>(&self, rows: impl IntoIterator<Item = &'a Row>) -> Vec<Row> {
        rows.into_iter().filter(|r| self.matches(r)).cloned().collect()
    }
}
