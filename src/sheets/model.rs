//! # Sheet Data Model
//!
//! Rows, search queries and aggregate summaries exchanged between the
//! REST layer, the query executor and the row store.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single sheet row: column name to scalar value, in store order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row(Map<String, Value>);

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style column setter
    pub fn with(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(column.into(), value.into());
        self
    }

    pub fn get(&self, column: &str) -> Option<&Value> {
        self.0.get(column)
    }

    pub fn columns(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.0.values()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Map<String, Value>> for Row {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl TryFrom<Value> for Row {
    type Error = String;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(format!("row must be a JSON object, got {}", kind_of(&other))),
        }
    }
}

/// Column constraints: column name to expected value
pub type ColumnFilters = BTreeMap<String, String>;

/// Free-text term plus column constraints, combined with AND
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub search_term: String,

    #[serde(default)]
    pub column_filters: ColumnFilters,
}

impl SearchQuery {
    /// Query matching every row
    pub fn all() -> Self {
        Self::default()
    }

    pub fn term(term: impl Into<String>) -> Self {
        Self {
            search_term: term.into(),
            column_filters: ColumnFilters::new(),
        }
    }

    pub fn with_filter(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
        self.column_filters.insert(column.into(), value.into());
        self
    }

    /// The search term with surrounding whitespace removed, if any remains
    pub fn effective_term(&self) -> Option<&str> {
        let term = self.search_term.trim();
        (!term.is_empty()).then_some(term)
    }

    /// Column filters that actually constrain results
    pub fn effective_filters(&self) -> impl Iterator<Item = (&String, &String)> {
        self.column_filters.iter().filter(|(_, v)| !v.is_empty())
    }

    pub fn is_unconstrained(&self) -> bool {
        self.effective_term().is_none() && self.effective_filters().next().is_none()
    }
}

/// Ordered search hits with their count
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResult {
    pub rows: Vec<Row>,
    pub count: usize,
}

impl SearchResult {
    pub fn new(rows: Vec<Row>) -> Self {
        let count = rows.len();
        Self { rows, count }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }
}

/// Per-column aggregate
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ColumnStats {
    /// Rows with a non-null value in this column
    pub non_null: usize,

    /// Rows where the column is null or missing
    pub null_count: usize,

    /// Values that are numbers or numeric strings
    pub numeric_count: usize,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sum: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub mean: Option<f64>,

    /// Distinct non-null values, compared as text
    pub distinct: usize,
}

/// Aggregate summary over every row of a sheet
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SheetStats {
    pub row_count: usize,
    pub column_count: usize,
    pub columns: BTreeMap<String, ColumnStats>,
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
