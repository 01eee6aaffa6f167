//! # Sheet Identity Resolution
//!
//! Maps the opaque sheet id from a request path to the handle queries
//! are issued against. Existence is not checked here; the first query
//! against the handle discovers it.

use std::fmt;

use serde::Serialize;

use super::errors::{SheetError, SheetResult};

/// Resolved reference to a sheet's row set
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct DatasetHandle {
    sheet_id: String,
}

impl DatasetHandle {
    pub fn sheet_id(&self) -> &str {
        &self.sheet_id
    }
}

impl fmt::Display for DatasetHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.sheet_id)
    }
}

/// Resolve a sheet id. Any non-empty string is accepted as-is.
pub fn resolve(sheet_id: &str) -> SheetResult<DatasetHandle> {
    if sheet_id.is_empty() {
        return Err(SheetError::internal("sheet id must not be empty"));
    }
    Ok(DatasetHandle {
        sheet_id: sheet_id.to_string(),
    })
}
