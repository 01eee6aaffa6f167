//! # Sheet Queries
//!
//! Resolution of sheet ids, the search/stats executor, and the row
//! filtering and aggregation used by in-process stores.

pub mod errors;
pub mod executor;
pub mod filter;
pub mod model;
pub mod resolver;
pub mod stats;

pub use errors::{SheetError, SheetResult};
pub use executor::QueryExecutor;
pub use filter::{FilterExpr, RowFilter};
pub use model::{ColumnFilters, ColumnStats, Row, SearchQuery, SearchResult, SheetStats};
pub use resolver::{resolve, DatasetHandle};
