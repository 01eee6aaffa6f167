//! # Sheets REST API
//!
//! `POST /sheets/:id/search` and `GET /sheets/:id/stats`, with the
//! uniform success/failure envelopes.

pub mod errors;
pub mod parser;
pub mod response;
pub mod server;

pub use errors::{ApiError, Endpoint, ErrorResponse, RestResult};
pub use parser::SearchRequest;
pub use response::{SearchResponse, StatsResponse};
pub use server::{sheet_routes, SheetsState};
