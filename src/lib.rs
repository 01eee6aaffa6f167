//! sheetdesk - session-gated search and statistics over tracker sheets
//!
//! Request flow: session verification, sheet resolution, query
//! execution against an injected row store, response envelope.

pub mod auth;
pub mod backend;
pub mod cli;
pub mod http_server;
pub mod observability;
pub mod rest_api;
pub mod sheets;
