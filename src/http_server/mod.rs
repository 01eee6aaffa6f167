//! # HTTP Server Module
//!
//! # Endpoints
//!
//! - `/health` - Health check
//! - `/sheets/:id/search` - Session-gated sheet search
//! - `/sheets/:id/stats` - Session-gated sheet statistics

pub mod config;
pub mod health;
pub mod server;

pub use config::HttpServerConfig;
pub use server::HttpServer;
