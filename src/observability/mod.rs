//! Observability
//!
//! Structured logging through `tracing`. Handlers and the query executor
//! emit events; this module only installs the subscriber.

mod logging;

pub use logging::{init_tracing, Verbosity, LOG_ENV};
