//! # OfficeHub Observability
//!
//! Structured logging for the OfficeHub API.
//!
//! - [`init_logging`]: installs the global `tracing` subscriber
//! - [`logging_middleware`]: one log line per request with a request id
//!
//! Console output is compact in development and JSON in production. When a
//! log directory is configured, a daily rolling JSON file is written as well.
//! `RUST_LOG` overrides the default filter.

mod logging;
mod middleware;

pub use logging::{DEFAULT_FILTER, init_logging};
pub use middleware::{REQUEST_ID_HEADER, logging_middleware};
pub use tracing_appender::non_blocking::WorkerGuard;
