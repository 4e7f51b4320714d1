//! # Firebolt Telemetry
//!
//! Logging setup for processes embedding the Firebolt client.
//!
//! Library crates in this workspace only emit `tracing` events; installing a
//! subscriber is the application's decision, made once at startup.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use firebolt_telemetry::{init_logging, TelemetryConfig};
//!
//! fn main() {
//!     let config = TelemetryConfig::from_env();
//!     let _guard = init_logging(&config).expect("Failed to init logging");
//!
//!     // Gateway client runs here
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `FIREBOLT_SERVICE_NAME` | `firebolt-client` | Service name in the startup line |
//! | `FIREBOLT_LOG_LEVEL` | `info` | Level name or filter directive (falls back to `RUST_LOG`) |
//! | `FIREBOLT_CONSOLE_OUTPUT` | `true` | Write log lines to stdout |
//! | `FIREBOLT_JSON_LOGS` | `false` | JSON formatted log lines |

mod config;
mod logging;

pub use config::TelemetryConfig;
pub use logging::{init_logging, TelemetryGuard};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Logging already initialized")]
    AlreadyInitialized,

    #[error("Invalid log filter: {0}")]
    InvalidFilter(String),
}

/// Span for one gateway connection, carrying the endpoint as a field.
///
/// # Example
///
/// ```rust,ignore
/// let _span = firebolt_telemetry::connection_span!("ws://127.0.0.1:9998").entered();
/// ```
#[macro_export]
macro_rules! connection_span {
    ($endpoint:expr) => {
        tracing::info_span!("firebolt_connection", endpoint = %$endpoint)
    };
    ($endpoint:expr, $($field:tt)*) => {
        tracing::info_span!("firebolt_connection", endpoint = %$endpoint, $($field)*)
    };
}
