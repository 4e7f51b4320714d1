//! Subscriber installation.
//!
//! One global `tracing` subscriber per process: an `EnvFilter` plus either a
//! JSON layer (containers, log shipping) or a human-readable `fmt` layer.

use crate::{TelemetryConfig, TelemetryError};
use std::sync::atomic::{AtomicBool, Ordering};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static INITIALIZED: AtomicBool = AtomicBool::new(false);

/// Guard returned by [`init_logging`]; hold it for the life of the process.
pub struct TelemetryGuard {
    service_name: String,
}

impl TelemetryGuard {
    pub fn service_name(&self) -> &str {
        &self.service_name
    }
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        tracing::info!(service = %self.service_name, "Shutting down logging");
    }
}

/// Install the global subscriber.
///
/// A second call in the same process returns
/// [`TelemetryError::AlreadyInitialized`].
pub fn init_logging(config: &TelemetryConfig) -> Result<TelemetryGuard, TelemetryError> {
    let directive = config.filter_directive();
    let env_filter = EnvFilter::try_new(&directive)
        .map_err(|e| TelemetryError::InvalidFilter(format!("{directive}: {e}")))?;

    if INITIALIZED.swap(true, Ordering::SeqCst) {
        return Err(TelemetryError::AlreadyInitialized);
    }

    let installed = match (config.console_output, config.json_logs) {
        (true, true) => {
            // JSON output for containers/production
            let json_layer = tracing_subscriber::fmt::layer()
                .json()
                .with_target(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true);
            tracing_subscriber::registry()
                .with(env_filter)
                .with(json_layer)
                .try_init()
        }
        (true, false) => {
            // Pretty output for development
            let fmt_layer = tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .with_ansi(true);
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt_layer)
                .try_init()
        }
        (false, _) => tracing_subscriber::registry().with(env_filter).try_init(),
    };
    installed.map_err(|_| TelemetryError::AlreadyInitialized)?;

    tracing::info!(
        service = %config.service_name,
        filter = %directive,
        json_logs = config.json_logs,
        "Logging initialized"
    );

    Ok(TelemetryGuard {
        service_name: config.service_name.clone(),
    })
}
