//! Process startup helpers.
//!
//! The gateway configuration line carries the log level; these helpers hand it
//! to the telemetry crate so one configuration drives both.

use firebolt_gateway::GatewayConfig;
use firebolt_telemetry::{TelemetryConfig, TelemetryError, TelemetryGuard};

/// Logging configuration for `config`.
///
/// Service name and output switches come from the environment; the level is
/// the gateway's `logLevel` (itself overridable by `FIREBOLT_LOG_LEVEL`).
pub fn telemetry_config(config: &GatewayConfig) -> TelemetryConfig {
    TelemetryConfig::from_env().with_level(config.log_level.clone())
}

/// Install process logging at the gateway's configured level.
///
/// Call once, before the gateway starts, and hold the guard.
pub fn init_logging(config: &GatewayConfig) -> Result<TelemetryGuard, TelemetryError> {
    firebolt_telemetry::init_logging(&telemetry_config(config))
}
