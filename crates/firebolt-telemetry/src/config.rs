//! Telemetry configuration from environment variables.

use std::env;

/// Logging configuration for a Firebolt client process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelemetryConfig {
    /// Service name attached to the startup log line
    pub service_name: String,

    /// Level name or filter directive (`Info`, `debug`, `firebolt_gateway=trace`)
    pub log_level: String,

    /// Whether to write log lines to stdout at all
    pub console_output: bool,

    /// Whether to format log lines as JSON
    pub json_logs: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: "firebolt-client".to_string(),
            log_level: "info".to_string(),
            console_output: true,
            json_logs: false,
        }
    }
}

impl TelemetryConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `FIREBOLT_SERVICE_NAME`: Service name (default: firebolt-client)
    /// - `FIREBOLT_LOG_LEVEL` or `RUST_LOG`: Level or filter (default: info)
    /// - `FIREBOLT_CONSOLE_OUTPUT`: Enable console output (default: true)
    /// - `FIREBOLT_JSON_LOGS`: Enable JSON logs (default: false)
    pub fn from_env() -> Self {
        Self {
            service_name: env::var("FIREBOLT_SERVICE_NAME")
                .unwrap_or_else(|_| "firebolt-client".to_string()),

            log_level: env::var("FIREBOLT_LOG_LEVEL")
                .or_else(|_| env::var("RUST_LOG"))
                .unwrap_or_else(|_| "info".to_string()),

            console_output: env::var("FIREBOLT_CONSOLE_OUTPUT")
                .map(|v| v.to_lowercase() != "false" && v != "0")
                .unwrap_or(true),

            json_logs: env::var("FIREBOLT_JSON_LOGS")
                .map(|v| v.to_lowercase() == "true" || v == "1")
                .unwrap_or(false),
        }
    }

    /// Override the level, e.g. from the gateway configuration line
    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Filter directive for `log_level`.
    ///
    /// Firebolt level names (`Error`, `Warning`, `Info`, `Debug`, `Trace`)
    /// map onto tracing levels; anything else is used as a directive as is.
    pub fn filter_directive(&self) -> String {
        match self.log_level.as_str() {
            "Error" | "error" => "error".to_string(),
            "Warning" | "warning" | "Warn" | "warn" => "warn".to_string(),
            "Info" | "info" => "info".to_string(),
            "Debug" | "debug" => "debug".to_string(),
            "Trace" | "trace" => "trace".to_string(),
            other => other.to_string(),
        }
    }
}
