//! Gateway configuration with validation.
//!
//! Accepts the Firebolt-style configuration line
//! (`{"waitTime": 1000, "logLevel": "Info", "wsUrl": "ws://127.0.0.1:9998"}`)
//! and overlays environment variables on top.

use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

/// Main gateway configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GatewayConfig {
    /// Default deadline for a call
    #[serde(with = "duration_serde")]
    pub wait_time: Duration,
    /// Deadline for subscribe/unsubscribe and provider registration calls
    #[serde(with = "duration_serde")]
    pub subscribe_timeout: Duration,
    /// How often abandoned calls are swept
    #[serde(with = "duration_serde")]
    pub cleanup_interval: Duration,
    /// Gateway endpoint handed to the external transport
    pub ws_url: String,
    /// Log level name (Error, Warning, Info, Debug, Trace)
    pub log_level: String,
    /// Capacity of the in-memory outbound channel
    pub outbound_buffer: usize,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            wait_time: Duration::from_millis(1000),
            subscribe_timeout: Duration::from_millis(1000),
            cleanup_interval: Duration::from_secs(5),
            ws_url: "ws://127.0.0.1:9998".to_string(),
            log_level: "Info".to_string(),
            outbound_buffer: 256,
        }
    }
}

impl GatewayConfig {
    /// Parse a JSON configuration line; missing keys take their defaults.
    pub fn from_json(line: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(line).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults overlaid with environment variables.
    ///
    /// - `FIREBOLT_WAIT_TIME_MS`: default call deadline in milliseconds
    /// - `FIREBOLT_WS_URL`: gateway endpoint
    /// - `FIREBOLT_LOG_LEVEL`: log level name
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// Apply environment overrides to an existing configuration
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(ms) = env::var("FIREBOLT_WAIT_TIME_MS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
        {
            self.wait_time = Duration::from_millis(ms);
        }
        if let Ok(url) = env::var("FIREBOLT_WS_URL") {
            self.ws_url = url;
        }
        if let Ok(level) = env::var("FIREBOLT_LOG_LEVEL") {
            self.log_level = level;
        }
        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.wait_time.is_zero() {
            return Err(ConfigError::InvalidTimeout("waitTime cannot be 0".into()));
        }

        if self.subscribe_timeout.is_zero() {
            return Err(ConfigError::InvalidTimeout(
                "subscribeTimeout cannot be 0".into(),
            ));
        }

        if self.cleanup_interval.is_zero() {
            return Err(ConfigError::InvalidTimeout(
                "cleanupInterval cannot be 0".into(),
            ));
        }

        if self.outbound_buffer == 0 {
            return Err(ConfigError::InvalidLimit(
                "outboundBuffer cannot be 0".into(),
            ));
        }

        if !(self.ws_url.starts_with("ws://") || self.ws_url.starts_with("wss://")) {
            return Err(ConfigError::InvalidUrl(self.ws_url.clone()));
        }

        Ok(())
    }
}

/// Configuration errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    /// Configuration line is not valid JSON for this schema
    #[error("cannot parse configuration: {0}")]
    Parse(String),
    /// Invalid timeout value
    #[error("invalid timeout: {0}")]
    InvalidTimeout(String),
    /// Invalid size or count limit
    #[error("invalid limit: {0}")]
    InvalidLimit(String),
    /// Endpoint is not a websocket URL
    #[error("invalid gateway url: {0}")]
    InvalidUrl(String),
}

/// Duration as integer milliseconds or a human string (`500ms`, `3s`, `1m`)
mod duration_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_millis() as u64)
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Millis(u64),
        Text(String),
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Raw::deserialize(deserializer)? {
            Raw::Millis(ms) => Ok(Duration::from_millis(ms)),
            Raw::Text(s) => parse_duration(&s).map_err(serde::de::Error::custom),
        }
    }

    pub(super) fn parse_duration(s: &str) -> Result<Duration, &'static str> {
        let s = s.trim();
        if let Some(ms) = s.strip_suffix("ms") {
            ms.trim()
                .parse::<u64>()
                .map(Duration::from_millis)
                .map_err(|_| "invalid milliseconds")
        } else if let Some(secs) = s.strip_suffix('s') {
            secs.trim()
                .parse::<u64>()
                .map(Duration::from_secs)
                .map_err(|_| "invalid seconds")
        } else if let Some(mins) = s.strip_suffix('m') {
            mins.trim()
                .parse::<u64>()
                .map(|m| Duration::from_secs(m * 60))
                .map_err(|_| "invalid minutes")
        } else {
            // Bare number in a string is milliseconds, same as the integer form
            s.parse::<u64>()
                .map(Duration::from_millis)
                .map_err(|_| "invalid duration format")
        }
    }
}
