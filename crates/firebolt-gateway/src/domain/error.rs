//! Gateway error types with the fixed Firebolt error code table.
//!
//! Callers only ever see [`FireboltError`]; protocol messages are logged,
//! never handed back as strings.

use serde::{Deserialize, Serialize};

/// Wire error codes
pub mod codes {
    /// No error
    pub const NONE: i32 = 0;
    pub const GENERAL: i32 = 1;
    pub const TIMEOUT: i32 = 2;
    pub const NOT_CONNECTED: i32 = 3;
    pub const ALREADY_CONNECTED: i32 = 4;

    // JSON-RPC 2.0 standard errors
    pub const INVALID_REQUEST: i32 = -32600;
    pub const METHOD_NOT_FOUND: i32 = -32601;
    pub const INVALID_PARAMS: i32 = -32602;

    // Capability errors
    pub const CAPABILITY_NOT_AVAILABLE: i32 = -50300;
    pub const CAPABILITY_NOT_SUPPORTED: i32 = -50100;
    pub const CAPABILITY_GET: i32 = -50200;
    pub const CAPABILITY_NOT_PERMITTED: i32 = -40300;
}

/// Closed set of errors surfaced to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
pub enum FireboltError {
    #[error("general error")]
    General,
    #[error("request timed out")]
    Timeout,
    #[error("not connected to gateway")]
    NotConnected,
    #[error("already connected to gateway")]
    AlreadyConnected,
    #[error("invalid request")]
    InvalidRequest,
    #[error("method not found")]
    MethodNotFound,
    #[error("invalid params")]
    InvalidParams,
    #[error("capability not available")]
    CapabilityNotAvailable,
    #[error("capability not supported")]
    CapabilityNotSupported,
    #[error("capability could not be retrieved")]
    CapabilityGet,
    #[error("capability not permitted")]
    CapabilityNotPermitted,
}

impl FireboltError {
    /// Wire code for this error
    pub const fn code(self) -> i32 {
        match self {
            Self::General => codes::GENERAL,
            Self::Timeout => codes::TIMEOUT,
            Self::NotConnected => codes::NOT_CONNECTED,
            Self::AlreadyConnected => codes::ALREADY_CONNECTED,
            Self::InvalidRequest => codes::INVALID_REQUEST,
            Self::MethodNotFound => codes::METHOD_NOT_FOUND,
            Self::InvalidParams => codes::INVALID_PARAMS,
            Self::CapabilityNotAvailable => codes::CAPABILITY_NOT_AVAILABLE,
            Self::CapabilityNotSupported => codes::CAPABILITY_NOT_SUPPORTED,
            Self::CapabilityGet => codes::CAPABILITY_GET,
            Self::CapabilityNotPermitted => codes::CAPABILITY_NOT_PERMITTED,
        }
    }

    /// Map a wire code to an error.
    ///
    /// `0` means "no error" and yields `None`; codes outside the table
    /// collapse to [`FireboltError::General`].
    pub const fn from_code(code: i32) -> Option<Self> {
        let error = match code {
            codes::NONE => return None,
            codes::TIMEOUT => Self::Timeout,
            codes::NOT_CONNECTED => Self::NotConnected,
            codes::ALREADY_CONNECTED => Self::AlreadyConnected,
            codes::INVALID_REQUEST => Self::InvalidRequest,
            codes::METHOD_NOT_FOUND => Self::MethodNotFound,
            codes::INVALID_PARAMS => Self::InvalidParams,
            codes::CAPABILITY_NOT_AVAILABLE => Self::CapabilityNotAvailable,
            codes::CAPABILITY_NOT_SUPPORTED => Self::CapabilityNotSupported,
            codes::CAPABILITY_GET => Self::CapabilityGet,
            codes::CAPABILITY_NOT_PERMITTED => Self::CapabilityNotPermitted,
            _ => Self::General,
        };
        Some(error)
    }
}

/// Result type for gateway operations
pub type FireboltResult<T> = Result<T, FireboltError>;

/// JSON-RPC error object as it appears on the wire
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorObject {
    pub code: i32,
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl ErrorObject {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }

    /// Read an inbound error value.
    ///
    /// Objects that do not fit the wire shape keep whatever integer `code`
    /// they carry; anything else becomes a `General` error.
    pub fn from_wire(value: serde_json::Value) -> Self {
        match serde_json::from_value::<Self>(value.clone()) {
            Ok(error) => error,
            Err(_) => {
                let code = value
                    .get("code")
                    .and_then(serde_json::Value::as_i64)
                    .and_then(|code| i32::try_from(code).ok())
                    .unwrap_or(codes::GENERAL);
                Self::new(code, value.to_string())
            }
        }
    }

    /// Build the wire object for a typed error
    pub fn from_error(error: FireboltError) -> Self {
        Self::new(error.code(), error.to_string())
    }

    /// Typed error for this wire object.
    ///
    /// An error object is always an error, so a `0` code is treated as
    /// [`FireboltError::General`] rather than success.
    pub fn to_error(&self) -> FireboltError {
        FireboltError::from_code(self.code).unwrap_or(FireboltError::General)
    }
}

impl From<FireboltError> for ErrorObject {
    fn from(error: FireboltError) -> Self {
        Self::from_error(error)
    }
}

/// Transport-level failures reported by the external channel
#[derive(Debug, Clone, thiserror::Error)]
pub enum TransportError {
    #[error("channel closed")]
    Closed,
    #[error("send failed: {0}")]
    SendFailed(String),
    #[error("receive failed: {0}")]
    ReceiveFailed(String),
}

impl From<TransportError> for FireboltError {
    fn from(_: TransportError) -> Self {
        FireboltError::NotConnected
    }
}

/// Inbound frame that could not be classified
#[derive(Debug, Clone, thiserror::Error)]
pub enum FrameError {
    #[error("invalid JSON: {0}")]
    InvalidJson(String),
    #[error("frame is not an object")]
    NotAnObject,
    #[error("unrecognized frame shape")]
    UnknownShape,
    #[error("field `{0}` has the wrong type")]
    BadField(&'static str),
}

impl From<serde_json::Error> for FrameError {
    fn from(e: serde_json::Error) -> Self {
        FrameError::InvalidJson(e.to_string())
    }
}
