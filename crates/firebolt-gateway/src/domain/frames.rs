//! Wire frames exchanged with the gateway.
//!
//! Outbound frames are plain serde structs. Inbound frames are classified by
//! shape, since a single channel carries responses, event notifications and
//! platform-initiated provider calls:
//!
//! | Shape | Frame |
//! |-------|-------|
//! | has `event` | [`EventFrame`] (payload in `value`) |
//! | has `method` and `id` | [`ProviderCallFrame`] |
//! | has `method`, no `id` | [`EventFrame`] (payload in `params.value`, else `params`) |
//! | has `id` | [`ResponseFrame`] |

use crate::domain::correlation::CorrelationId;
use crate::domain::error::{ErrorObject, FireboltError, FrameError, FireboltResult};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// JSON-RPC protocol version tag
pub const JSONRPC_VERSION: &str = "2.0";

/// Outbound request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestFrame {
    pub jsonrpc: String,
    pub id: CorrelationId,
    pub method: String,
    pub params: Value,
}

impl RequestFrame {
    /// Build a request; `null` params go out as an empty object
    pub fn new(id: CorrelationId, method: impl Into<String>, params: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            method: method.into(),
            params: normalize_params(params),
        }
    }
}

/// Params for subscribe/unsubscribe and provider registration calls
pub fn listen_params(listen: bool) -> Value {
    serde_json::json!({ "listen": listen })
}

fn normalize_params(params: Value) -> Value {
    match params {
        Value::Null => Value::Object(Map::new()),
        other => other,
    }
}

/// Response to a request, in either direction.
///
/// When built by [`InboundFrame::classify`], `result` records key presence:
/// `"result": null` is `Some(Value::Null)`, a missing key is `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseFrame {
    pub jsonrpc: String,
    pub id: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorObject>,
}

impl ResponseFrame {
    /// Successful reply
    pub fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    /// Error reply
    pub fn failure(id: Value, error: ErrorObject) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            result: None,
            error: Some(error),
        }
    }

    /// Reply carrying a provider outcome
    pub fn from_outcome(id: Value, outcome: FireboltResult<Value>) -> Self {
        match outcome {
            Ok(result) => Self::success(id, result),
            Err(error) => Self::failure(id, ErrorObject::from_error(error)),
        }
    }

    /// Correlation id, if this response answers one of ours
    pub fn correlation_id(&self) -> Option<CorrelationId> {
        CorrelationId::from_json(&self.id)
    }

    /// Collapse into exactly one terminal outcome.
    ///
    /// A frame carrying both or neither of `result`/`error` is malformed and
    /// yields [`FireboltError::General`].
    pub fn into_outcome(self) -> FireboltResult<Value> {
        match (self.result, self.error) {
            (Some(result), None) => Ok(result),
            (None, Some(error)) => {
                tracing::debug!(
                    id = %self.id,
                    code = error.code,
                    message = %error.message,
                    "Gateway returned error"
                );
                Err(error.to_error())
            }
            (result, error) => {
                tracing::warn!(
                    id = %self.id,
                    has_result = result.is_some(),
                    has_error = error.is_some(),
                    "Malformed response frame"
                );
                Err(FireboltError::General)
            }
        }
    }
}

/// Event notification for a named event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventFrame {
    pub event: String,
    #[serde(default)]
    pub value: Value,
}

/// Platform-initiated call into a registered provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderCallFrame {
    /// Platform's request id, echoed verbatim in the reply
    pub id: Value,
    /// Provider event name
    pub method: String,
    #[serde(default)]
    pub params: Value,
}

/// Any frame the gateway can deliver
#[derive(Debug, Clone, PartialEq)]
pub enum InboundFrame {
    Response(ResponseFrame),
    Event(EventFrame),
    ProviderCall(ProviderCallFrame),
}

impl InboundFrame {
    /// Parse and classify a raw frame
    pub fn parse(text: &str) -> Result<Self, FrameError> {
        let value: Value = serde_json::from_str(text)?;
        Self::classify(value)
    }

    /// Classify an already-decoded frame by its shape
    pub fn classify(value: Value) -> Result<Self, FrameError> {
        let Value::Object(mut obj) = value else {
            return Err(FrameError::NotAnObject);
        };

        if let Some(event) = obj.remove("event") {
            let Value::String(event) = event else {
                return Err(FrameError::BadField("event"));
            };
            let value = obj.remove("value").unwrap_or(Value::Null);
            return Ok(Self::Event(EventFrame { event, value }));
        }

        if let Some(method) = obj.remove("method") {
            let Value::String(method) = method else {
                return Err(FrameError::BadField("method"));
            };
            let params = obj.remove("params").unwrap_or(Value::Null);
            return Ok(match obj.remove("id") {
                Some(id) => Self::ProviderCall(ProviderCallFrame { id, method, params }),
                None => Self::Event(EventFrame {
                    event: method,
                    value: notification_payload(params),
                }),
            });
        }

        if let Some(id) = obj.remove("id") {
            // `"error": null` is the same as no error
            let error = match obj.remove("error") {
                None | Some(Value::Null) => None,
                Some(error) => Some(ErrorObject::from_wire(error)),
            };
            return Ok(Self::Response(ResponseFrame {
                jsonrpc: JSONRPC_VERSION.to_string(),
                id,
                result: obj.remove("result"),
                error,
            }));
        }

        Err(FrameError::UnknownShape)
    }
}

fn notification_payload(params: Value) -> Value {
    match params {
        Value::Object(mut obj) if obj.contains_key("value") => {
            obj.remove("value").unwrap_or(Value::Null)
        }
        other => other,
    }
}
