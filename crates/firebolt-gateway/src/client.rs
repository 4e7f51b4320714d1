//! Request/response client.
//!
//! Synchronous-looking calls over the asynchronous transport: register a
//! pending call, send the frame, await the matching response or the deadline.
//! Only the calling task is suspended; the delivery path never waits on it.

use crate::domain::correlation::CorrelationId;
use crate::domain::error::{FireboltError, FireboltResult};
use crate::domain::frames::{RequestFrame, ResponseFrame};
use crate::domain::pending::CorrelationTable;
use crate::ports::Transport;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Client that issues named RPCs and awaits their responses
pub struct RpcClient {
    /// Correlation table shared with the delivery path
    table: Arc<CorrelationTable>,
    /// Outbound channel
    transport: Arc<dyn Transport>,
}

impl RpcClient {
    pub fn new(table: Arc<CorrelationTable>, transport: Arc<dyn Transport>) -> Self {
        Self { table, transport }
    }

    /// Call `method` and wait for its outcome.
    ///
    /// - send failure: `NotConnected`, with no entry left in the table
    /// - deadline passes first: `Timeout`, and a late response is dropped
    /// - error reply: the mapped [`FireboltError`]
    ///
    /// Every call is a fresh round trip; nothing is cached or retried.
    pub async fn call(
        &self,
        method: &str,
        params: Value,
        timeout: Option<Duration>,
    ) -> FireboltResult<Value> {
        let timeout = timeout.unwrap_or_else(|| self.table.default_timeout());

        let (correlation_id, rx) = self.table.register(method, Some(timeout));
        // Removes the entry if this future is dropped before an outcome arrives
        let _guard = PendingGuard {
            table: &self.table,
            correlation_id,
        };

        let frame = RequestFrame::new(correlation_id, method, params);
        let text = serde_json::to_string(&frame).map_err(|e| {
            warn!(method = method, error = %e, "Cannot encode request frame");
            FireboltError::General
        })?;

        if let Err(e) = self.transport.send(text).await {
            self.table.abandon(&correlation_id);
            warn!(
                correlation_id = %correlation_id,
                method = method,
                error = %e,
                "Gateway send failed"
            );
            return Err(FireboltError::NotConnected);
        }

        debug!(
            correlation_id = %correlation_id,
            method = method,
            "Sent request"
        );

        match tokio::time::timeout(timeout, rx).await {
            Ok(Ok(outcome)) => outcome,
            Ok(Err(_)) => {
                // Sender dropped without an outcome
                Err(FireboltError::General)
            }
            Err(_) => {
                self.table.cancel(&correlation_id);
                warn!(
                    correlation_id = %correlation_id,
                    method = method,
                    timeout_ms = timeout.as_millis(),
                    "Request timed out"
                );
                Err(FireboltError::Timeout)
            }
        }
    }

    /// Typed call: encode `params`, decode the result.
    ///
    /// Params that cannot be encoded fail with `InvalidParams` before anything
    /// is sent; a result that does not decode is a `General` error.
    pub async fn call_typed<P, R>(
        &self,
        method: &str,
        params: &P,
        timeout: Option<Duration>,
    ) -> FireboltResult<R>
    where
        P: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let params = serde_json::to_value(params).map_err(|e| {
            warn!(method = method, error = %e, "Cannot encode params");
            FireboltError::InvalidParams
        })?;
        let value = self.call(method, params, timeout).await?;
        decode_result(method, value)
    }

    /// Route a response frame to its pending call.
    ///
    /// Returns false when nothing was waiting for it.
    pub fn resolve(&self, frame: ResponseFrame) -> bool {
        let Some(correlation_id) = frame.correlation_id() else {
            debug!(id = %frame.id, "Discarding response with foreign id");
            return false;
        };
        self.table.resolve(correlation_id, frame.into_outcome())
    }

    /// Number of calls awaiting a response
    pub fn pending_count(&self) -> usize {
        self.table.pending_count()
    }

    pub fn table(&self) -> &Arc<CorrelationTable> {
        &self.table
    }

    pub(crate) fn transport(&self) -> &Arc<dyn Transport> {
        &self.transport
    }
}

/// Decode a call result, logging what did not fit
pub(crate) fn decode_result<R: DeserializeOwned>(method: &str, value: Value) -> FireboltResult<R> {
    serde_json::from_value(value).map_err(|e| {
        warn!(method = method, error = %e, "Cannot decode result");
        FireboltError::General
    })
}

struct PendingGuard<'a> {
    table: &'a CorrelationTable,
    correlation_id: CorrelationId,
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        // No-op once resolved or cancelled
        self.table.abandon(&self.correlation_id);
    }
}
