//! Domain types for the gateway client.
//!
//! Correlation, the pending-call table, wire frames, errors and configuration.

pub mod config;
pub mod correlation;
pub mod error;
pub mod frames;
pub mod methods;
pub mod pending;

// Re-exports for convenience
pub use config::{ConfigError, GatewayConfig};
pub use correlation::{CorrelationId, IdAllocator};
pub use error::{ErrorObject, FireboltError, FireboltResult, FrameError, TransportError};
pub use frames::{EventFrame, InboundFrame, ProviderCallFrame, RequestFrame, ResponseFrame};
pub use methods::{change_event_name, method_name, setter_name, split_method};
pub use pending::{CallOutcome, CorrelationTable, PendingStats};
