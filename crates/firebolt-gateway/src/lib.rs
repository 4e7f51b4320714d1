//! Firebolt Gateway - RPC client core for the Firebolt platform-services gateway.
//!
//! Turns a single bidirectional frame channel into typed calls, property
//! access, event subscriptions and provider callbacks.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────────┐
//! │                          GATEWAY CLIENT                              │
//! ├──────────────────────────────────────────────────────────────────────┤
//! │  ┌──────────────┐   ┌──────────────┐   ┌──────────────┐              │
//! │  │  Property    │   │    Event     │   │   Provider   │              │
//! │  │  Accessor    │   │   Registry   │   │   Registry   │              │
//! │  └──────┬───────┘   └──────┬───────┘   └──────┬───────┘              │
//! │         │                  │                  │                      │
//! │  ┌──────┴──────────────────┴──────────────────┘                      │
//! │  │              RpcClient                                            │
//! │  │   register → send → await (oneshot + deadline)                    │
//! │  └──────┬────────────────────────────────────────────                │
//! │         │                                                            │
//! │  ┌──────┴────────────────────────────┐                               │
//! │  │        Correlation Table          │ ◄── Gateway::deliver          │
//! │  │  (DashMap of pending oneshots)    │     (responses, events,       │
//! │  └───────────────────────────────────┘      provider calls)          │
//! └─────────┬──────────────────────────────────────────▲─────────────────┘
//!           │ Transport::send                          │ FrameSource::receive
//!           ▼                                          │
//!                       Gateway process (websocket)
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use firebolt_gateway::{Gateway, GatewayConfig, InboundLoop};
//!
//! let gateway = Gateway::new(GatewayConfig::from_env(), transport);
//! tokio::spawn(InboundLoop::new(gateway.clone(), source).run());
//!
//! let locale: String = gateway.properties("localization").get_as("locale").await?;
//! ```
//!
//! # Errors
//!
//! Callers only ever see [`FireboltError`]. Transport failures become
//! `NotConnected`, deadlines become `Timeout`, protocol error codes are mapped
//! through a fixed table and anything unrecognised is `General`.

#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod client;
pub mod domain;
pub mod events;
mod gate;
pub mod gateway;
pub mod ports;
pub mod property;
pub mod providers;

// Re-exports for public API
pub use client::RpcClient;
pub use domain::config::{ConfigError, GatewayConfig};
pub use domain::correlation::CorrelationId;
pub use domain::error::{ErrorObject, FireboltError, FireboltResult, FrameError, TransportError};
pub use domain::frames::{EventFrame, InboundFrame, ProviderCallFrame, RequestFrame, ResponseFrame};
pub use domain::methods::{change_event_name, method_name, setter_name, split_method};
pub use domain::pending::{CorrelationTable, PendingStats};
pub use events::{EventRegistry, Listener, ListenerId};
pub use gateway::{Delivery, Gateway, InboundLoop};
pub use ports::{FrameSource, Transport};
pub use property::PropertyAccessor;
pub use providers::{typed_provider, Provider, ProviderRegistry, Registration};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
