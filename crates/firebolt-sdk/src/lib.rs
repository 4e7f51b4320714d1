//! Firebolt SDK - typed module tables over the gateway client core.
//!
//! Each module is a list of `const` descriptors (properties, methods, events,
//! provider capabilities). Calling through a descriptor goes straight to the
//! shared [`Gateway`]; there is no per-module client state.
//!
//! # Usage
//!
//! ```ignore
//! use firebolt_sdk::{device, localization, Gateway, GatewayConfig};
//!
//! let config = GatewayConfig::from_env();
//! let _logging = firebolt_sdk::init_logging(&config)?;
//!
//! let locale = localization::LOCALE.get(&gateway).await?;
//! device::NAME.set(&gateway, &"Living Room".to_string()).await?;
//!
//! let id = localization::LOCALE
//!     .on_change(&gateway, |locale: String| println!("locale now {locale}"))
//!     .await?;
//! ```

#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod api;
pub mod registry;
pub mod startup;

pub mod accessibility;
pub mod acknowledge_challenge;
pub mod advertising;
pub mod device;
pub mod keyboard;
pub mod localization;
pub mod metrics;
pub mod pin_challenge;
pub mod user_grants;

// Re-exports for public API
pub use api::{Access, Event, Method, Property, ProviderEvent, ReadOnly, ReadWrite};
pub use firebolt_gateway::{FireboltError, FireboltResult, Gateway, GatewayConfig};
pub use startup::{init_logging, telemetry_config};
pub use registry::{
    is_method_supported, method_info, methods_by_kind, methods_for_module, MethodInfo, MethodKind,
    METHOD_REGISTRY,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
