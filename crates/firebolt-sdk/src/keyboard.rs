//! Keyboard provider capability (`keyboard`).
//!
//! The platform asks the app to collect text from the user; the app answers
//! with the entered string.

use crate::api::ProviderEvent;
use crate::registry::MethodInfo;
use async_trait::async_trait;
use firebolt_gateway::{FireboltResult, Gateway, Registration};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

const MODULE: &str = "keyboard";

pub const ON_REQUEST_STANDARD: ProviderEvent<KeyboardRequest, String> =
    ProviderEvent::new(MODULE, "onRequestStandard");
pub const ON_REQUEST_PASSWORD: ProviderEvent<KeyboardRequest, String> =
    ProviderEvent::new(MODULE, "onRequestPassword");
pub const ON_REQUEST_EMAIL: ProviderEvent<KeyboardRequest, String> =
    ProviderEvent::new(MODULE, "onRequestEmail");

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyboardRequest {
    /// Prompt to show the user
    pub message: String,
}

/// App-side keyboard
#[async_trait]
pub trait KeyboardInput: Send + Sync + 'static {
    async fn standard(&self, request: KeyboardRequest) -> FireboltResult<String>;

    async fn password(&self, request: KeyboardRequest) -> FireboltResult<String>;

    async fn email(&self, request: KeyboardRequest) -> FireboltResult<String>;
}

#[derive(Debug, Clone, Copy)]
enum Mode {
    Standard,
    Password,
    Email,
}

/// Register `keyboard` for all three keyboard requests.
///
/// All or nothing: if the platform rejects one registration, the ones this
/// call made are revoked again and the rejection is returned.
pub async fn provide<K: KeyboardInput>(gateway: &Gateway, keyboard: Arc<K>) -> FireboltResult<()> {
    let capabilities = [
        (ON_REQUEST_STANDARD, Mode::Standard),
        (ON_REQUEST_PASSWORD, Mode::Password),
        (ON_REQUEST_EMAIL, Mode::Email),
    ];

    let mut registered = Vec::new();
    for (capability, mode) in capabilities {
        let k = keyboard.clone();
        let outcome = capability
            .provide(gateway, move |request| {
                let k = k.clone();
                async move {
                    match mode {
                        Mode::Standard => k.standard(request).await,
                        Mode::Password => k.password(request).await,
                        Mode::Email => k.email(request).await,
                    }
                }
            })
            .await;

        match outcome {
            Ok(Registration::Registered) => registered.push(capability),
            Ok(Registration::Replaced) => {}
            Err(e) => {
                warn!(event = %capability.event(), error = %e, "Keyboard registration failed");
                for earlier in registered {
                    if let Err(revoke_error) = earlier.revoke(gateway).await {
                        warn!(
                            event = %earlier.event(),
                            error = %revoke_error,
                            "Keyboard rollback failed"
                        );
                    }
                }
                return Err(e);
            }
        }
    }

    info!("Keyboard provider active");
    Ok(())
}

pub(crate) fn entries() -> Vec<MethodInfo> {
    [
        ON_REQUEST_STANDARD.entries(),
        ON_REQUEST_PASSWORD.entries(),
        ON_REQUEST_EMAIL.entries(),
    ]
    .into_iter()
    .flatten()
    .collect()
}
