//! Acknowledge challenge provider capability (`acknowledgechallenge`).

use crate::api::ProviderEvent;
use crate::pin_challenge::ChallengeRequestor;
use crate::registry::MethodInfo;
use async_trait::async_trait;
use firebolt_gateway::{FireboltResult, Gateway};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

const MODULE: &str = "acknowledgechallenge";

pub const ON_REQUEST_CHALLENGE: ProviderEvent<Challenge, GrantResult> =
    ProviderEvent::new(MODULE, "onRequestChallenge");

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Challenge {
    pub capability: String,
    pub requestor: ChallengeRequestor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrantResult {
    /// `None` when the user dismissed the prompt
    pub granted: Option<bool>,
}

/// App-side confirmation prompt
#[async_trait]
pub trait AcknowledgeChallengeProvider: Send + Sync + 'static {
    async fn challenge(&self, request: Challenge) -> FireboltResult<GrantResult>;
}

pub async fn provide<P: AcknowledgeChallengeProvider>(
    gateway: &Gateway,
    provider: Arc<P>,
) -> FireboltResult<()> {
    ON_REQUEST_CHALLENGE
        .provide(gateway, move |request| {
            let p = provider.clone();
            async move { p.challenge(request).await }
        })
        .await?;
    info!("Acknowledge challenge provider active");
    Ok(())
}

pub(crate) fn entries() -> Vec<MethodInfo> {
    ON_REQUEST_CHALLENGE.entries()
}
