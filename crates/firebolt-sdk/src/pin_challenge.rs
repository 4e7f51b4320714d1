//! PIN challenge provider capability (`pinchallenge`).

use crate::api::ProviderEvent;
use crate::registry::MethodInfo;
use async_trait::async_trait;
use firebolt_gateway::{FireboltResult, Gateway};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

const MODULE: &str = "pinchallenge";

pub const ON_REQUEST_CHALLENGE: ProviderEvent<PinChallenge, PinChallengeResult> =
    ProviderEvent::new(MODULE, "onRequestChallenge");

/// App on whose behalf a challenge is raised
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChallengeRequestor {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PinSpace {
    Purchase,
    Content,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PinChallenge {
    pub requestor: ChallengeRequestor,
    pub pin_space: PinSpace,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capability: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ResultReason {
    NoPinRequired,
    NoPinRequiredWindow,
    ExceededPinFailures,
    CorrectPin,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PinChallengeResult {
    /// `None` when the user dismissed the challenge
    pub granted: Option<bool>,
    pub reason: ResultReason,
}

/// App-side PIN entry
#[async_trait]
pub trait PinChallengeProvider: Send + Sync + 'static {
    async fn challenge(&self, request: PinChallenge) -> FireboltResult<PinChallengeResult>;
}

pub async fn provide<P: PinChallengeProvider>(gateway: &Gateway, provider: Arc<P>) -> FireboltResult<()> {
    ON_REQUEST_CHALLENGE
        .provide(gateway, move |request| {
            let p = provider.clone();
            async move { p.challenge(request).await }
        })
        .await?;
    info!("PIN challenge provider active");
    Ok(())
}

pub(crate) fn entries() -> Vec<MethodInfo> {
    ON_REQUEST_CHALLENGE.entries()
}
