//! User grants module (`usergrants`).

use crate::api::Method;
use crate::registry::MethodInfo;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const MODULE: &str = "usergrants";

/// `request` waits on the user, so it gets far more than the default deadline
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

pub const APP: Method<AppParams, Vec<GrantInfo>> = Method::new(MODULE, "app");
pub const DEVICE: Method<(), Vec<GrantInfo>> = Method::new(MODULE, "device");
pub const CAPABILITY: Method<CapabilityParams, Vec<GrantInfo>> = Method::new(MODULE, "capability");
pub const GRANT: Method<GrantModification, ()> = Method::new(MODULE, "grant");
pub const DENY: Method<GrantModification, ()> = Method::new(MODULE, "deny");
pub const CLEAR: Method<GrantModification, ()> = Method::new(MODULE, "clear");
pub const REQUEST: Method<GrantRequest, Vec<GrantInfo>> =
    Method::new(MODULE, "request").with_timeout(REQUEST_TIMEOUT);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Use,
    Manage,
    Provide,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GrantState {
    Granted,
    Denied,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Lifespan {
    Once,
    Forever,
    AppActive,
    PowerActive,
    Seconds,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppInfo {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrantInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app: Option<AppInfo>,
    pub state: GrantState,
    pub capability: String,
    pub role: Role,
    pub lifespan: Lifespan,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppParams {
    pub app_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapabilityParams {
    pub capability: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrantModificationOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrantModification {
    pub role: Role,
    pub capability: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<GrantModificationOptions>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permission {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    pub capability: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestOptions {
    /// Prompt even if a grant already exists
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub force: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrantRequest {
    pub app_id: String,
    pub permissions: Vec<Permission>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<RequestOptions>,
}

pub(crate) fn entries() -> Vec<MethodInfo> {
    [
        APP.entries(),
        DEVICE.entries(),
        CAPABILITY.entries(),
        GRANT.entries(),
        DENY.entries(),
        CLEAR.entries(),
        REQUEST.entries(),
    ]
    .into_iter()
    .flatten()
    .collect()
}
