//! Advertising module (`advertising`).

use crate::api::{Method, Property, ReadWrite};
use crate::registry::MethodInfo;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

const MODULE: &str = "advertising";

/// Opaque ad framework configuration
pub type AdFrameworkConfig = Map<String, Value>;

pub const CONFIG: Method<AdConfigurationOptions, AdFrameworkConfig> = Method::new(MODULE, "config");
pub const ADVERTISING_ID: Method<AdvertisingIdOptions, AdvertisingIdResult> =
    Method::new(MODULE, "advertisingId");
pub const DEVICE_ATTRIBUTES: Method<(), Map<String, Value>> =
    Method::new(MODULE, "deviceAttributes");
pub const APP_BUNDLE_ID: Method<(), String> = Method::new(MODULE, "appBundleId");
pub const RESET_IDENTIFIER: Method<(), ()> = Method::new(MODULE, "resetIdentifier");

pub const POLICY: Property<AdPolicy> = Property::new(MODULE, "policy");
pub const SKIP_RESTRICTION: Property<SkipRestriction, ReadWrite> =
    Property::new(MODULE, "skipRestriction");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SkipRestriction {
    None,
    AdsUnwatched,
    AdsAll,
    All,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdPolicy {
    pub skip_restriction: SkipRestriction,
    pub limit_ad_tracking: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdConfigurationOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coppa: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authentication_entity: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvertisingIdOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<AdvertisingIdScope>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvertisingIdScope {
    #[serde(rename = "type")]
    pub scope_type: String,
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvertisingIdResult {
    pub ifa: String,
    pub ifa_type: String,
    /// "0" or "1"
    pub lmt: String,
}

pub(crate) fn entries() -> Vec<MethodInfo> {
    [
        CONFIG.entries(),
        ADVERTISING_ID.entries(),
        DEVICE_ATTRIBUTES.entries(),
        APP_BUNDLE_ID.entries(),
        RESET_IDENTIFIER.entries(),
        POLICY.entries(),
        SKIP_RESTRICTION.entries(),
    ]
    .into_iter()
    .flatten()
    .collect()
}
