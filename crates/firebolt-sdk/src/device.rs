//! Device module (`device`).

use crate::api::{Event, Method, Property, ReadWrite};
use crate::registry::MethodInfo;
use serde::{Deserialize, Serialize};

const MODULE: &str = "device";

/// Width and height in pixels, sent as a two-element array
pub type Resolution = (u32, u32);

pub const ID: Property<String> = Property::new(MODULE, "id");
pub const DISTRIBUTOR: Property<String> = Property::new(MODULE, "distributor");
pub const PLATFORM: Property<String> = Property::new(MODULE, "platform");
pub const UID: Property<String> = Property::new(MODULE, "uid");
pub const DEVICE_TYPE: Property<String> = Property::new(MODULE, "type");
pub const MODEL: Property<String> = Property::new(MODULE, "model");
pub const SKU: Property<String> = Property::new(MODULE, "sku");
pub const MAKE: Property<String> = Property::new(MODULE, "make");
pub const VERSION: Property<DeviceVersion> = Property::new(MODULE, "version");
pub const HDCP: Property<HdcpVersionMap> = Property::new(MODULE, "hdcp");
pub const HDR: Property<HdrFormatMap> = Property::new(MODULE, "hdr");
pub const AUDIO: Property<AudioProfiles> = Property::new(MODULE, "audio");
pub const SCREEN_RESOLUTION: Property<Resolution> = Property::new(MODULE, "screenResolution");
pub const VIDEO_RESOLUTION: Property<Resolution> = Property::new(MODULE, "videoResolution");
pub const NETWORK: Property<NetworkInfo> = Property::new(MODULE, "network");
pub const NAME: Property<String, ReadWrite> = Property::new(MODULE, "name");

pub const PROVISION: Method<ProvisionRequest, ()> = Method::new(MODULE, "provision");

pub const ON_DEVICE_NAME_CHANGED: Event<String> = Event::new(MODULE, "onDeviceNameChanged");

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SemanticVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
    #[serde(default)]
    pub readable: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceVersion {
    pub sdk: SemanticVersion,
    pub api: SemanticVersion,
    pub firmware: SemanticVersion,
    pub os: SemanticVersion,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debug: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HdcpVersionMap {
    #[serde(rename = "hdcp1.4")]
    pub hdcp1_4: bool,
    #[serde(rename = "hdcp2.2")]
    pub hdcp2_2: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HdrFormatMap {
    pub hdr10: bool,
    pub hdr10_plus: bool,
    pub dolby_vision: bool,
    pub hlg: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioProfiles {
    pub stereo: bool,
    #[serde(rename = "dolbyDigital5.1")]
    pub dolby_digital_5_1: bool,
    #[serde(rename = "dolbyDigital5.1+")]
    pub dolby_digital_5_1_plus: bool,
    #[serde(rename = "dolbyAtmos")]
    pub dolby_atmos: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkState {
    Connected,
    Disconnected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkType {
    Wifi,
    Ethernet,
    Hybrid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkInfo {
    pub state: NetworkState,
    #[serde(rename = "type")]
    pub network_type: NetworkType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProvisionRequest {
    pub account_id: String,
    pub device_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distributor_id: Option<String>,
}

pub(crate) fn entries() -> Vec<MethodInfo> {
    [
        ID.entries(),
        DISTRIBUTOR.entries(),
        PLATFORM.entries(),
        UID.entries(),
        DEVICE_TYPE.entries(),
        MODEL.entries(),
        SKU.entries(),
        MAKE.entries(),
        VERSION.entries(),
        HDCP.entries(),
        HDR.entries(),
        AUDIO.entries(),
        SCREEN_RESOLUTION.entries(),
        VIDEO_RESOLUTION.entries(),
        NETWORK.entries(),
        NAME.entries(),
        PROVISION.entries(),
        ON_DEVICE_NAME_CHANGED.entries(),
    ]
    .into_iter()
    .flatten()
    .collect()
}
