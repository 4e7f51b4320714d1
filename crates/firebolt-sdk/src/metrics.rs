//! Metrics module (`metrics`).
//!
//! Every call returns the platform's boolean acknowledgement.

use crate::api::Method;
use crate::registry::MethodInfo;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

const MODULE: &str = "metrics";

pub const READY: Method<(), bool> = Method::new(MODULE, "ready");
pub const SIGN_IN: Method<(), bool> = Method::new(MODULE, "signIn");
pub const SIGN_OUT: Method<(), bool> = Method::new(MODULE, "signOut");
pub const START_CONTENT: Method<ContentParams, bool> = Method::new(MODULE, "startContent");
pub const STOP_CONTENT: Method<ContentParams, bool> = Method::new(MODULE, "stopContent");
pub const PAGE: Method<PageParams, bool> = Method::new(MODULE, "page");
pub const ACTION: Method<ActionParams, bool> = Method::new(MODULE, "action");
pub const ERROR: Method<ErrorParams, bool> = Method::new(MODULE, "error");
pub const MEDIA_LOAD_START: Method<MediaParams, bool> = Method::new(MODULE, "mediaLoadStart");
pub const MEDIA_PLAY: Method<MediaParams, bool> = Method::new(MODULE, "mediaPlay");
pub const MEDIA_PLAYING: Method<MediaParams, bool> = Method::new(MODULE, "mediaPlaying");
pub const MEDIA_PAUSE: Method<MediaParams, bool> = Method::new(MODULE, "mediaPause");
pub const MEDIA_WAITING: Method<MediaParams, bool> = Method::new(MODULE, "mediaWaiting");
pub const MEDIA_PROGRESS: Method<MediaProgressParams, bool> = Method::new(MODULE, "mediaProgress");
pub const MEDIA_SEEKING: Method<MediaSeekingParams, bool> = Method::new(MODULE, "mediaSeeking");
pub const MEDIA_SEEKED: Method<MediaSeekedParams, bool> = Method::new(MODULE, "mediaSeeked");
pub const MEDIA_RATE_CHANGE: Method<MediaRateChangeParams, bool> =
    Method::new(MODULE, "mediaRateChange");
pub const MEDIA_RENDITION_CHANGE: Method<MediaRenditionChangeParams, bool> =
    Method::new(MODULE, "mediaRenditionChange");
pub const MEDIA_ENDED: Method<MediaParams, bool> = Method::new(MODULE, "mediaEnded");

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageParams {
    pub page_id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionCategory {
    User,
    App,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionParams {
    pub category: ActionCategory,
    #[serde(rename = "type")]
    pub action_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Map<String, Value>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorType {
    Network,
    Media,
    Restriction,
    Entitlement,
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorParams {
    #[serde(rename = "type")]
    pub error_type: ErrorType,
    pub code: String,
    pub description: String,
    pub visible: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Map<String, Value>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaParams {
    pub entity_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaProgressParams {
    pub entity_id: String,
    /// Seconds, or a fraction of the duration when between 0 and 1
    pub progress: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaSeekingParams {
    pub entity_id: String,
    pub target: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaSeekedParams {
    pub entity_id: String,
    pub position: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaRateChangeParams {
    pub entity_id: String,
    pub rate: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaRenditionChangeParams {
    pub entity_id: String,
    pub bitrate: u64,
    pub width: u32,
    pub height: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,
}

pub(crate) fn entries() -> Vec<MethodInfo> {
    [
        READY.entries(),
        SIGN_IN.entries(),
        SIGN_OUT.entries(),
        START_CONTENT.entries(),
        STOP_CONTENT.entries(),
        PAGE.entries(),
        ACTION.entries(),
        ERROR.entries(),
        MEDIA_LOAD_START.entries(),
        MEDIA_PLAY.entries(),
        MEDIA_PLAYING.entries(),
        MEDIA_PAUSE.entries(),
        MEDIA_WAITING.entries(),
        MEDIA_PROGRESS.entries(),
        MEDIA_SEEKING.entries(),
        MEDIA_SEEKED.entries(),
        MEDIA_RATE_CHANGE.entries(),
        MEDIA_RENDITION_CHANGE.entries(),
        MEDIA_ENDED.entries(),
    ]
    .into_iter()
    .flatten()
    .collect()
}
