//! Accessibility module (`accessibility`).

use crate::api::Property;
use crate::registry::MethodInfo;
use serde::{Deserialize, Serialize};

const MODULE: &str = "accessibility";

pub const CLOSED_CAPTIONS_SETTINGS: Property<ClosedCaptionsSettings> =
    Property::new(MODULE, "closedCaptionsSettings");
pub const VOICE_GUIDANCE_SETTINGS: Property<VoiceGuidanceSettings> =
    Property::new(MODULE, "voiceGuidanceSettings");
pub const AUDIO_DESCRIPTION_SETTINGS: Property<AudioDescriptionSettings> =
    Property::new(MODULE, "audioDescriptionSettings");

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClosedCaptionsSettings {
    pub enabled: bool,
    #[serde(default)]
    pub styles: ClosedCaptionsStyles,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_languages: Option<Vec<String>>,
}

/// Caption rendering styles; every field is optional on the wire
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClosedCaptionsStyles {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_edge: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_edge_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_opacity: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_opacity: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_align: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_align_vertical: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub window_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub window_opacity: Option<u8>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoiceGuidanceSettings {
    pub enabled: bool,
    /// Speech rate, 0.5 to 2.0
    pub speed: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioDescriptionSettings {
    pub enabled: bool,
}

pub(crate) fn entries() -> Vec<MethodInfo> {
    [
        CLOSED_CAPTIONS_SETTINGS.entries(),
        VOICE_GUIDANCE_SETTINGS.entries(),
        AUDIO_DESCRIPTION_SETTINGS.entries(),
    ]
    .into_iter()
    .flatten()
    .collect()
}
