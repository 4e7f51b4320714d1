//! Localization module (`localization`).

use crate::api::{Method, Property, ReadOnly, ReadWrite};
use crate::registry::MethodInfo;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

const MODULE: &str = "localization";

/// Latitude and longitude, sent as a two-element array
pub type LatLon = (f64, f64);

pub const LOCALITY: Property<String, ReadWrite> = Property::new(MODULE, "locality");
pub const POSTAL_CODE: Property<String, ReadWrite> = Property::new(MODULE, "postalCode");
pub const COUNTRY_CODE: Property<String, ReadWrite> = Property::new(MODULE, "countryCode");
pub const LANGUAGE: Property<String, ReadWrite> = Property::new(MODULE, "language");
pub const LOCALE: Property<String, ReadWrite> = Property::new(MODULE, "locale");
pub const TIME_ZONE: Property<String, ReadWrite> = Property::new(MODULE, "timeZone");
pub const PREFERRED_AUDIO_LANGUAGES: Property<Vec<String>, ReadWrite> =
    Property::new(MODULE, "preferredAudioLanguages");
pub const LATLON: Property<LatLon, ReadOnly> = Property::new(MODULE, "latlon");

pub const ADDITIONAL_INFO: Method<(), HashMap<String, String>> =
    Method::new(MODULE, "additionalInfo");
pub const ADD_ADDITIONAL_INFO: Method<AdditionalInfoEntry, ()> =
    Method::new(MODULE, "addAdditionalInfo");
pub const REMOVE_ADDITIONAL_INFO: Method<AdditionalInfoKey, ()> =
    Method::new(MODULE, "removeAdditionalInfo");

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdditionalInfoEntry {
    pub key: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdditionalInfoKey {
    pub key: String,
}

pub(crate) fn entries() -> Vec<MethodInfo> {
    [
        LOCALITY.entries(),
        POSTAL_CODE.entries(),
        COUNTRY_CODE.entries(),
        LANGUAGE.entries(),
        LOCALE.entries(),
        TIME_ZONE.entries(),
        PREFERRED_AUDIO_LANGUAGES.entries(),
        LATLON.entries(),
        ADDITIONAL_INFO.entries(),
        ADD_ADDITIONAL_INFO.entries(),
        REMOVE_ADDITIONAL_INFO.entries(),
    ]
    .into_iter()
    .flatten()
    .collect()
}
