use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Nested `preferences` object of an incoming document.
///
/// Field order here is the key order of the canonical encoding:
/// `categories` first, then `likes`. `likes` is a `BTreeMap` so its keys
/// always serialize in the same order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferencesData {
    pub categories: Vec<String>,
    pub likes: BTreeMap<String, bool>,
}

/// Untrusted input document after its shape has been checked. Only
/// `core::schema` builds it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawPreferencesInput {
    pub address: String,
    pub unixtime: i64,
    pub preferences: PreferencesData,
}

/// Normalized record handed to storage. `preferences` holds the canonical
/// JSON text of [`PreferencesData`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefinedPreferencesRecord {
    pub address: String,
    pub unixtime: i64,
    pub preferences: String,
}

impl RefinedPreferencesRecord {
    pub fn decode_preferences(&self) -> serde_json::Result<PreferencesData> {
        serde_json::from_str(&self.preferences)
    }
}

#[derive(Debug, Clone)]
pub struct TransformResult {
    pub records: Vec<RefinedPreferencesRecord>,
    pub json_output: String,
}
