use crate::core::schema::validate_preferences_input;
use crate::domain::model::{PreferencesData, RefinedPreferencesRecord};
use crate::domain::ports::DataTransformer;
use crate::utils::error::Result;

/// Canonical text form of the preferences object: compact JSON,
/// `categories` before `likes`, `likes` keys sorted.
pub fn encode_preferences(preferences: &PreferencesData) -> Result<String> {
    Ok(serde_json::to_string(preferences)?)
}

/// Validates a raw preferences document and maps it to one refined record.
#[derive(Debug, Clone, Copy, Default)]
pub struct PreferencesTransformer;

impl PreferencesTransformer {
    pub fn new() -> Self {
        Self
    }
}

impl DataTransformer for PreferencesTransformer {
    fn transform(&self, data: &serde_json::Value) -> Result<Vec<RefinedPreferencesRecord>> {
        let unrefined = validate_preferences_input(data)?;

        let record = RefinedPreferencesRecord {
            preferences: encode_preferences(&unrefined.preferences)?,
            address: unrefined.address,
            unixtime: unrefined.unixtime,
        };

        tracing::debug!(
            "Refined preferences for {} ({} categories, {} likes)",
            record.address,
            unrefined.preferences.categories.len(),
            unrefined.preferences.likes.len()
        );

        Ok(vec![record])
    }
}
