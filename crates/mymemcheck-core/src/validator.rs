use tracing::debug;

use crate::catalogs::REQUIRED_SETTINGS;
use crate::error::{Error, Result};
use crate::types::SettingMap;

/// Names from the required set that the option file does not define,
/// sorted and deduplicated.
pub fn missing_settings(settings: &SettingMap) -> Vec<String> {
    // REQUIRED_SETTINGS is a BTreeSet, so iteration is already sorted and unique.
    REQUIRED_SETTINGS
        .iter()
        .filter(|name| !settings.contains_key(**name))
        .map(|name| name.to_string())
        .collect()
}

/// Check that every required setting is present. Any value counts, even
/// one that coerces to zero.
pub fn validate(settings: &SettingMap) -> Result<()> {
    let missing = missing_settings(settings);
    if missing.is_empty() {
        return Ok(());
    }
    debug!(count = missing.len(), "required settings missing");
    Err(Error::MissingSettings(missing))
}
