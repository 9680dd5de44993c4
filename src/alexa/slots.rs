//! Slot value extraction

use super::request::Intent;

/// Canonical value of a slot.
///
/// Custom slot types resolve to the synonym's canonical name (lower-cased).
/// Built-in numeric slots carry no resolutions, so their raw value is used.
/// A missing slot or an unmatched resolution yields `""`.
pub fn synonym_value(intent: &Intent, key: &str) -> String {
    let Some(slot) = intent.slots.get(key) else {
        return String::new();
    };

    match &slot.resolutions {
        Some(resolutions) => resolutions
            .resolutions_per_authority
            .first()
            .and_then(|authority| authority.values.first())
            .map(|v| v.value.name.to_lowercase())
            .unwrap_or_default(),
        None => slot.value.clone().unwrap_or_default(),
    }
}
