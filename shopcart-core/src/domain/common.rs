//! Common helpers for domain models

use serde::{Deserialize, Deserializer};

/// Deserialize a present field into `Some`, including an explicit `null`.
///
/// Paired with `#[serde(default)]` on an `Option<Option<T>>` field this keeps
/// "field omitted" (`None`) apart from "field set to null" (`Some(None)`).
pub fn deserialize_some<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// Reject strings that are empty once surrounding whitespace is removed
pub fn validate_not_blank(value: &str) -> Result<(), validator::ValidationError> {
    if value.trim().is_empty() {
        return Err(validator::ValidationError::new("blank"));
    }
    Ok(())
}
