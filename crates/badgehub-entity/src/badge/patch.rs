//! Sparse updates to the mutable badge fields.

use serde::{Deserialize, Deserializer, Serialize};

/// A partial update to a badge.
///
/// Each field distinguishes "absent" (`None`, leave the stored value alone)
/// from "present" (`Some(value)`), where a JSON `null` clears the column.
/// Only these five fields are mutable; anything else in an update body is
/// ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BadgePatch {
    /// New display name.
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub badge_name: Option<Option<String>>,
    /// New description.
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
    /// New issuer name.
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub issuer_name: Option<Option<String>>,
    /// New issuer URL.
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub issuer_url: Option<Option<String>>,
    /// New credential provider.
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub credential_provider: Option<Option<String>>,
}

impl BadgePatch {
    /// Whether the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self.assignments().is_empty()
    }

    /// `(column, value)` pairs for every field present in the patch.
    pub fn assignments(&self) -> Vec<(&'static str, Option<&str>)> {
        [
            ("badge_name", &self.badge_name),
            ("description", &self.description),
            ("issuer_name", &self.issuer_name),
            ("issuer_url", &self.issuer_url),
            ("credential_provider", &self.credential_provider),
        ]
        .into_iter()
        .filter_map(|(column, field)| field.as_ref().map(|value| (column, value.as_deref())))
        .collect()
    }
}

/// Marks a field as present whenever its key appears, even with a `null` value.
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}
