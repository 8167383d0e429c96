//! User profile domain type.
//!
//! Written by the external auth flow; the cart only reads it for a
//! greeting. Absence and malformed data are both valid (treated as no
//! profile), so every field beyond the display name is optional and
//! unknown fields are ignored.

use serde::{Deserialize, Serialize};

/// Minimal user record persisted under the `userData` key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// Display name used for the greeting.
    pub first_name: String,
    /// Email, when the auth flow recorded one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl UserProfile {
    /// Create a profile with just a display name.
    #[must_use]
    pub fn new(first_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            email: None,
        }
    }
}
