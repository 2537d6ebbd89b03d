//! Serializable style profile.
//!
//! A [`StyleProfile`] captures the class-wide joint and limb colors in a
//! JSON-friendly form, so a host can remember a user's picks between
//! editing sessions. Joint positions are never part of a profile.
//!
//! # Example
//!
//! ```
//! use climb_rig::{Color, StyleProfile};
//!
//! let profile = StyleProfile::new()
//!     .with_joint_color(Color::BLUE)
//!     .with_limb_color(Color::from_hex("#333333").unwrap());
//!
//! let json = profile.to_json().unwrap();
//! let restored = StyleProfile::from_json(&json).unwrap();
//! assert_eq!(restored, profile);
//! ```

use serde::{Deserialize, Serialize};

use crate::color::Color;

/// Class-wide colors for a rig.
///
/// # JSON Format
///
/// ```json
/// {
///   "jointColor": "#0000ff",
///   "limbColor": "#333333"
/// }
/// ```
///
/// A missing field means "leave that class as it is".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "tsify", derive(tsify_next::Tsify))]
#[cfg_attr(feature = "tsify", tsify(into_wasm_abi, from_wasm_abi))]
pub struct StyleProfile {
    /// Color of every disc joint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[cfg_attr(feature = "tsify", tsify(optional, type = "string"))]
    pub joint_color: Option<Color>,

    /// Color of every limb.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[cfg_attr(feature = "tsify", tsify(optional, type = "string"))]
    pub limb_color: Option<Color>,
}

impl StyleProfile {
    /// Creates an empty profile.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_joint_color(mut self, color: Color) -> Self {
        self.joint_color = Some(color);
        self
    }

    pub fn with_limb_color(mut self, color: Color) -> Self {
        self.limb_color = Some(color);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.joint_color.is_none() && self.limb_color.is_none()
    }

    /// Serializes the profile to a JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serializes the profile to a pretty-printed JSON string.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserializes a profile from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
