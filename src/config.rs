//! Construction-time rig configuration.
//!
//! A [`RigConfig`] fixes the figure's sizes, its default style and which
//! joints are drawn as glyphs. Every field has a default, so an empty JSON
//! object is a valid config:
//!
//! ```
//! use climb_rig::RigConfig;
//!
//! let config = RigConfig::from_json(r##"{ "jointSize": 30.0, "limbColor": "#333333" }"##).unwrap();
//! assert_eq!(config.joint_size, 30.0);
//! assert_eq!(config.line_width, 2.0);
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::error::RigError;
use crate::joint::JointId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub struct RigConfig {
    /// Side length of a joint's square frame. The drag bounds inset is half
    /// of this.
    pub joint_size: f32,

    /// Limb stroke width.
    pub line_width: f32,

    /// Initial color of every disc joint.
    pub joint_color: Color,

    /// Initial color of every limb.
    pub limb_color: Color,

    /// Joints drawn as a fixed glyph instead of a colored disc.
    pub glyphs: BTreeMap<JointId, String>,
}

impl Default for RigConfig {
    fn default() -> Self {
        Self {
            joint_size: 25.0,
            line_width: 2.0,
            joint_color: Color::RED,
            limb_color: Color::BLACK,
            glyphs: JointId::ALL
                .into_iter()
                .filter_map(|id| id.default_glyph().map(|g| (id, g.to_string())))
                .collect(),
        }
    }
}

impl RigConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// A config where every joint is a plain disc.
    pub fn without_glyphs() -> Self {
        Self {
            glyphs: BTreeMap::new(),
            ..Self::default()
        }
    }

    pub fn with_joint_size(mut self, size: f32) -> Self {
        self.joint_size = size;
        self
    }

    pub fn with_line_width(mut self, width: f32) -> Self {
        self.line_width = width;
        self
    }

    pub fn with_glyph(mut self, joint: JointId, glyph: impl Into<String>) -> Self {
        self.glyphs.insert(joint, glyph.into());
        self
    }

    /// Half the joint size.
    pub fn joint_radius(&self) -> f32 {
        self.joint_size / 2.0
    }

    /// Checks the numeric fields.
    pub fn validate(&self) -> Result<(), RigError> {
        if !(self.joint_size.is_finite() && self.joint_size > 0.0) {
            return Err(RigError::InvalidConfig(format!(
                "joint size must be positive, got {}",
                self.joint_size
            )));
        }
        if !(self.line_width.is_finite() && self.line_width > 0.0) {
            return Err(RigError::InvalidConfig(format!(
                "line width must be positive, got {}",
                self.line_width
            )));
        }
        if let Some((joint, _)) = self.glyphs.iter().find(|(_, g)| g.is_empty()) {
            return Err(RigError::InvalidConfig(format!("empty glyph for {joint}")));
        }
        Ok(())
    }

    pub fn to_json(&self) -> Result<String, RigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parses and validates a config.
    pub fn from_json(json: &str) -> Result<Self, RigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
}
