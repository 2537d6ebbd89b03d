//! Drawable primitives produced by [`Rig::render`](crate::Rig::render).

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::geometry::{Point, Segment};
use crate::joint::JointId;
use crate::limb::LimbId;

/// One drawable element of the figure.
///
/// Joints are drawn above limbs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "type")]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "tsify", derive(tsify_next::Tsify))]
#[cfg_attr(feature = "tsify", tsify(into_wasm_abi, from_wasm_abi))]
pub enum Primitive {
    /// A filled circle.
    Disc {
        joint: JointId,
        center: Point,
        radius: f32,
        #[cfg_attr(feature = "tsify", tsify(type = "string"))]
        color: Color,
    },
    /// A decorative symbol centered in a square of side `size`.
    Glyph {
        joint: JointId,
        center: Point,
        size: f32,
        symbol: String,
    },
    /// A stroked line segment.
    Line {
        limb: LimbId,
        segment: Segment,
        width: f32,
        #[cfg_attr(feature = "tsify", tsify(type = "string"))]
        color: Color,
    },
}

impl Primitive {
    pub fn is_joint(&self) -> bool {
        matches!(self, Self::Disc { .. } | Self::Glyph { .. })
    }

    pub fn is_limb(&self) -> bool {
        matches!(self, Self::Line { .. })
    }

    /// The primitive's fill or stroke color. Glyphs have none.
    pub fn color(&self) -> Option<Color> {
        match self {
            Self::Disc { color, .. } | Self::Line { color, .. } => Some(*color),
            Self::Glyph { .. } => None,
        }
    }
}

/// Converts primitives into a JS value for web hosts.
#[cfg(feature = "tsify")]
pub fn primitives_to_js(
    primitives: &[Primitive],
) -> Result<wasm_bindgen::JsValue, serde_wasm_bindgen::Error> {
    serde_wasm_bindgen::to_value(primitives)
}
