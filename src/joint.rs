//! Joints of the stick figure.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::error::RigError;
use crate::geometry::Point;

/// Identity of one of the 11 fixed joints, in creation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "tsify", derive(tsify_next::Tsify))]
pub enum JointId {
    Head,
    Neck,
    LeftElbow,
    LeftHand,
    RightElbow,
    RightHand,
    Torso,
    LeftKnee,
    LeftFoot,
    RightKnee,
    RightFoot,
}

impl JointId {
    pub const COUNT: usize = 11;

    /// All joints in creation order.
    pub const ALL: [JointId; Self::COUNT] = [
        JointId::Head,
        JointId::Neck,
        JointId::LeftElbow,
        JointId::LeftHand,
        JointId::RightElbow,
        JointId::RightHand,
        JointId::Torso,
        JointId::LeftKnee,
        JointId::LeftFoot,
        JointId::RightKnee,
        JointId::RightFoot,
    ];

    /// Position in creation order.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Result<Self, RigError> {
        Self::ALL
            .get(index)
            .copied()
            .ok_or_else(|| RigError::UnknownJoint(index.to_string()))
    }

    /// Kebab-case name, e.g. `left-elbow`.
    pub fn name(self) -> &'static str {
        match self {
            JointId::Head => "head",
            JointId::Neck => "neck",
            JointId::LeftElbow => "left-elbow",
            JointId::LeftHand => "left-hand",
            JointId::RightElbow => "right-elbow",
            JointId::RightHand => "right-hand",
            JointId::Torso => "torso",
            JointId::LeftKnee => "left-knee",
            JointId::LeftFoot => "left-foot",
            JointId::RightKnee => "right-knee",
            JointId::RightFoot => "right-foot",
        }
    }

    /// Layout position as percentages of surface (width, height).
    pub fn layout_percent(self) -> (f32, f32) {
        match self {
            JointId::Head => (50.0, 10.0),
            JointId::Neck => (50.0, 15.0),
            JointId::LeftElbow => (40.0, 20.0),
            JointId::LeftHand => (30.0, 25.0),
            JointId::RightElbow => (60.0, 20.0),
            JointId::RightHand => (70.0, 25.0),
            JointId::Torso => (50.0, 35.0),
            JointId::LeftKnee => (45.0, 50.0),
            JointId::LeftFoot => (40.0, 60.0),
            JointId::RightKnee => (55.0, 50.0),
            JointId::RightFoot => (60.0, 60.0),
        }
    }

    /// The glyph this joint carries in the default figure, if any.
    pub fn default_glyph(self) -> Option<&'static str> {
        match self {
            JointId::Head => Some("😀"),
            JointId::LeftHand => Some("🖐️"),
            JointId::RightHand => Some("✋"),
            JointId::LeftFoot | JointId::RightFoot => Some("🦶"),
            _ => None,
        }
    }
}

impl TryFrom<usize> for JointId {
    type Error = RigError;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        Self::from_index(index)
    }
}

impl FromStr for JointId {
    type Err = RigError;

    /// Accepts `left-elbow`, `left_elbow`, `LeftElbow` and `leftelbow`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| *c != '-' && *c != '_' && !c.is_whitespace())
            .flat_map(char::to_lowercase)
            .collect();

        Self::ALL
            .into_iter()
            .find(|id| id.name().replace('-', "") == normalized)
            .ok_or_else(|| RigError::UnknownJoint(s.to_string()))
    }
}

impl fmt::Display for JointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How a joint is drawn.
///
/// Glyph joints are drawn with a fixed decorative symbol and ignore joint
/// color changes; for connectivity and dragging they behave like discs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind", content = "value")]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub enum JointKind {
    Disc(Color),
    Glyph(String),
}

impl JointKind {
    pub fn is_disc(&self) -> bool {
        matches!(self, Self::Disc(_))
    }

    pub fn is_glyph(&self) -> bool {
        matches!(self, Self::Glyph(_))
    }

    /// The disc color, or `None` for glyph joints.
    pub fn color(&self) -> Option<Color> {
        match self {
            Self::Disc(color) => Some(*color),
            Self::Glyph(_) => None,
        }
    }
}

/// A joint with its current position and visual kind.
#[derive(Debug, Clone, PartialEq)]
pub struct Joint {
    pub id: JointId,
    pub position: Point,
    pub kind: JointKind,
}

impl Joint {
    pub fn new(id: JointId, position: Point, kind: JointKind) -> Self {
        Self { id, position, kind }
    }

    /// Recolors a disc joint. Returns false for glyph joints.
    pub(crate) fn recolor(&mut self, color: Color) -> bool {
        match &mut self.kind {
            JointKind::Disc(current) => {
                *current = color;
                true
            }
            JointKind::Glyph(_) => false,
        }
    }
}
