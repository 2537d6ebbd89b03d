//! Limb segments and the joint/limb adjacency index.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::geometry::Segment;
use crate::joint::JointId;

/// Identity of one of the 10 fixed limb segments, in creation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "tsify", derive(tsify_next::Tsify))]
pub enum LimbId {
    HeadNeck,
    NeckLeftElbow,
    LeftElbowLeftHand,
    NeckRightElbow,
    RightElbowRightHand,
    NeckTorso,
    TorsoLeftKnee,
    LeftKneeLeftFoot,
    TorsoRightKnee,
    RightKneeRightFoot,
}

impl LimbId {
    pub const COUNT: usize = 10;

    pub const ALL: [LimbId; Self::COUNT] = [
        LimbId::HeadNeck,
        LimbId::NeckLeftElbow,
        LimbId::LeftElbowLeftHand,
        LimbId::NeckRightElbow,
        LimbId::RightElbowRightHand,
        LimbId::NeckTorso,
        LimbId::TorsoLeftKnee,
        LimbId::LeftKneeLeftFoot,
        LimbId::TorsoRightKnee,
        LimbId::RightKneeRightFoot,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// The (from, to) joints this limb connects.
    pub fn endpoints(self) -> (JointId, JointId) {
        use JointId::*;
        match self {
            LimbId::HeadNeck => (Head, Neck),
            LimbId::NeckLeftElbow => (Neck, LeftElbow),
            LimbId::LeftElbowLeftHand => (LeftElbow, LeftHand),
            LimbId::NeckRightElbow => (Neck, RightElbow),
            LimbId::RightElbowRightHand => (RightElbow, RightHand),
            LimbId::NeckTorso => (Neck, Torso),
            LimbId::TorsoLeftKnee => (Torso, LeftKnee),
            LimbId::LeftKneeLeftFoot => (LeftKnee, LeftFoot),
            LimbId::TorsoRightKnee => (Torso, RightKnee),
            LimbId::RightKneeRightFoot => (RightKnee, RightFoot),
        }
    }
}

impl fmt::Display for LimbId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (from, to) = self.endpoints();
        write!(f, "{from}/{to}")
    }
}

/// A limb with its current stroke color and geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct Limb {
    pub id: LimbId,
    pub endpoints: (JointId, JointId),
    pub segment: Segment,
    pub color: Color,
}

// ============================================================================
// Adjacency
// ============================================================================

/// Bidirectional joint/limb index.
///
/// Built once from the limb list; the topology never changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Adjacency {
    by_joint: [Vec<LimbId>; JointId::COUNT],
    by_limb: [(JointId, JointId); LimbId::COUNT],
}

impl Adjacency {
    /// Builds the index from a set of limbs.
    pub fn build(limbs: impl IntoIterator<Item = LimbId>) -> Self {
        let mut by_joint: [Vec<LimbId>; JointId::COUNT] = Default::default();
        let mut by_limb = [(JointId::Head, JointId::Head); LimbId::COUNT];

        for limb in limbs {
            let (from, to) = limb.endpoints();
            by_limb[limb.index()] = (from, to);
            by_joint[from.index()].push(limb);
            by_joint[to.index()].push(limb);
        }

        Self { by_joint, by_limb }
    }

    /// Limbs incident on `joint`, in creation order.
    pub fn limbs_of(&self, joint: JointId) -> &[LimbId] {
        &self.by_joint[joint.index()]
    }

    pub fn endpoints(&self, limb: LimbId) -> (JointId, JointId) {
        self.by_limb[limb.index()]
    }

    /// The endpoint of `limb` opposite `joint`, or `None` if `joint` is not
    /// an endpoint.
    pub fn other_end(&self, limb: LimbId, joint: JointId) -> Option<JointId> {
        match self.endpoints(limb) {
            (from, to) if from == joint => Some(to),
            (from, to) if to == joint => Some(from),
            _ => None,
        }
    }

    /// Number of limbs incident on `joint`.
    pub fn degree(&self, joint: JointId) -> usize {
        self.limbs_of(joint).len()
    }
}

impl Default for Adjacency {
    fn default() -> Self {
        Self::build(LimbId::ALL)
    }
}
