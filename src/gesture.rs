//! Drag state machine types and host pointer events.

use serde::{Deserialize, Serialize};

use crate::geometry::Point;
use crate::joint::JointId;
use crate::limb::LimbId;

/// State of the single active drag gesture.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        joint: JointId,
        /// Raw pointer position of the previous event. Deltas are always
        /// measured from here, even when the joint was clamped.
        last_pointer: Point,
    },
}

impl DragState {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// The joint being dragged, if any.
    pub fn active_joint(&self) -> Option<JointId> {
        match self {
            Self::Idle => None,
            Self::Dragging { joint, .. } => Some(*joint),
        }
    }
}

/// A pointer event as delivered by the host surface.
///
/// `Start` carries a raw joint index because hosts identify joints by the
/// order they were created in; an out-of-range index is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "phase")]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub enum PointerEvent {
    Start { joint: usize, position: Point },
    Move { position: Point },
    End { position: Point },
}

/// What a move or end event did to the rig.
#[derive(Debug, Clone, PartialEq)]
pub struct JointMove {
    pub joint: JointId,
    /// The committed (clamped) position.
    pub position: Point,
    /// True if the proposed position was outside the drag bounds.
    pub clamped: bool,
    /// Limbs whose geometry was recomputed.
    pub limbs: Vec<LimbId>,
}
