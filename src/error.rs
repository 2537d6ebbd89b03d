//! Error types for rig construction, interaction and snapshotting.

use thiserror::Error;

use crate::joint::JointId;

/// Errors reported by the rig.
///
/// Apart from construction failures, every error leaves the rig exactly as
/// it was before the call.
#[derive(Debug, Error)]
pub enum RigError {
    /// Surface dimensions must be finite and strictly positive.
    #[error("invalid surface size {width}x{height}")]
    InvalidSurfaceSize { width: f32, height: f32 },

    /// A style call had no usable color.
    #[error("invalid color: {0:?}")]
    InvalidColor(String),

    /// A host event referenced a joint outside the fixed set.
    #[error("unknown joint: {0}")]
    UnknownJoint(String),

    /// A move or end event arrived while no drag was active.
    #[error("no drag in progress")]
    NotDragging,

    /// A drag start arrived while another joint was still being dragged.
    #[error("drag already in progress for {active}")]
    DragInProgress { active: JointId },

    /// A pointer event carried a NaN or infinite coordinate.
    #[error("non-finite pointer ({x}, {y})")]
    InvalidPointer { x: f32, y: f32 },

    #[error("invalid rig config: {0}")]
    InvalidConfig(String),

    /// The snapshot surface could not be rasterized.
    #[error("rasterization failed: {0}")]
    Raster(String),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
