//! climb-rig: a draggable stick-figure rig for annotating climbing photos
//!
//! This crate provides the rig engine behind a "log a climb" screen: an
//! 11-joint, 10-limb stick figure laid out on a host surface, moved by
//! pointer drags, styled by class-wide joint and limb colors, and finally
//! flattened together with the route photo into a single image.
//!
//! # Example
//!
//! ```
//! use climb_rig::{Color, JointId, Point, Rig, StyleTarget};
//!
//! let mut rig = Rig::new(400.0, 800.0).unwrap();
//!
//! // Host forwards a drag on the left hand
//! let hand = rig.position(JointId::LeftHand);
//! rig.on_drag_start(JointId::LeftHand, hand).unwrap();
//! rig.on_drag_move(hand + Point::new(-20.0, 10.0)).unwrap();
//! rig.on_drag_end(hand + Point::new(-30.0, 15.0)).unwrap();
//!
//! // Style selection from a color picker
//! rig.apply_style(StyleTarget::Limbs, Some(Color::BLUE)).unwrap();
//!
//! // Draw it
//! for primitive in rig.render() {
//!     // hand each primitive to the host's drawing layer
//!     let _ = primitive;
//! }
//! ```
//!
//! # Snapshots
//!
//! A [`Snapshotter`] composites the figure over a backdrop photo:
//!
//! ```
//! use climb_rig::{Rig, Snapshotter};
//! use image::{Rgba, RgbaImage};
//!
//! let rig = Rig::new(200.0, 400.0).unwrap();
//! let mut snapshotter = Snapshotter::new();
//! snapshotter.set_photo(Some(RgbaImage::from_pixel(50, 50, Rgba([90, 90, 90, 255]))));
//!
//! let image = snapshotter.rasterize(&rig).unwrap();
//! assert_eq!(image.dimensions(), (200, 400));
//! ```

mod color;
mod config;
mod error;
mod geometry;
mod gesture;
mod joint;
mod limb;
mod log;
mod profile;
mod render;
mod rig;
mod snapshot;

pub use color::Color;
pub use config::RigConfig;
pub use error::RigError;
pub use geometry::{Point, Segment, SurfaceSize};
pub use gesture::{DragState, JointMove, PointerEvent};
pub use joint::{Joint, JointId, JointKind};
pub use limb::{Adjacency, Limb, LimbId};
pub use profile::StyleProfile;
#[cfg(feature = "tsify")]
pub use render::primitives_to_js;
pub use render::Primitive;
pub use rig::{Configurable, Rig, StyleTarget};
pub use snapshot::{
    BackdropConfig, CacheKey, FigureConfig, Layer, LayerConfig, LayerEffect, Placed, Snapshotter,
};
