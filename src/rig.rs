//! The skeletal rig engine.

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::config::RigConfig;
use crate::error::RigError;
use crate::geometry::{Point, Segment, SurfaceSize};
use crate::gesture::{DragState, JointMove, PointerEvent};
use crate::joint::{Joint, JointId, JointKind};
use crate::limb::{Adjacency, Limb, LimbId};
use crate::log;
use crate::profile::StyleProfile;
use crate::render::Primitive;

// ============================================================================
// Configurable Trait
// ============================================================================

/// Trait for types whose style can be driven by a [`StyleProfile`].
pub trait Configurable {
    /// Applies a profile's settings to this instance.
    fn apply_profile(&mut self, profile: &StyleProfile);

    /// Exports the current settings as a profile.
    fn export_profile(&self) -> StyleProfile;
}

/// Which class of figure elements a style change targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub enum StyleTarget {
    Joints,
    Limbs,
}

// ============================================================================
// Rig
// ============================================================================

/// An interactive stick figure living on a bounded host surface.
///
/// The rig owns 11 joints and the 10 limbs between them. Joints move only
/// through the drag state machine ([`on_drag_start`](Self::on_drag_start),
/// [`on_drag_move`](Self::on_drag_move), [`on_drag_end`](Self::on_drag_end)),
/// and every move recomputes exactly the limbs incident on the moved joint.
///
/// # Example
///
/// ```
/// use climb_rig::{Color, JointId, Point, Rig};
///
/// let mut rig = Rig::new(400.0, 800.0).unwrap();
/// let head = rig.position(JointId::Head);
///
/// rig.on_drag_start(JointId::Head, head).unwrap();
/// rig.on_drag_end(head + Point::new(50.0, 50.0)).unwrap();
/// assert_eq!(rig.position(JointId::Head), Point::new(250.0, 130.0));
///
/// rig.set_limb_color(Color::BLUE);
/// let primitives = rig.render();
/// assert_eq!(primitives.len(), 21);
/// ```
///
/// The rig is single-threaded: callers deliver events one at a time and in
/// order.
#[derive(Debug, Clone)]
pub struct Rig {
    surface: SurfaceSize,
    joint_radius: f32,
    line_width: f32,
    joints: Vec<Joint>,
    limbs: Vec<Limb>,
    adjacency: Adjacency,
    joint_color: Color,
    limb_color: Color,
    drag: DragState,
}

impl Rig {
    /// Creates a rig with the default configuration.
    pub fn new(width: f32, height: f32) -> Result<Self, RigError> {
        Self::with_config(width, height, &RigConfig::default())
    }

    /// Creates a rig laid out on a `width` x `height` surface.
    ///
    /// Joints are placed at fixed percentages of the surface dimensions, so
    /// the figure scales with the region it is placed in.
    pub fn with_config(width: f32, height: f32, config: &RigConfig) -> Result<Self, RigError> {
        let surface = SurfaceSize::new(width, height);
        if !surface.is_valid() {
            return Err(RigError::InvalidSurfaceSize { width, height });
        }
        config.validate()?;

        let joints: Vec<Joint> = JointId::ALL
            .into_iter()
            .map(|id| {
                let (px, py) = id.layout_percent();
                let kind = match config.glyphs.get(&id) {
                    Some(glyph) => JointKind::Glyph(glyph.clone()),
                    None => JointKind::Disc(config.joint_color),
                };
                Joint::new(id, surface.at_percent(px, py), kind)
            })
            .collect();

        let limbs: Vec<Limb> = LimbId::ALL
            .into_iter()
            .map(|id| {
                let (from, to) = id.endpoints();
                Limb {
                    id,
                    endpoints: (from, to),
                    segment: Segment::new(
                        joints[from.index()].position,
                        joints[to.index()].position,
                    ),
                    color: config.limb_color,
                }
            })
            .collect();

        let adjacency = Adjacency::build(limbs.iter().map(|l| l.id));

        log::debug!(width, height, "rig created");

        Ok(Self {
            surface,
            joint_radius: config.joint_radius(),
            line_width: config.line_width,
            joints,
            limbs,
            adjacency,
            joint_color: config.joint_color,
            limb_color: config.limb_color,
            drag: DragState::Idle,
        })
    }

    // ---- Accessors ----

    pub fn surface(&self) -> SurfaceSize {
        self.surface
    }

    pub fn joint_radius(&self) -> f32 {
        self.joint_radius
    }

    pub fn line_width(&self) -> f32 {
        self.line_width
    }

    pub fn joints(&self) -> &[Joint] {
        &self.joints
    }

    pub fn limbs(&self) -> &[Limb] {
        &self.limbs
    }

    pub fn joint(&self, id: JointId) -> &Joint {
        &self.joints[id.index()]
    }

    pub fn limb(&self, id: LimbId) -> &Limb {
        &self.limbs[id.index()]
    }

    /// Current position of a joint.
    pub fn position(&self, id: JointId) -> Point {
        self.joint(id).position
    }

    pub fn adjacency(&self) -> &Adjacency {
        &self.adjacency
    }

    pub fn joint_color(&self) -> Color {
        self.joint_color
    }

    pub fn limb_color(&self) -> Color {
        self.limb_color
    }

    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    /// Finds the topmost joint whose square frame contains `point`.
    ///
    /// Later joints are drawn above earlier ones, so they win ties.
    pub fn joint_at(&self, point: Point) -> Option<JointId> {
        let r = self.joint_radius;
        self.joints
            .iter()
            .rev()
            .find(|j| (point.x - j.position.x).abs() <= r && (point.y - j.position.y).abs() <= r)
            .map(|j| j.id)
    }

    // ---- Drag state machine ----

    /// Begins dragging `joint` with the pointer at `pointer`.
    ///
    /// Only valid while idle. A start that arrives while another drag is
    /// active is rejected and the active drag continues.
    pub fn on_drag_start(&mut self, joint: JointId, pointer: Point) -> Result<(), RigError> {
        check_pointer(pointer)?;
        if let Some(active) = self.drag.active_joint() {
            log::warn!(%joint, %active, "drag start ignored, drag in progress");
            return Err(RigError::DragInProgress { active });
        }

        log::debug!(%joint, x = pointer.x, y = pointer.y, "drag start");
        self.drag = DragState::Dragging {
            joint,
            last_pointer: pointer,
        };
        Ok(())
    }

    /// Moves the dragged joint by the pointer's delta since the last event.
    ///
    /// The proposed position is clamped per axis to
    /// `[radius, dimension - radius]`. The reference pointer always advances
    /// to the raw `pointer`, so a clamped joint does not catch up later.
    pub fn on_drag_move(&mut self, pointer: Point) -> Result<JointMove, RigError> {
        let DragState::Dragging { joint, last_pointer } = self.drag else {
            log::warn!("drag move ignored, not dragging");
            return Err(RigError::NotDragging);
        };
        check_pointer(pointer)?;

        let delta = pointer - last_pointer;
        let proposed = self.position(joint) + delta;
        let position = self.surface.clamp_center(proposed, self.joint_radius);

        self.joints[joint.index()].position = position;
        self.drag = DragState::Dragging {
            joint,
            last_pointer: pointer,
        };
        let limbs = self.refresh_limbs(joint);

        Ok(JointMove {
            joint,
            position,
            clamped: position != proposed,
            limbs,
        })
    }

    /// Applies a final move and returns to idle.
    pub fn on_drag_end(&mut self, pointer: Point) -> Result<JointMove, RigError> {
        let moved = self.on_drag_move(pointer)?;
        self.drag = DragState::Idle;
        log::debug!(joint = %moved.joint, x = moved.position.x, y = moved.position.y, "drag end");
        Ok(moved)
    }

    /// Dispatches a raw host pointer event.
    ///
    /// Returns the resulting move for `Move`/`End`, `None` for `Start`.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> Result<Option<JointMove>, RigError> {
        match event {
            PointerEvent::Start { joint, position } => {
                let joint = JointId::from_index(joint).inspect_err(|_| {
                    log::warn!(index = joint, "drag start for unknown joint ignored");
                })?;
                self.on_drag_start(joint, position).map(|_| None)
            }
            PointerEvent::Move { position } => self.on_drag_move(position).map(Some),
            PointerEvent::End { position } => self.on_drag_end(position).map(Some),
        }
    }

    /// Recomputes the geometry of every limb incident on `joint`.
    fn refresh_limbs(&mut self, joint: JointId) -> Vec<LimbId> {
        let incident = self.adjacency.limbs_of(joint).to_vec();
        for &limb in &incident {
            let (from, to) = self.adjacency.endpoints(limb);
            self.limbs[limb.index()].segment =
                Segment::new(self.joints[from.index()].position, self.joints[to.index()].position);
        }
        incident
    }

    // ---- Style ----

    /// Sets the shared joint color and recolors every disc joint.
    ///
    /// Glyph joints and limbs are unaffected.
    pub fn set_joint_color(&mut self, color: Color) {
        self.joint_color = color;
        for joint in &mut self.joints {
            joint.recolor(color);
        }
    }

    /// Sets the shared limb color and recolors every limb.
    pub fn set_limb_color(&mut self, color: Color) {
        self.limb_color = color;
        for limb in &mut self.limbs {
            limb.color = color;
        }
    }

    /// Applies a color picked for a whole class of elements.
    ///
    /// `None` is rejected with [`RigError::InvalidColor`] and the current
    /// style is kept.
    pub fn apply_style(&mut self, target: StyleTarget, color: Option<Color>) -> Result<(), RigError> {
        let Some(color) = color else {
            log::warn!(?target, "style change without a color ignored");
            return Err(RigError::InvalidColor(String::new()));
        };
        match target {
            StyleTarget::Joints => self.set_joint_color(color),
            StyleTarget::Limbs => self.set_limb_color(color),
        }
        Ok(())
    }

    /// Like [`apply_style`](Self::apply_style) with a hex color string.
    pub fn apply_style_hex(&mut self, target: StyleTarget, hex: &str) -> Result<(), RigError> {
        let color = Color::from_hex(hex)?;
        self.apply_style(target, Some(color))
    }

    // ---- Rendering ----

    /// Projects the rig into drawable primitives.
    ///
    /// Joints come first in creation order, then limbs in creation order.
    /// This has no side effects and may be called mid-drag.
    pub fn render(&self) -> Vec<Primitive> {
        let size = self.joint_radius * 2.0;
        let joints = self.joints.iter().map(|joint| match &joint.kind {
            JointKind::Disc(color) => Primitive::Disc {
                joint: joint.id,
                center: joint.position,
                radius: self.joint_radius,
                color: *color,
            },
            JointKind::Glyph(symbol) => Primitive::Glyph {
                joint: joint.id,
                center: joint.position,
                size,
                symbol: symbol.clone(),
            },
        });
        let limbs = self.limbs.iter().map(|limb| Primitive::Line {
            limb: limb.id,
            segment: limb.segment,
            width: self.line_width,
            color: limb.color,
        });
        joints.chain(limbs).collect()
    }
}

/// Drops pointers with NaN or infinite coordinates before they touch state.
fn check_pointer(pointer: Point) -> Result<(), RigError> {
    if pointer.is_finite() {
        Ok(())
    } else {
        log::warn!(x = pointer.x, y = pointer.y, "non-finite pointer ignored");
        Err(RigError::InvalidPointer {
            x: pointer.x,
            y: pointer.y,
        })
    }
}

impl Configurable for Rig {
    /// Applies the profile's colors. Absent fields keep the current color.
    ///
    /// # Example
    ///
    /// ```
    /// use climb_rig::{Color, Configurable, Rig, StyleProfile};
    ///
    /// let mut rig = Rig::new(300.0, 600.0).unwrap();
    /// rig.apply_profile(&StyleProfile::new().with_limb_color(Color::BLUE));
    ///
    /// assert_eq!(rig.limb_color(), Color::BLUE);
    /// assert_eq!(rig.joint_color(), Color::RED);
    /// ```
    fn apply_profile(&mut self, profile: &StyleProfile) {
        if let Some(color) = profile.joint_color {
            self.set_joint_color(color);
        }
        if let Some(color) = profile.limb_color {
            self.set_limb_color(color);
        }
    }

    fn export_profile(&self) -> StyleProfile {
        StyleProfile {
            joint_color: Some(self.joint_color),
            limb_color: Some(self.limb_color),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
