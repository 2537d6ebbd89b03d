//! Geometry types for host-surface coordinates.
//!
//! All positions are expressed in the host surface's coordinate space:
//! origin at the top-left corner, x growing right, y growing down.

use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

/// A point (or delta) in surface coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "tsify", derive(tsify_next::Tsify))]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    /// Creates a new point.
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns true if both coordinates are finite.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl From<(f32, f32)> for Point {
    fn from((x, y): (f32, f32)) -> Self {
        Self::new(x, y)
    }
}

/// The size of the host drawing region the rig lives in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub struct SurfaceSize {
    pub width: f32,
    pub height: f32,
}

impl SurfaceSize {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Returns true if both dimensions are finite and strictly positive.
    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    /// Returns the point at the given percentages of width and height.
    pub fn at_percent(&self, px: f32, py: f32) -> Point {
        Point::new(self.width * px / 100.0, self.height * py / 100.0)
    }

    /// Clamps a center point so a square of half-size `radius` stays inside.
    ///
    /// Each axis is clamped independently to `[radius, dimension - radius]`.
    /// When the surface is narrower than the square, the axis collapses to
    /// `radius` instead of panicking like `f32::clamp` would.
    pub fn clamp_center(&self, center: Point, radius: f32) -> Point {
        Point::new(
            clamp_axis(center.x, radius, self.width),
            clamp_axis(center.y, radius, self.height),
        )
    }

    /// Pixel dimensions of a raster covering this surface.
    pub fn pixel_dimensions(&self) -> (u32, u32) {
        (self.width.ceil() as u32, self.height.ceil() as u32)
    }
}

fn clamp_axis(value: f32, radius: f32, dimension: f32) -> f32 {
    radius.max(value.min(dimension - radius))
}

/// A straight line segment between two points.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "tsify", derive(tsify_next::Tsify))]
pub struct Segment {
    pub from: Point,
    pub to: Point,
}

impl Segment {
    pub fn new(from: Point, to: Point) -> Self {
        Self { from, to }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_arithmetic() {
        let a = Point::new(10.0, 20.0);
        let b = Point::new(2.5, -5.0);
        assert_eq!(a + b, Point::new(12.5, 15.0));
        assert_eq!(a - b, Point::new(7.5, 25.0));
    }

    #[test]
    fn surface_validity() {
        assert!(SurfaceSize::new(400.0, 800.0).is_valid());
        assert!(!SurfaceSize::new(0.0, 800.0).is_valid());
        assert!(!SurfaceSize::new(400.0, -1.0).is_valid());
        assert!(!SurfaceSize::new(f32::NAN, 10.0).is_valid());
        assert!(!SurfaceSize::new(f32::INFINITY, 10.0).is_valid());
    }

    #[test]
    fn clamp_center_each_axis() {
        let surface = SurfaceSize::new(400.0, 800.0);
        let clamped = surface.clamp_center(Point::new(10_000.0, -50.0), 12.5);
        assert_eq!(clamped, Point::new(387.5, 12.5));

        let inside = surface.clamp_center(Point::new(200.0, 300.0), 12.5);
        assert_eq!(inside, Point::new(200.0, 300.0));
    }

    #[test]
    fn clamp_center_on_tiny_surface() {
        // Narrower than the joint itself
        let surface = SurfaceSize::new(10.0, 10.0);
        let clamped = surface.clamp_center(Point::new(5.0, 5.0), 12.5);
        assert_eq!(clamped, Point::new(12.5, 12.5));
    }

    #[test]
    fn percent_layout_is_exact() {
        let surface = SurfaceSize::new(400.0, 800.0);
        assert_eq!(surface.at_percent(50.0, 15.0), Point::new(200.0, 120.0));
        assert_eq!(surface.at_percent(45.0, 35.0), Point::new(180.0, 280.0));
    }

    #[test]
    fn pixel_dimensions_round_up() {
        assert_eq!(SurfaceSize::new(399.2, 800.0).pixel_dimensions(), (400, 800));
    }
}
