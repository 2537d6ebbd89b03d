//! Flattening a rig and its backdrop photo into one image.
//!
//! The rig itself never draws pixels. A [`Snapshotter`] takes the rig's
//! [`render`](crate::Rig::render) output and composites it, together with
//! an optional background photo, into an [`RgbaImage`].
//!
//! # Layers
//!
//! ```text
//! fill color
//!     │
//!     ▼
//! ┌──────────┐
//! │ Backdrop │ ◄── photo, aspect-fit and centered
//! └────┬─────┘
//!      │
//!      ▼
//! ┌──────────┐
//! │  Figure  │ ◄── limbs, then discs, then glyphs
//! └──────────┘
//! ```
//!
//! Each layer keeps its config, an enabled flag, a version that bumps on
//! every effective change, and a per-surface-size cache of its drawn image.

pub mod backdrop;
pub mod figure;
pub mod svg;

pub use backdrop::BackdropConfig;
pub use figure::FigureConfig;

use std::collections::HashMap;

use image::RgbaImage;

use crate::color::Color;
use crate::error::RigError;
use crate::geometry::SurfaceSize;
use crate::log;
use crate::rig::Rig;

/// Largest canvas `rasterize` will allocate (8192 x 8192, 256 MiB of RGBA).
pub const MAX_SNAPSHOT_PIXELS: u64 = 8192 * 8192;

// ============================================================================
// CacheKey
// ============================================================================

/// Pixel size of the surface a layer was drawn for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub width: u32,
    pub height: u32,
}

impl CacheKey {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn from_surface(surface: SurfaceSize) -> Self {
        let (width, height) = surface.pixel_dimensions();
        Self::new(width, height)
    }

    /// Total pixel count, without overflow.
    pub fn pixels(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    /// True if a canvas of this size stays within [`MAX_SNAPSHOT_PIXELS`].
    pub fn is_allocatable(&self) -> bool {
        self.pixels() <= MAX_SNAPSHOT_PIXELS
    }
}

/// A drawn layer image and where its top-left corner goes.
#[derive(Debug, Clone, PartialEq)]
pub struct Placed {
    pub image: RgbaImage,
    pub x: i32,
    pub y: i32,
}

// ============================================================================
// Layer Traits
// ============================================================================

/// Trait for layer configuration types.
pub trait LayerConfig: Clone {
    /// Returns true if this config would draw differently from `other`.
    fn differs_from(&self, other: &Self) -> bool;
}

/// Trait for layer configurations that know how to draw themselves.
pub trait LayerEffect: LayerConfig {
    /// Draws the layer for a surface of the given size.
    ///
    /// `None` means there is nothing to draw.
    fn draw(&self, key: CacheKey) -> Option<Placed>;
}

// ============================================================================
// Generic Layer
// ============================================================================

/// A layer with optional configuration, an enabled flag, a version number
/// and a cache of drawn images keyed by surface size.
#[derive(Debug)]
pub struct Layer<C: LayerConfig> {
    config: Option<C>,
    enabled: bool,
    version: u64,
    cache: HashMap<CacheKey, Placed>,
}

impl<C: LayerConfig> Default for Layer<C> {
    fn default() -> Self {
        Self {
            config: None,
            enabled: true,
            version: 0,
            cache: HashMap::new(),
        }
    }
}

impl<C: LayerConfig> Layer<C> {
    pub fn config(&self) -> Option<&C> {
        self.config.as_ref()
    }

    /// Returns true if this layer has a config and is enabled.
    pub fn is_active(&self) -> bool {
        self.enabled && self.config.is_some()
    }

    pub fn has_config(&self) -> bool {
        self.config.is_some()
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Sets whether the layer is drawn. Returns true if the state changed.
    pub fn set_enabled(&mut self, enabled: bool) -> bool {
        if self.enabled == enabled {
            return false;
        }
        self.enabled = enabled;
        self.invalidate();
        true
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// Replaces the configuration. Returns true if it changed.
    ///
    /// An equivalent config keeps the version and the cache.
    pub fn set_config(&mut self, config: Option<C>) -> bool {
        let differs = match (&self.config, &config) {
            (None, None) => false,
            (Some(_), None) | (None, Some(_)) => true,
            (Some(old), Some(new)) => old.differs_from(new),
        };

        if differs {
            self.config = config;
            self.invalidate();
        }
        differs
    }

    /// Drops cached images and bumps the version.
    pub fn invalidate(&mut self) {
        self.version = self.version.wrapping_add(1);
        self.cache.clear();
    }

    pub fn get_cached(&self, key: CacheKey) -> Option<&Placed> {
        self.cache.get(&key)
    }

    pub fn is_cached(&self, key: CacheKey) -> bool {
        self.cache.contains_key(&key)
    }
}

impl<C: LayerEffect> Layer<C> {
    /// Composites this layer onto `canvas`, drawing it only on a cache miss.
    ///
    /// Inactive layers leave the canvas untouched.
    pub fn apply(&mut self, canvas: &mut RgbaImage, key: CacheKey) {
        let Some(config) = self.config.as_ref().filter(|_| self.enabled) else {
            return;
        };

        if !self.cache.contains_key(&key) {
            let Some(placed) = config.draw(key) else {
                return;
            };
            self.cache.insert(key, placed);
        }

        if let Some(placed) = self.cache.get(&key) {
            svg::composite_over(canvas, &placed.image, placed.x, placed.y);
        }
    }
}

// ============================================================================
// Snapshotter
// ============================================================================

/// Rasterizes rigs over an optional backdrop photo.
///
/// # Example
///
/// ```
/// use climb_rig::{Rig, Snapshotter};
///
/// let rig = Rig::new(120.0, 240.0).unwrap();
/// let mut snapshotter = Snapshotter::new();
/// let image = snapshotter.rasterize(&rig).unwrap();
/// assert_eq!(image.dimensions(), (120, 240));
/// ```
#[derive(Debug)]
pub struct Snapshotter {
    /// Color behind everything, visible in letterbox bands.
    pub fill: Color,

    /// Background photo layer.
    pub backdrop: Layer<BackdropConfig>,

    /// Stick-figure layer. Disable it to snapshot the photo alone.
    pub figure: Layer<FigureConfig>,
}

impl Default for Snapshotter {
    fn default() -> Self {
        Self {
            fill: Color::WHITE,
            backdrop: Layer::default(),
            figure: Layer::default(),
        }
    }
}

impl Snapshotter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fill(mut self, fill: Color) -> Self {
        self.fill = fill;
        self
    }

    /// Sets or clears the backdrop photo. Returns true if it changed.
    pub fn set_photo(&mut self, photo: Option<RgbaImage>) -> bool {
        self.backdrop.set_config(photo.map(BackdropConfig::new))
    }

    /// Flattens the fill, backdrop and the rig's current figure.
    pub fn rasterize(&mut self, rig: &Rig) -> Result<RgbaImage, RigError> {
        let key = CacheKey::from_surface(rig.surface());
        if key.width == 0 || key.height == 0 {
            return Err(RigError::Raster(format!(
                "empty surface {}x{}",
                key.width, key.height
            )));
        }

        if !key.is_allocatable() {
            log::warn!(width = key.width, height = key.height, "snapshot surface too large");
            return Err(RigError::Raster(format!(
                "surface {}x{} exceeds {MAX_SNAPSHOT_PIXELS} pixels",
                key.width, key.height
            )));
        }

        let mut canvas = RgbaImage::from_pixel(key.width, key.height, self.fill.into());

        self.figure.set_config(Some(FigureConfig::new(rig.render())));

        self.backdrop.apply(&mut canvas, key);
        self.figure.apply(&mut canvas, key);

        if self.figure.is_active() && !self.figure.is_cached(key) {
            return Err(RigError::Raster(format!(
                "figure could not be drawn at {}x{}",
                key.width, key.height
            )));
        }

        log::debug!(
            width = key.width,
            height = key.height,
            backdrop = self.backdrop.is_active(),
            "snapshot rasterized"
        );
        Ok(canvas)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;
    use crate::joint::JointId;
    use crate::RigConfig;
    use image::Rgba;

    fn plain_rig() -> Rig {
        Rig::with_config(400.0, 800.0, &RigConfig::without_glyphs()).unwrap()
    }

    #[test]
    fn layer_set_config_tracks_versions() {
        let mut layer: Layer<BackdropConfig> = Layer::default();
        assert!(layer.is_enabled());
        assert!(!layer.is_active());
        assert_eq!(layer.version(), 0);

        let photo = RgbaImage::from_pixel(4, 4, Rgba([1, 2, 3, 255]));
        assert!(layer.set_config(Some(BackdropConfig::new(photo.clone()))));
        assert_eq!(layer.version(), 1);

        // Same photo again is not a change
        assert!(!layer.set_config(Some(BackdropConfig::new(photo))));
        assert_eq!(layer.version(), 1);

        assert!(layer.set_config(None));
        assert_eq!(layer.version(), 2);
    }

    #[test]
    fn layer_toggle_keeps_config() {
        let mut layer: Layer<BackdropConfig> = Layer::default();
        layer.set_config(Some(BackdropConfig::new(RgbaImage::new(2, 2))));

        assert!(layer.set_enabled(false));
        assert!(!layer.is_active());
        assert!(layer.has_config());
        assert!(!layer.set_enabled(false));

        assert!(layer.set_enabled(true));
        assert!(layer.is_active());
        assert_eq!(layer.version(), 3);
    }

    #[test]
    fn rasterize_matches_surface_size() {
        let rig = Rig::new(399.5, 200.0).unwrap();
        let image = Snapshotter::new().rasterize(&rig).unwrap();
        assert_eq!(image.dimensions(), (400, 200));
    }

    #[test]
    fn oversized_surface_is_a_raster_error() {
        let huge = Rig::new(5.0e9, 5.0e9).unwrap();
        assert!(matches!(Snapshotter::new().rasterize(&huge), Err(RigError::Raster(_))));

        let large = Rig::new(40_000.0, 40_000.0).unwrap();
        assert!(matches!(Snapshotter::new().rasterize(&large), Err(RigError::Raster(_))));
    }

    #[test]
    fn cache_key_pixel_budget() {
        assert!(CacheKey::new(8192, 8192).is_allocatable());
        assert!(!CacheKey::new(8193, 8192).is_allocatable());
        assert_eq!(CacheKey::new(u32::MAX, u32::MAX).pixels(), u64::from(u32::MAX).pow(2));
    }

    #[test]
    fn figure_pixels_follow_style() {
        let mut rig = plain_rig();
        let mut snapshotter = Snapshotter::new();

        let image = snapshotter.rasterize(&rig).unwrap();
        // Neck disc center
        assert_eq!(image.get_pixel(200, 120).0, [255, 0, 0, 255]);
        // Middle of the neck-torso limb
        assert_eq!(image.get_pixel(200, 200).0, [0, 0, 0, 255]);
        // Empty corner shows the fill
        assert_eq!(image.get_pixel(2, 790).0, [255, 255, 255, 255]);

        rig.set_limb_color(Color::BLUE);
        let image = snapshotter.rasterize(&rig).unwrap();
        assert_eq!(image.get_pixel(200, 200).0, [0, 0, 255, 255]);
    }

    #[test]
    fn figure_follows_drags() {
        let mut rig = plain_rig();
        let mut snapshotter = Snapshotter::new();
        snapshotter.rasterize(&rig).unwrap();
        let before = snapshotter.figure.version();

        rig.on_drag_start(JointId::Torso, Point::new(0.0, 0.0)).unwrap();
        rig.on_drag_end(Point::new(100.0, 0.0)).unwrap();
        let image = snapshotter.rasterize(&rig).unwrap();

        assert!(snapshotter.figure.version() > before);
        assert_eq!(image.get_pixel(300, 280).0, [255, 0, 0, 255]);
        assert_eq!(image.get_pixel(200, 280).0, [255, 255, 255, 255]);
    }

    #[test]
    fn unchanged_rig_reuses_figure_cache() {
        let rig = plain_rig();
        let mut snapshotter = Snapshotter::new();
        let first = snapshotter.rasterize(&rig).unwrap();
        let version = snapshotter.figure.version();

        let second = snapshotter.rasterize(&rig).unwrap();
        assert_eq!(snapshotter.figure.version(), version);
        assert_eq!(first, second);
    }

    #[test]
    fn backdrop_is_letterboxed_and_cached() {
        let rig = plain_rig();
        let mut snapshotter = Snapshotter::new();
        snapshotter.figure.set_enabled(false);

        let photo = RgbaImage::from_pixel(100, 100, Rgba([0, 200, 0, 255]));
        assert!(snapshotter.set_photo(Some(photo.clone())));

        let image = snapshotter.rasterize(&rig).unwrap();
        let key = CacheKey::new(400, 800);
        assert!(snapshotter.backdrop.is_cached(key));

        assert_eq!(image.get_pixel(5, 100).0, [255, 255, 255, 255]);
        assert_eq!(image.get_pixel(5, 400).0, [0, 200, 0, 255]);
        assert_eq!(image.get_pixel(5, 700).0, [255, 255, 255, 255]);

        assert!(!snapshotter.set_photo(Some(photo)));
        assert!(snapshotter.backdrop.is_cached(key));

        assert!(snapshotter.set_photo(None));
        assert!(!snapshotter.backdrop.is_cached(key));
        let image = snapshotter.rasterize(&rig).unwrap();
        assert_eq!(image.get_pixel(5, 400).0, [255, 255, 255, 255]);
    }

    #[test]
    fn figure_drawn_over_backdrop() {
        let rig = plain_rig();
        let mut snapshotter = Snapshotter::new().with_fill(Color::BLACK);
        snapshotter.set_photo(Some(RgbaImage::from_pixel(
            400,
            800,
            Rgba([0, 200, 0, 255]),
        )));

        let image = snapshotter.rasterize(&rig).unwrap();
        assert_eq!(image.get_pixel(200, 120).0, [255, 0, 0, 255]);
        assert_eq!(image.get_pixel(10, 10).0, [0, 200, 0, 255]);
    }

    #[test]
    fn hidden_figure_leaves_fill() {
        let rig = plain_rig();
        let mut snapshotter = Snapshotter::new();
        snapshotter.figure.set_enabled(false);
        let image = snapshotter.rasterize(&rig).unwrap();
        assert!(image.pixels().all(|p| p.0 == [255, 255, 255, 255]));
    }
}
