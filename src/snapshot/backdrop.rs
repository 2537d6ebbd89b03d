//! Background photo layer.

use image::RgbaImage;
use image::imageops::{self, FilterType};

use super::{CacheKey, LayerConfig, LayerEffect, Placed};

/// The photo drawn behind the figure.
///
/// The photo is scaled to fit the surface while keeping its aspect ratio,
/// centered, with the fill color showing in the letterbox bands.
#[derive(Debug, Clone)]
pub struct BackdropConfig {
    pub photo: RgbaImage,
}

impl BackdropConfig {
    pub fn new(photo: RgbaImage) -> Self {
        Self { photo }
    }

    /// Computes the fitted size and top-left offset for a surface.
    pub fn fit(&self, key: CacheKey) -> (u32, u32, i32, i32) {
        let (pw, ph) = self.photo.dimensions();
        let scale = (key.width as f32 / pw as f32).min(key.height as f32 / ph as f32);
        let w = ((pw as f32 * scale).round() as u32).clamp(1, key.width.max(1));
        let h = ((ph as f32 * scale).round() as u32).clamp(1, key.height.max(1));
        let x = (key.width as i32 - w as i32) / 2;
        let y = (key.height as i32 - h as i32) / 2;
        (w, h, x, y)
    }
}

impl LayerConfig for BackdropConfig {
    fn differs_from(&self, other: &Self) -> bool {
        self.photo != other.photo
    }
}

impl LayerEffect for BackdropConfig {
    fn draw(&self, key: CacheKey) -> Option<Placed> {
        if self.photo.width() == 0 || self.photo.height() == 0 {
            return None;
        }
        let (w, h, x, y) = self.fit(key);
        let image = imageops::resize(&self.photo, w, h, FilterType::Triangle);
        Some(Placed { image, x, y })
    }
}
