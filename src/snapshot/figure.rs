//! Stick-figure layer: limbs, discs and glyphs.

use std::fmt::Write;

use image::RgbaImage;

use super::svg::{composite_over, glyph_svg, render_svg_fit, render_svg_sized};
use super::{CacheKey, LayerConfig, LayerEffect, Placed};
use crate::log;
use crate::render::Primitive;

/// The figure as drawn at one moment: the output of
/// [`Rig::render`](crate::Rig::render).
#[derive(Debug, Clone, PartialEq)]
pub struct FigureConfig {
    pub primitives: Vec<Primitive>,
}

impl FigureConfig {
    pub fn new(primitives: Vec<Primitive>) -> Self {
        Self { primitives }
    }
}

impl LayerConfig for FigureConfig {
    fn differs_from(&self, other: &Self) -> bool {
        self.primitives != other.primitives
    }
}

impl LayerEffect for FigureConfig {
    fn draw(&self, key: CacheKey) -> Option<Placed> {
        let svg = figure_svg(&self.primitives, key.width, key.height);
        let mut image = render_svg_sized(&svg, key.width, key.height)?;
        draw_glyphs(&mut image, &self.primitives);
        Some(Placed { image, x: 0, y: 0 })
    }
}

/// Builds an SVG document for the vector parts of the figure.
///
/// Limbs are emitted before discs so joints end up on top. Glyphs are not
/// part of the document; see [`draw_glyphs`].
pub fn figure_svg(primitives: &[Primitive], width: u32, height: u32) -> String {
    let mut svg = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}">"#
    );

    for primitive in primitives.iter().filter(|p| p.is_limb()) {
        if let Primitive::Line {
            segment,
            width,
            color,
            ..
        } = primitive
        {
            let _ = write!(
                svg,
                r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" stroke-opacity="{}" stroke-width="{}" stroke-linecap="round"/>"#,
                segment.from.x,
                segment.from.y,
                segment.to.x,
                segment.to.y,
                color.to_rgb_hex(),
                color.opacity(),
                width
            );
        }
    }

    for primitive in primitives {
        if let Primitive::Disc {
            center,
            radius,
            color,
            ..
        } = primitive
        {
            let _ = write!(
                svg,
                r#"<circle cx="{}" cy="{}" r="{}" fill="{}" fill-opacity="{}"/>"#,
                center.x,
                center.y,
                radius,
                color.to_rgb_hex(),
                color.opacity()
            );
        }
    }

    svg.push_str("</svg>");
    svg
}

/// Composites glyph artwork centered on each glyph joint.
///
/// Glyphs with no available artwork are skipped.
pub fn draw_glyphs(image: &mut RgbaImage, primitives: &[Primitive]) {
    for primitive in primitives {
        let Primitive::Glyph {
            center,
            size,
            symbol,
            ..
        } = primitive
        else {
            continue;
        };

        let Some(artwork) = glyph_svg(symbol) else {
            log::warn!(symbol = symbol.as_str(), "no artwork for glyph, skipped");
            continue;
        };
        let px = size.round().max(1.0) as u32;
        let Some(rendered) = render_svg_fit(&artwork, px) else {
            continue;
        };

        let x = (center.x - rendered.width() as f32 / 2.0).round() as i32;
        let y = (center.y - rendered.height() as f32 / 2.0).round() as i32;
        composite_over(image, &rendered, x, y);
    }
}
