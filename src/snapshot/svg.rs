//! SVG rasterization and compositing using resvg.

use image::{Rgba, RgbaImage};
use resvg::tiny_skia::{Pixmap, Transform};
use resvg::usvg::{Options, Tree};

// ============================================================================
// SVG Rendering
// ============================================================================

/// Renders an SVG document stretched to exactly `width` x `height` pixels.
///
/// Returns `None` if the SVG cannot be parsed or the pixmap cannot be
/// allocated.
pub fn render_svg_sized(svg_data: &str, width: u32, height: u32) -> Option<RgbaImage> {
    let opts = Options::default();
    let tree = Tree::from_str(svg_data, &opts).ok()?;

    let svg_size = tree.size();
    let sx = width as f32 / svg_size.width();
    let sy = height as f32 / svg_size.height();

    let mut pixmap = Pixmap::new(width, height)?;
    resvg::render(&tree, Transform::from_scale(sx, sy), &mut pixmap.as_mut());

    Some(pixmap_to_rgba_image(&pixmap))
}

/// Renders an SVG to fit within `size x size` pixels, preserving aspect
/// ratio (the larger dimension becomes `size`).
pub fn render_svg_fit(svg_data: &str, size: u32) -> Option<RgbaImage> {
    let opts = Options::default();
    let tree = Tree::from_str(svg_data, &opts).ok()?;

    let svg_size = tree.size();
    let scale = size as f32 / svg_size.width().max(svg_size.height());
    let width = (svg_size.width() * scale).ceil() as u32;
    let height = (svg_size.height() * scale).ceil() as u32;

    let mut pixmap = Pixmap::new(width, height)?;
    resvg::render(&tree, Transform::from_scale(scale, scale), &mut pixmap.as_mut());

    Some(pixmap_to_rgba_image(&pixmap))
}

/// Converts a tiny_skia Pixmap to an image::RgbaImage.
fn pixmap_to_rgba_image(pixmap: &Pixmap) -> RgbaImage {
    let width = pixmap.width();
    let height = pixmap.height();
    let mut img = RgbaImage::new(width, height);

    for y in 0..height {
        for x in 0..width {
            let Some(pixel) = pixmap.pixel(x, y) else {
                continue;
            };
            // tiny_skia stores premultiplied alpha
            let (r, g, b, a) =
                unpremultiply(pixel.red(), pixel.green(), pixel.blue(), pixel.alpha());
            img.put_pixel(x, y, Rgba([r, g, b, a]));
        }
    }

    img
}

fn unpremultiply(r: u8, g: u8, b: u8, a: u8) -> (u8, u8, u8, u8) {
    if a == 0 {
        (0, 0, 0, 0)
    } else {
        let a_f = a as f32 / 255.0;
        (
            (r as f32 / a_f).round().min(255.0) as u8,
            (g as f32 / a_f).round().min(255.0) as u8,
            (b as f32 / a_f).round().min(255.0) as u8,
            a,
        )
    }
}

// ============================================================================
// Glyphs
// ============================================================================

/// Looks up the SVG artwork for an emoji glyph.
///
/// Tries the symbol as given, then without variation selectors. Always
/// `None` without the `twemoji` feature.
#[cfg(feature = "twemoji")]
pub fn glyph_svg(symbol: &str) -> Option<String> {
    use twemoji_assets::svg::SvgTwemojiAsset;

    let asset = SvgTwemojiAsset::from_emoji(symbol).or_else(|| {
        let stripped: String = symbol.chars().filter(|c| *c != '\u{FE0F}').collect();
        SvgTwemojiAsset::from_emoji(&stripped)
    })?;
    let svg: &str = asset.as_ref();
    Some(svg.to_string())
}

#[cfg(not(feature = "twemoji"))]
pub fn glyph_svg(_symbol: &str) -> Option<String> {
    None
}

// ============================================================================
// Compositing
// ============================================================================

/// Composites `src` onto `dest` with its top-left corner at (x, y).
///
/// Source-over alpha blending; pixels falling outside `dest` are dropped.
pub fn composite_over(dest: &mut RgbaImage, src: &RgbaImage, x: i32, y: i32) {
    let dest_width = dest.width() as i32;
    let dest_height = dest.height() as i32;

    for sy in 0..src.height() {
        for sx in 0..src.width() {
            let dx = x + sx as i32;
            let dy = y + sy as i32;

            if dx < 0 || dy < 0 || dx >= dest_width || dy >= dest_height {
                continue;
            }

            let src_pixel = *src.get_pixel(sx, sy);
            if src_pixel[3] == 0 {
                continue;
            }
            let dst_pixel = *dest.get_pixel(dx as u32, dy as u32);
            dest.put_pixel(dx as u32, dy as u32, alpha_blend(src_pixel, dst_pixel));
        }
    }
}

/// Alpha blends two RGBA pixels (source over destination).
fn alpha_blend(src: Rgba<u8>, dst: Rgba<u8>) -> Rgba<u8> {
    let sa = src[3] as f32 / 255.0;
    let da = dst[3] as f32 / 255.0;

    let out_a = sa + da * (1.0 - sa);
    if out_a == 0.0 {
        return Rgba([0, 0, 0, 0]);
    }

    let blend = |s: u8, d: u8| -> u8 {
        let sf = s as f32 / 255.0;
        let df = d as f32 / 255.0;
        let out = (sf * sa + df * da * (1.0 - sa)) / out_a;
        (out * 255.0).round() as u8
    };

    Rgba([
        blend(src[0], dst[0]),
        blend(src[1], dst[1]),
        blend(src[2], dst[2]),
        (out_a * 255.0).round() as u8,
    ])
}
