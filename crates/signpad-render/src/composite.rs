//! Flattening a surface onto an opaque background.

use image::{Rgba, RgbaImage};
use peniko::Color;
use signpad_core::Surface;

/// Blend every surface pixel source-over onto `background`.
///
/// The live surface is normally already opaque, but nothing guarantees it;
/// the result always has alpha 255 everywhere, even if `background` itself
/// is translucent.
pub fn composite_opaque(surface: &Surface, background: Color) -> RgbaImage {
    let bg = background.to_rgba8();
    let bg_rgb = [bg.r as f64, bg.g as f64, bg.b as f64];

    let mut image = RgbaImage::new(surface.width(), surface.height());
    for (out, src) in image.pixels_mut().zip(surface.pixels().chunks_exact(4)) {
        let alpha = src[3] as f64 / 255.0;
        let mut px = [0u8, 0, 0, 255];
        for c in 0..3 {
            let value = src[c] as f64 * alpha + bg_rgb[c] * (1.0 - alpha);
            px[c] = value.round().clamp(0.0, 255.0) as u8;
        }
        *out = Rgba(px);
    }
    image
}
