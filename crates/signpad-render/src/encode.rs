//! Image encoding for downloads and shares.

use crate::composite::composite_opaque;
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ExtendedColorType, RgbaImage};
use peniko::Color;
use signpad_core::{ExportConfig, ExportFormat, ImageArtifact, ShareError, Surface};
use thiserror::Error;

/// Render errors.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Cannot export an empty {0}x{1} surface")]
    EmptySurface(u32, u32),
    #[error("Encoding failed: {0}")]
    Encode(String),
}

/// Result type for render operations.
pub type RenderResult<T> = Result<T, RenderError>;

impl From<RenderError> for ShareError {
    fn from(e: RenderError) -> Self {
        ShareError::Encode(e.to_string())
    }
}

/// Composite `surface` onto `background` and encode it per `config`.
pub fn encode(
    surface: &Surface,
    config: &ExportConfig,
    background: Color,
) -> RenderResult<ImageArtifact> {
    if surface.is_empty() {
        log::warn!("Cannot export empty surface");
        return Err(RenderError::EmptySurface(surface.width(), surface.height()));
    }

    let flattened = composite_opaque(surface, background);
    let bytes = match config.format {
        ExportFormat::Jpeg { quality } => encode_jpeg(flattened, quality)?,
        ExportFormat::Png => encode_png(&flattened)?,
    };

    log::info!(
        "Encoded {}x{} {} ({} bytes)",
        surface.width(),
        surface.height(),
        config.format.mime_type(),
        bytes.len()
    );

    Ok(ImageArtifact {
        filename: config.filename(),
        mime_type: config.format.mime_type().to_string(),
        bytes,
    })
}

fn encode_jpeg(image: RgbaImage, quality: u8) -> RenderResult<Vec<u8>> {
    let rgb = DynamicImage::ImageRgba8(image).into_rgb8();
    let mut jpeg_data = Vec::new();
    JpegEncoder::new_with_quality(&mut jpeg_data, quality.clamp(1, 100))
        .encode(rgb.as_raw(), rgb.width(), rgb.height(), ExtendedColorType::Rgb8)
        .map_err(|e| RenderError::Encode(e.to_string()))?;
    Ok(jpeg_data)
}

/// Encode RGBA pixel data to PNG bytes.
pub fn encode_png(image: &RgbaImage) -> RenderResult<Vec<u8>> {
    let mut png_data = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut png_data, image.width(), image.height());
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);

        let mut writer = encoder
            .write_header()
            .map_err(|e| RenderError::Encode(format!("PNG header: {}", e)))?;
        writer
            .write_image_data(image.as_raw())
            .map_err(|e| RenderError::Encode(format!("PNG data: {}", e)))?;
    }

    Ok(png_data)
}
