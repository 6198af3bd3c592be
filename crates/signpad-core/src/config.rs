//! Widget configuration.
//!
//! Every field has a default matching the stock signature pad, so a host page
//! only needs to supply the values it wants to change.

use crate::export::ExportFormat;
use crate::stroke::{LineCap, StrokeStyle};
use peniko::Color;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Result type for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// An 8-bit RGBA color that can round-trip through JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RgbaColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    #[serde(default = "opaque_alpha")]
    pub a: u8,
}

fn opaque_alpha() -> u8 {
    255
}

impl RgbaColor {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn black() -> Self {
        Self::new(0, 0, 0, 255)
    }

    pub const fn white() -> Self {
        Self::new(255, 255, 255, 255)
    }

    pub fn is_opaque(&self) -> bool {
        self.a == 255
    }
}

impl From<Color> for RgbaColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<RgbaColor> for Color {
    fn from(color: RgbaColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// Pen settings applied to every stroke.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrokeConfig {
    /// Line width in canvas pixels.
    pub width: f64,
    /// Cap drawn at both ends of every segment.
    pub cap: LineCap,
    /// Ink color.
    pub color: RgbaColor,
}

impl Default for StrokeConfig {
    fn default() -> Self {
        Self {
            width: 5.0,
            cap: LineCap::Round,
            color: RgbaColor::black(),
        }
    }
}

impl StrokeConfig {
    /// The style a new stroke is fixed to on pointer-down.
    pub fn style(&self) -> StrokeStyle {
        StrokeStyle {
            width: self.width,
            cap: self.cap,
            color: self.color.into(),
        }
    }
}

/// Download settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub format: ExportFormat,
    /// File name without extension.
    pub file_stem: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            format: ExportFormat::default(),
            file_stem: "signature".to_string(),
        }
    }
}

impl ExportConfig {
    /// Full download name, e.g. `signature.jpg`.
    pub fn filename(&self) -> String {
        format!("{}.{}", self.file_stem, self.format.extension())
    }
}

/// Text attached to shared signatures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShareConfig {
    pub title: String,
    /// Text sent alongside the image attachment.
    pub file_text: String,
    /// Text sent with the link-only fallback.
    pub link_text: String,
    /// Notice shown when the platform cannot share at all.
    pub unsupported_notice: String,
}

impl Default for ShareConfig {
    fn default() -> Self {
        Self {
            title: "Signature".to_string(),
            file_text: "Here is my signature!".to_string(),
            link_text: "I created a signature!".to_string(),
            unsupported_notice: "Your browser does not support the Web Share API.".to_string(),
        }
    }
}

/// Top-level widget configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignpadConfig {
    pub stroke: StrokeConfig,
    /// Opaque base color under all ink, also used when exporting.
    pub background: RgbaColor,
    pub export: ExportConfig,
    pub share: ShareConfig,
    /// Maximum undo depth. `None` keeps every stroke.
    pub history_limit: Option<usize>,
}

impl Default for SignpadConfig {
    fn default() -> Self {
        Self {
            stroke: StrokeConfig::default(),
            background: RgbaColor::white(),
            export: ExportConfig::default(),
            share: ShareConfig::default(),
            history_limit: None,
        }
    }
}

impl SignpadConfig {
    /// Parse a (possibly partial) JSON config and validate it.
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges serde cannot express.
    pub fn validate(&self) -> ConfigResult<()> {
        if !self.stroke.width.is_finite() || self.stroke.width <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "stroke width must be positive, got {}",
                self.stroke.width
            )));
        }
        if !self.background.is_opaque() {
            return Err(ConfigError::Invalid(format!(
                "background must be opaque, got alpha {}",
                self.background.a
            )));
        }
        if let ExportFormat::Jpeg { quality } = self.export.format {
            if !(1..=100).contains(&quality) {
                return Err(ConfigError::Invalid(format!(
                    "JPEG quality must be within 1..=100, got {}",
                    quality
                )));
            }
        }
        if self.export.file_stem.trim().is_empty() {
            return Err(ConfigError::Invalid("export file stem is empty".to_string()));
        }
        if self.history_limit == Some(0) {
            return Err(ConfigError::Invalid("history limit must be at least 1".to_string()));
        }
        Ok(())
    }

    /// Background as a renderable color.
    pub fn background_color(&self) -> Color {
        self.background.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_stock_pad() {
        let config = SignpadConfig::default();
        assert_eq!(config.stroke.width, 5.0);
        assert_eq!(config.stroke.cap, LineCap::Round);
        assert_eq!(config.stroke.color, RgbaColor::black());
        assert_eq!(config.background, RgbaColor::white());
        assert_eq!(config.export.filename(), "signature.jpg");
        assert_eq!(config.share.title, "Signature");
        assert!(config.history_limit.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = SignpadConfig::from_json(
            r#"{ "stroke": { "width": 3.5 }, "export": { "format": { "kind": "png" } } }"#,
        )
        .unwrap();

        assert_eq!(config.stroke.width, 3.5);
        assert_eq!(config.stroke.cap, LineCap::Round);
        assert_eq!(config.export.filename(), "signature.png");
        assert_eq!(config.share, ShareConfig::default());
    }

    #[test]
    fn test_color_alpha_defaults_to_opaque() {
        let config =
            SignpadConfig::from_json(r#"{ "background": { "r": 250, "g": 250, "b": 240 } }"#)
                .unwrap();
        assert!(config.background.is_opaque());
        assert_eq!(config.background, RgbaColor::new(250, 250, 240, 255));
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(matches!(
            SignpadConfig::from_json(r#"{ "stroke": { "width": 0 } }"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            SignpadConfig::from_json(
                r#"{ "export": { "format": { "kind": "jpeg", "quality": 0 } } }"#
            ),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            SignpadConfig::from_json(r#"{ "background": { "r": 9, "g": 9, "b": 9, "a": 0 } }"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            SignpadConfig::from_json(r#"{ "background": { "r": 0, "g": 0, "b": 0, "a": 254 } }"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            SignpadConfig::from_json(r#"{ "history_limit": 0 }"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(SignpadConfig::from_json("{ nope"), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_history_limit_parsed() {
        let config = SignpadConfig::from_json(r#"{ "history_limit": 20 }"#).unwrap();
        assert_eq!(config.history_limit, Some(20));
        assert_eq!(config.stroke, StrokeConfig::default());
    }

    #[test]
    fn test_color_conversion() {
        let color: Color = RgbaColor::new(10, 20, 30, 255).into();
        assert_eq!(RgbaColor::from(color), RgbaColor::new(10, 20, 30, 255));
    }
}
