//! Export formats and the encoded image artifact.

use crate::share::ShareFile;
use serde::{Deserialize, Serialize};

/// Quality used for lossy exports unless configured otherwise.
pub const DEFAULT_JPEG_QUALITY: u8 = 80;

/// Encoding used for downloads and shared attachments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ExportFormat {
    /// Lossy JPEG at a fixed quality (1-100).
    Jpeg {
        #[serde(default = "default_quality")]
        quality: u8,
    },
    /// Lossless PNG.
    Png,
}

fn default_quality() -> u8 {
    DEFAULT_JPEG_QUALITY
}

impl Default for ExportFormat {
    fn default() -> Self {
        ExportFormat::Jpeg {
            quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

impl ExportFormat {
    pub fn mime_type(self) -> &'static str {
        match self {
            ExportFormat::Jpeg { .. } => "image/jpeg",
            ExportFormat::Png => "image/png",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Jpeg { .. } => "jpg",
            ExportFormat::Png => "png",
        }
    }
}

/// An encoded image ready to be downloaded or attached to a share.
#[derive(Clone, PartialEq, Eq)]
pub struct ImageArtifact {
    pub filename: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl std::fmt::Debug for ImageArtifact {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageArtifact")
            .field("filename", &self.filename)
            .field("mime_type", &self.mime_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

impl From<ImageArtifact> for ShareFile {
    fn from(artifact: ImageArtifact) -> Self {
        ShareFile {
            name: artifact.filename,
            mime_type: artifact.mime_type,
            bytes: artifact.bytes,
        }
    }
}
