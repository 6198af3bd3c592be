//! Sharing a finished signature through the platform share sheet.
//!
//! The decision logic lives here and talks to the platform through
//! [`ShareTarget`]. The browser shell implements the trait over the Web
//! Share API; tests use an in-memory recorder.

use crate::config::ShareConfig;
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// Share errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ShareError {
    #[error("Sharing is not supported: {0}")]
    Unsupported(String),
    #[error("Image encoding failed: {0}")]
    Encode(String),
    #[error("Share cancelled by user")]
    Cancelled,
    #[error("Share failed: {0}")]
    Failed(String),
}

/// Result type for share operations.
pub type ShareResult<T> = Result<T, ShareError>;

/// Boxed future for async operations (compatible with WASM).
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// A file attached to a share.
#[derive(Clone, PartialEq, Eq)]
pub struct ShareFile {
    pub name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl std::fmt::Debug for ShareFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShareFile")
            .field("name", &self.name)
            .field("mime_type", &self.mime_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Payload handed to the platform share sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareData {
    pub title: String,
    pub text: String,
    pub url: Option<String>,
    pub files: Vec<ShareFile>,
}

impl ShareData {
    /// Title and text with an attached file.
    pub fn with_file(title: impl Into<String>, text: impl Into<String>, file: ShareFile) -> Self {
        Self {
            title: title.into(),
            text: text.into(),
            url: None,
            files: vec![file],
        }
    }

    /// Title, text and an optional link, no attachments.
    pub fn link(title: impl Into<String>, text: impl Into<String>, url: Option<String>) -> Self {
        Self {
            title: title.into(),
            text: text.into(),
            url,
            files: Vec::new(),
        }
    }

    pub fn has_files(&self) -> bool {
        !self.files.is_empty()
    }
}

/// How a share attempt ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShareOutcome {
    /// The image was handed to the share sheet.
    SharedFile,
    /// Only title, text and link were shared.
    SharedLink,
    /// The platform has no share support; the user was told so.
    Unsupported,
    /// Something went wrong; already logged.
    Failed(ShareError),
}

/// Platform share capabilities.
///
/// Note: On native platforms, implementations must be Send + Sync.
/// On WASM, these bounds are relaxed since it's single-threaded.
#[cfg(not(target_arch = "wasm32"))]
pub trait ShareTarget: Send + Sync {
    /// Whether this exact payload (including files) can be shared.
    fn can_share(&self, data: &ShareData) -> bool;

    /// Whether the platform has any share support at all.
    fn supports_share(&self) -> bool;

    /// Open the share sheet.
    fn share(&self, data: ShareData) -> BoxFuture<'_, ShareResult<()>>;

    /// Show a user-visible notice.
    fn notify(&self, message: &str);

    /// Link to include in the text-only fallback.
    fn page_url(&self) -> Option<String>;
}

/// Platform share capabilities (WASM version without Send + Sync).
#[cfg(target_arch = "wasm32")]
pub trait ShareTarget {
    /// Whether this exact payload (including files) can be shared.
    fn can_share(&self, data: &ShareData) -> bool;

    /// Whether the platform has any share support at all.
    fn supports_share(&self) -> bool;

    /// Open the share sheet.
    fn share(&self, data: ShareData) -> BoxFuture<'_, ShareResult<()>>;

    /// Show a user-visible notice.
    fn notify(&self, message: &str);

    /// Link to include in the text-only fallback.
    fn page_url(&self) -> Option<String>;
}

/// Share an encoded signature image.
///
/// Tries the image attachment first, falls back to a text-and-link share,
/// and tells the user when neither is available. `image` carries the
/// result of encoding so encoding failures are handled like any other
/// share failure. Failures are logged and reported in the outcome, never
/// propagated.
pub async fn share_image<T: ShareTarget + ?Sized>(
    target: &T,
    image: ShareResult<ShareFile>,
    config: &ShareConfig,
) -> ShareOutcome {
    match try_share(target, image, config).await {
        Ok(outcome) => {
            log::info!("Share finished: {:?}", outcome);
            outcome
        }
        Err(e) => {
            log::error!("Sharing failed: {}", e);
            ShareOutcome::Failed(e)
        }
    }
}

async fn try_share<T: ShareTarget + ?Sized>(
    target: &T,
    image: ShareResult<ShareFile>,
    config: &ShareConfig,
) -> ShareResult<ShareOutcome> {
    let file = image?;
    let data = ShareData::with_file(&config.title, &config.file_text, file);

    if target.can_share(&data) {
        target.share(data).await?;
        return Ok(ShareOutcome::SharedFile);
    }

    if target.supports_share() {
        let link = ShareData::link(&config.title, &config.link_text, target.page_url());
        target.share(link).await?;
        return Ok(ShareOutcome::SharedLink);
    }

    target.notify(&config.unsupported_notice);
    Ok(ShareOutcome::Unsupported)
}
