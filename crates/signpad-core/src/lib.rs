//! Signpad Core Library
//!
//! Platform-agnostic drawing surface, stroke history and share flow for the
//! Signpad signature widget. Nothing in this crate touches the browser; the
//! app crate feeds it pointer input and platform capabilities.

pub mod config;
pub mod controller;
pub mod export;
pub mod history;
pub mod input;
pub mod share;
pub mod stroke;
pub mod surface;

pub use config::{ConfigError, ExportConfig, RgbaColor, ShareConfig, SignpadConfig, StrokeConfig};
pub use controller::SurfaceController;
pub use export::{ExportFormat, ImageArtifact};
pub use history::{History, RestoreTarget};
pub use input::{PointerInput, PointerPhase};
pub use share::{ShareData, ShareError, ShareFile, ShareOutcome, ShareTarget, share_image};
pub use stroke::{ActiveStroke, LineCap, StrokeStyle};
pub use surface::{PixelRegion, Snapshot, Surface, SurfaceError};
