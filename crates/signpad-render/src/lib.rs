//! Signpad Render Library
//!
//! Turns a drawing surface into a downloadable image: composites it onto an
//! opaque background and encodes it as JPEG or PNG.

mod composite;
mod encode;

pub use composite::composite_opaque;
pub use encode::{RenderError, RenderResult, encode, encode_png};
