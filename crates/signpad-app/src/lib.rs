//! Signpad Application
//!
//! Browser shell for the signature widget: binds a `<canvas>` and its
//! buttons to a [`signpad_core::SurfaceController`] and wires up download
//! and the Web Share API.

mod settings;

pub use settings::{AppConfig, CONFIG_ELEMENT_ID, ElementIds};

#[cfg(target_arch = "wasm32")]
mod app;
#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod file_ops;
#[cfg(target_arch = "wasm32")]
mod web;
#[cfg(target_arch = "wasm32")]
mod web_share;

#[cfg(target_arch = "wasm32")]
pub use app::{MountError, SignpadApp};
#[cfg(target_arch = "wasm32")]
pub use web::{mount, run_wasm, unmount};
#[cfg(target_arch = "wasm32")]
pub use web_share::WebShareTarget;
