//! [`ShareTarget`] over the Web Share API.
//!
//! `navigator.share` and `navigator.canShare` are looked up at call time
//! rather than bound statically, since many browsers ship neither.

use js_sys::{Array, Function, Object, Promise, Reflect, Uint8Array};
use signpad_core::share::{BoxFuture, ShareResult};
use signpad_core::{ShareData, ShareError, ShareFile, ShareTarget};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{DomException, FilePropertyBag, Navigator, Window};

/// The browser's share sheet.
pub struct WebShareTarget {
    window: Window,
    navigator: Navigator,
}

impl WebShareTarget {
    /// Returns `None` outside a browser window.
    pub fn new() -> Option<Self> {
        let window = web_sys::window()?;
        let navigator = window.navigator();
        Some(Self { window, navigator })
    }

    fn navigator_method(&self, name: &str) -> Option<Function> {
        Reflect::get(&self.navigator, &JsValue::from_str(name))
            .ok()?
            .dyn_into::<Function>()
            .ok()
    }
}

impl ShareTarget for WebShareTarget {
    fn can_share(&self, data: &ShareData) -> bool {
        let Some(can_share) = self.navigator_method("canShare") else {
            return false;
        };
        match to_js(data) {
            Ok(payload) => can_share
                .call1(&self.navigator, &payload)
                .map(|result| result.is_truthy())
                .unwrap_or(false),
            Err(e) => {
                log::warn!("Failed to build share payload: {:?}", e);
                false
            }
        }
    }

    fn supports_share(&self) -> bool {
        self.navigator_method("share").is_some()
    }

    fn share(&self, data: ShareData) -> BoxFuture<'_, ShareResult<()>> {
        Box::pin(async move {
            let share = self
                .navigator_method("share")
                .ok_or_else(|| ShareError::Unsupported("navigator.share is missing".to_string()))?;
            let payload = to_js(&data).map_err(share_error)?;
            let promise = share
                .call1(&self.navigator, &payload)
                .map_err(share_error)?
                .dyn_into::<Promise>()
                .map_err(share_error)?;
            JsFuture::from(promise).await.map_err(share_error)?;
            Ok(())
        })
    }

    fn notify(&self, message: &str) {
        if let Err(e) = self.window.alert_with_message(message) {
            log::warn!("Failed to show notice: {:?}", e);
        }
    }

    fn page_url(&self) -> Option<String> {
        self.window.location().href().ok()
    }
}

/// Build the JS object `navigator.share` expects.
fn to_js(data: &ShareData) -> Result<JsValue, JsValue> {
    let payload = Object::new();
    Reflect::set(&payload, &"title".into(), &data.title.as_str().into())?;
    Reflect::set(&payload, &"text".into(), &data.text.as_str().into())?;
    if let Some(url) = &data.url {
        Reflect::set(&payload, &"url".into(), &url.as_str().into())?;
    }
    if data.has_files() {
        let files = Array::new();
        for file in &data.files {
            files.push(&to_js_file(file)?);
        }
        Reflect::set(&payload, &"files".into(), &files)?;
    }
    Ok(payload.into())
}

fn to_js_file(file: &ShareFile) -> Result<web_sys::File, JsValue> {
    let parts = Array::new();
    parts.push(&Uint8Array::from(file.bytes.as_slice()));

    let options = FilePropertyBag::new();
    options.set_type(&file.mime_type);

    web_sys::File::new_with_u8_array_sequence_and_options(&parts, &file.name, &options)
}

/// Classify a rejected share promise.
fn share_error(error: JsValue) -> ShareError {
    match error.dyn_ref::<DomException>() {
        Some(exception) => match exception.name().as_str() {
            "AbortError" => ShareError::Cancelled,
            "NotAllowedError" => {
                ShareError::Failed(format!("permission denied: {}", exception.message()))
            }
            name => ShareError::Failed(format!("{}: {}", name, exception.message())),
        },
        None => ShareError::Failed(format!("{:?}", error)),
    }
}
