//! WebAssembly entry point.

use crate::app::{MountError, SignpadApp};
use crate::settings::{AppConfig, CONFIG_ELEMENT_ID};
use std::cell::RefCell;
use wasm_bindgen::prelude::*;

thread_local! {
    /// The widget mounted by this module, if any.
    static MOUNTED: RefCell<Option<SignpadApp>> = const { RefCell::new(None) };
}

/// Config embedded in the page under [`CONFIG_ELEMENT_ID`].
fn page_config() -> AppConfig {
    let embedded = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.get_element_by_id(CONFIG_ELEMENT_ID))
        .and_then(|element| element.text_content());
    AppConfig::from_page(embedded.as_deref())
}

fn mount_with(config: AppConfig) -> Result<(), MountError> {
    unmount();
    let app = SignpadApp::mount(config)?;
    MOUNTED.with(|mounted| *mounted.borrow_mut() = Some(app));
    Ok(())
}

/// Initialize logging and mount the widget using the page's config.
#[wasm_bindgen(start)]
pub fn run_wasm() {
    // Set up panic hook for better error messages
    console_error_panic_hook::set_once();

    if let Err(e) = console_log::init_with_level(log::Level::Info) {
        web_sys::console::error_1(&format!("Failed to initialize logger: {}", e).into());
    }

    log::info!("Starting Signpad (WASM)");

    if let Err(e) = mount_with(page_config()) {
        log::error!("Failed to mount Signpad: {}", e);
    }
}

/// Mount (or remount) the widget with an explicit JSON config.
#[wasm_bindgen]
pub fn mount(config_json: Option<String>) -> Result<(), JsValue> {
    let config = match config_json {
        Some(json) => AppConfig::from_json(&json).map_err(|e| JsValue::from_str(&e.to_string()))?,
        None => page_config(),
    };
    mount_with(config).map_err(JsValue::from)
}

/// Remove the mounted widget and all its listeners.
#[wasm_bindgen]
pub fn unmount() {
    let app = MOUNTED.with(|mounted| mounted.borrow_mut().take());
    if let Some(app) = app {
        app.unmount();
    }
}
