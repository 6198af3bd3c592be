//! Mounted widget: DOM event wiring around a surface controller.

use crate::dom;
use crate::file_ops;
use crate::settings::AppConfig;
use crate::web_share::WebShareTarget;
use signpad_core::{PointerPhase, ShareError, ShareFile, SurfaceController, share_image};
use std::cell::RefCell;
use std::rc::Rc;
use thiserror::Error;
use wasm_bindgen::prelude::*;
use wasm_bindgen::{Clamped, JsCast};
use web_sys::{
    AddEventListenerOptions, CanvasRenderingContext2d, Event, EventTarget, HtmlCanvasElement,
    HtmlElement, ImageData,
};

/// Mount errors.
#[derive(Debug, Error)]
pub enum MountError {
    #[error("No browser window or document")]
    NoWindow,
    #[error("Element #{0} not found")]
    MissingElement(String),
    #[error("Canvas 2D context unavailable")]
    NoContext,
    #[error("DOM error: {0}")]
    Dom(String),
}

impl From<JsValue> for MountError {
    fn from(value: JsValue) -> Self {
        MountError::Dom(format!("{:?}", value))
    }
}

impl From<MountError> for JsValue {
    fn from(e: MountError) -> Self {
        JsValue::from_str(&e.to_string())
    }
}

/// State shared by every event handler of one mounted widget.
struct Shared {
    config: AppConfig,
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
    controller: RefCell<SurfaceController>,
}

impl Shared {
    /// Copy the changed part of the surface onto the canvas.
    fn blit(&self) {
        let Some(dirty) = self.controller.borrow_mut().take_dirty() else {
            return;
        };
        let controller = self.controller.borrow();
        let Some(region) = controller.surface().copy_region(dirty) else {
            return;
        };
        let result = ImageData::new_with_u8_clamped_array_and_sh(
            Clamped(region.pixels.as_slice()),
            region.width,
            region.height,
        )
        .and_then(|image| self.context.put_image_data(&image, region.x as f64, region.y as f64));
        if let Err(e) = result {
            log::error!("Failed to draw surface: {:?}", e);
        }
    }

    fn on_pointer(&self, event: &Event) {
        event.prevent_default();
        let Some(phase) = PointerPhase::from_event_type(&event.type_()) else {
            return;
        };
        let Some(input) = dom::pointer_input(&self.canvas, event) else {
            return;
        };
        let changed = self.controller.borrow_mut().handle_pointer(phase, &input);
        if changed {
            self.blit();
        }
    }

    fn on_resize(&self) {
        let (width, height) = dom::client_size(&self.canvas);
        self.canvas.set_width(width);
        self.canvas.set_height(height);
        self.controller.borrow_mut().resize(width, height);
        self.blit();
    }

    fn undo(&self) {
        if self.controller.borrow_mut().undo() {
            self.blit();
        }
    }

    fn redo(&self) {
        if self.controller.borrow_mut().redo() {
            self.blit();
        }
    }

    fn clear(&self) {
        self.controller.borrow_mut().clear();
        self.blit();
    }

    fn download(&self) {
        let signpad = &self.config.signpad;
        let encoded = signpad_render::encode(
            self.controller.borrow().surface(),
            &signpad.export,
            signpad.background_color(),
        );
        match encoded {
            Ok(artifact) => {
                let result = file_ops::download_binary_file(
                    &artifact.filename,
                    &artifact.bytes,
                    &artifact.mime_type,
                );
                match result {
                    Ok(()) => log::info!(
                        "Downloaded {} ({} bytes)",
                        artifact.filename,
                        artifact.bytes.len()
                    ),
                    Err(e) => log::error!("Download failed: {:?}", e),
                }
            }
            Err(e) => log::error!("Export failed: {}", e),
        }
    }

    fn share(&self) {
        let signpad = &self.config.signpad;
        // Encoded now, so strokes made while the share sheet is open are not included
        let image: Result<ShareFile, ShareError> = signpad_render::encode(
            self.controller.borrow().surface(),
            &signpad.export,
            signpad.background_color(),
        )
        .map(ShareFile::from)
        .map_err(ShareError::from);
        let share_config = signpad.share.clone();

        wasm_bindgen_futures::spawn_local(async move {
            match WebShareTarget::new() {
                Some(target) => {
                    share_image(&target, image, &share_config).await;
                }
                None => log::error!("Sharing failed: no browser window"),
            }
        });
    }
}

/// A registered DOM listener, kept so it can be removed on unmount.
struct Listener {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

/// A signature widget mounted on a page.
///
/// Dropping the app removes every listener it registered.
pub struct SignpadApp {
    shared: Rc<Shared>,
    listeners: Vec<Listener>,
}

impl SignpadApp {
    /// Bind to the configured canvas and buttons.
    ///
    /// The canvas is required; a missing button only disables its action.
    pub fn mount(config: AppConfig) -> Result<Self, MountError> {
        let window = web_sys::window().ok_or(MountError::NoWindow)?;
        let document = window.document().ok_or(MountError::NoWindow)?;

        let canvas: HtmlCanvasElement = dom::element_by_id(&document, &config.elements.canvas)?;
        let context = canvas
            .get_context("2d")?
            .ok_or(MountError::NoContext)?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| MountError::NoContext)?;

        let (width, height) = dom::client_size(&canvas);
        canvas.set_width(width);
        canvas.set_height(height);
        let controller = SurfaceController::new(width, height, config.signpad.clone());

        let shared = Rc::new(Shared {
            config,
            canvas,
            context,
            controller: RefCell::new(controller),
        });
        shared.blit();

        let mut app = Self {
            shared,
            listeners: Vec::new(),
        };

        let canvas_target: EventTarget = app.shared.canvas.clone().into();
        for event in ["mousedown", "mousemove", "mouseup"] {
            app.listen(&canvas_target, event, false, Shared::on_pointer)?;
        }
        // Non-passive so preventDefault can stop the page from scrolling
        for event in ["touchstart", "touchmove", "touchend", "touchcancel"] {
            app.listen(&canvas_target, event, true, Shared::on_pointer)?;
        }

        let ids = app.shared.config.elements.clone();
        let buttons: [(&str, fn(&Shared)); 5] = [
            (ids.undo.as_str(), Shared::undo),
            (ids.redo.as_str(), Shared::redo),
            (ids.clear.as_str(), Shared::clear),
            (ids.download.as_str(), Shared::download),
            (ids.share.as_str(), Shared::share),
        ];
        for (id, action) in buttons {
            match dom::element_by_id::<HtmlElement>(&document, id) {
                Ok(button) => {
                    app.listen(&button.into(), "click", false, move |shared, _| action(shared))?
                }
                Err(e) => log::warn!("{}; action disabled", e),
            }
        }

        app.listen(&window.into(), "resize", false, |shared, _| shared.on_resize())?;

        log::info!("Signpad mounted on #{} ({}x{})", ids.canvas, width, height);
        Ok(app)
    }

    /// Detach from the page.
    pub fn unmount(self) {
        log::info!("Signpad unmounted");
    }

    fn listen<F>(
        &mut self,
        target: &EventTarget,
        event: &'static str,
        non_passive: bool,
        handler: F,
    ) -> Result<(), MountError>
    where
        F: Fn(&Shared, &Event) + 'static,
    {
        let shared = Rc::clone(&self.shared);
        let callback = Closure::<dyn FnMut(Event)>::new(move |e: Event| handler(&shared, &e));

        if non_passive {
            let options = AddEventListenerOptions::new();
            options.set_passive(false);
            target.add_event_listener_with_callback_and_add_event_listener_options(
                event,
                callback.as_ref().unchecked_ref(),
                &options,
            )?;
        } else {
            target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
        }

        self.listeners.push(Listener {
            target: target.clone(),
            event,
            callback,
        });
        Ok(())
    }
}

impl Drop for SignpadApp {
    fn drop(&mut self) {
        for listener in self.listeners.drain(..) {
            let callback: &js_sys::Function = listener.callback.as_ref().unchecked_ref();
            if let Err(e) = listener
                .target
                .remove_event_listener_with_callback(listener.event, callback)
            {
                log::warn!("Failed to remove {} listener: {:?}", listener.event, e);
            }
        }
    }
}
