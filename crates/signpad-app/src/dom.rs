//! DOM lookups and canvas geometry.

use crate::app::MountError;
use kurbo::{Point, Rect};
use signpad_core::PointerInput;
use wasm_bindgen::JsCast;
use web_sys::{Document, Event, HtmlCanvasElement, MouseEvent, TouchEvent};

/// Find an element by id and cast it to the expected type.
pub fn element_by_id<T: JsCast>(document: &Document, id: &str) -> Result<T, MountError> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| MountError::MissingElement(id.to_string()))?
        .dyn_into::<T>()
        .map_err(|_| MountError::MissingElement(id.to_string()))
}

/// Displayed size of the canvas in CSS pixels.
pub fn client_size(canvas: &HtmlCanvasElement) -> (u32, u32) {
    (
        canvas.client_width().max(0) as u32,
        canvas.client_height().max(0) as u32,
    )
}

/// Convert a mouse or touch event into a pointer sample.
///
/// Touch positions are taken against the canvas's bounding client rect,
/// mouse positions against its offset origin.
pub fn pointer_input(canvas: &HtmlCanvasElement, event: &Event) -> Option<PointerInput> {
    if let Some(touch_event) = event.dyn_ref::<TouchEvent>() {
        let rect = canvas.get_bounding_client_rect();
        let bounds = Rect::new(rect.left(), rect.top(), rect.right(), rect.bottom());
        let list = touch_event.touches();
        let touches = (0..list.length())
            .filter_map(|i| list.get(i))
            .map(|touch| Point::new(touch.client_x() as f64, touch.client_y() as f64));
        return Some(PointerInput::touch(touches, bounds));
    }

    let mouse = event.dyn_ref::<MouseEvent>()?;
    Some(PointerInput::mouse(
        mouse.client_x() as f64,
        mouse.client_y() as f64,
        canvas.offset_left() as f64,
        canvas.offset_top() as f64,
    ))
}
