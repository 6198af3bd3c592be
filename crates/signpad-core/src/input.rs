//! Pointer input normalization for mouse and touch events.
//!
//! Mouse and touch events report positions against different origins. Both
//! are reduced here to a single canvas-relative point so a stroke drawn with
//! a finger lands exactly where the same motion with a mouse would.

use kurbo::{Point, Rect};

/// Phase of a pointer interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerPhase {
    Down,
    Move,
    Up,
}

impl PointerPhase {
    /// Map a DOM event type name to its phase.
    pub fn from_event_type(event_type: &str) -> Option<Self> {
        match event_type {
            "mousedown" | "touchstart" => Some(PointerPhase::Down),
            "mousemove" | "touchmove" => Some(PointerPhase::Move),
            "mouseup" | "touchend" | "touchcancel" => Some(PointerPhase::Up),
            _ => None,
        }
    }
}

/// Raw pointer sample as reported by the platform.
#[derive(Debug, Clone, PartialEq)]
pub enum PointerInput {
    /// Mouse event: client position and the element's offset origin
    /// (`offsetLeft`, `offsetTop`).
    Mouse { client: Point, offset: Point },
    /// Touch event: client positions of the active touches and the element's
    /// bounding client rectangle.
    Touch { touches: Vec<Point>, bounds: Rect },
}

impl PointerInput {
    /// Build a mouse sample.
    pub fn mouse(client_x: f64, client_y: f64, offset_left: f64, offset_top: f64) -> Self {
        PointerInput::Mouse {
            client: Point::new(client_x, client_y),
            offset: Point::new(offset_left, offset_top),
        }
    }

    /// Build a touch sample.
    pub fn touch(touches: impl IntoIterator<Item = Point>, bounds: Rect) -> Self {
        PointerInput::Touch {
            touches: touches.into_iter().collect(),
            bounds,
        }
    }

    /// Canvas-relative position of this sample.
    ///
    /// Touch samples use the first active touch; a touch sample with no
    /// active touches (as on `touchend`) has no position.
    pub fn resolve(&self) -> Option<Point> {
        match self {
            PointerInput::Mouse { client, offset } => {
                Some(Point::new(client.x - offset.x, client.y - offset.y))
            }
            PointerInput::Touch { touches, bounds } => touches
                .first()
                .map(|touch| Point::new(touch.x - bounds.x0, touch.y - bounds.y0)),
        }
    }
}
