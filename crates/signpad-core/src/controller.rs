//! Drawing surface controller.
//!
//! Owns the pixel surface and its history and turns pointer events and
//! button commands into surface changes. The controller is a plain value:
//! the shell creates one when the widget mounts and drops it on unmount.

use crate::config::SignpadConfig;
use crate::history::{History, RestoreTarget};
use crate::input::{PointerInput, PointerPhase};
use crate::stroke::ActiveStroke;
use crate::surface::{Snapshot, Surface};
use kurbo::{Point, Rect};
use peniko::Color;

/// Whether a stroke is in progress.
#[derive(Debug, Clone, Default)]
enum StrokeState {
    #[default]
    Idle,
    Stroking(ActiveStroke),
}

/// Pointer-driven drawing surface with undo/redo.
#[derive(Debug)]
pub struct SurfaceController {
    config: SignpadConfig,
    surface: Surface,
    history: History,
    state: StrokeState,
    /// Area changed since the shell last copied pixels out.
    dirty: Option<Rect>,
}

impl SurfaceController {
    /// Create a controller with a background-filled surface.
    pub fn new(width: u32, height: u32, config: SignpadConfig) -> Self {
        let surface = Surface::new(width, height, config.background_color());
        let history = History::with_limit(config.history_limit);
        let dirty = Some(surface.bounds());
        Self {
            config,
            surface,
            history,
            state: StrokeState::Idle,
            dirty,
        }
    }

    pub fn config(&self) -> &SignpadConfig {
        &self.config
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    /// Copy of the surface as it is right now, for export and share.
    pub fn capture(&self) -> Surface {
        self.surface.clone()
    }

    pub fn is_stroking(&self) -> bool {
        matches!(self.state, StrokeState::Stroking(_))
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn undo_depth(&self) -> usize {
        self.history.undo_depth()
    }

    pub fn redo_depth(&self) -> usize {
        self.history.redo_depth()
    }

    /// Area changed since the last call, if any.
    pub fn take_dirty(&mut self) -> Option<Rect> {
        self.dirty.take()
    }

    /// Route a raw pointer sample. Returns true if the surface or stroke
    /// state changed.
    pub fn handle_pointer(&mut self, phase: PointerPhase, input: &PointerInput) -> bool {
        match phase {
            PointerPhase::Down => match input.resolve() {
                Some(point) => {
                    self.pointer_down(point);
                    true
                }
                None => false,
            },
            PointerPhase::Move => input.resolve().is_some_and(|point| self.pointer_move(point)),
            PointerPhase::Up => self.pointer_up(),
        }
    }

    /// Begin a stroke at `point` with the configured pen.
    ///
    /// A down while already stroking starts a fresh path from the new point;
    /// the segments drawn so far stay on the surface and are committed with
    /// the next pointer-up.
    pub fn pointer_down(&mut self, point: Point) {
        let style = self.config.stroke.style();
        self.state = StrokeState::Stroking(ActiveStroke::begin(point, style));
    }

    /// Extend the current stroke to `point`. No-op while idle.
    pub fn pointer_move(&mut self, point: Point) -> bool {
        let StrokeState::Stroking(stroke) = &mut self.state else {
            return false;
        };
        let segment = stroke.extend_to(point);
        let style = *stroke.style();
        if let Some(rect) = self.surface.draw_segment(segment, &style) {
            self.mark_dirty(rect);
        }
        true
    }

    /// Finish the current stroke and commit it to history. No-op while idle.
    pub fn pointer_up(&mut self) -> bool {
        let StrokeState::Stroking(stroke) = std::mem::take(&mut self.state) else {
            return false;
        };
        self.history.commit(self.surface.snapshot());
        log::debug!(
            "Stroke committed ({} segments, undo depth {})",
            stroke.segment_count(),
            self.history.undo_depth()
        );
        true
    }

    /// Revert to the previous committed state. Returns false if there is
    /// nothing to undo.
    ///
    /// With nothing to undo this is a no-op, even mid-stroke: the stroke in
    /// progress keeps drawing. Otherwise the restore overwrites any
    /// uncommitted ink and the controller goes idle.
    pub fn undo(&mut self) -> bool {
        let background = self.config.background_color();
        let Some(target) = self.history.undo() else {
            return false;
        };
        match target {
            RestoreTarget::Snapshot(snapshot) => {
                restore_or_fill(&mut self.surface, snapshot, background)
            }
            RestoreTarget::Background => self.surface.fill(background),
        }
        self.state = StrokeState::Idle;
        self.mark_all_dirty();
        log::debug!(
            "Undo (undo depth {}, redo depth {})",
            self.history.undo_depth(),
            self.history.redo_depth()
        );
        true
    }

    /// Re-apply the most recently undone state. Returns false if there is
    /// nothing to redo; like [`undo`](Self::undo), that case leaves a stroke
    /// in progress untouched.
    pub fn redo(&mut self) -> bool {
        let background = self.config.background_color();
        let Some(snapshot) = self.history.redo() else {
            return false;
        };
        restore_or_fill(&mut self.surface, snapshot, background);
        self.state = StrokeState::Idle;
        self.mark_all_dirty();
        log::debug!(
            "Redo (undo depth {}, redo depth {})",
            self.history.undo_depth(),
            self.history.redo_depth()
        );
        true
    }

    /// Wipe the surface to the background and drop all history.
    pub fn clear(&mut self) {
        self.surface.fill(self.config.background_color());
        self.history.clear();
        self.state = StrokeState::Idle;
        self.mark_all_dirty();
        log::debug!("Canvas cleared");
    }

    /// Reallocate the surface at a new size. All history and any stroke in
    /// progress are discarded.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.surface = Surface::new(width, height, self.config.background_color());
        self.history.clear();
        self.state = StrokeState::Idle;
        self.mark_all_dirty();
        log::info!("Surface resized to {}x{}", width, height);
    }

    fn mark_dirty(&mut self, rect: Rect) {
        self.dirty = Some(match self.dirty {
            Some(existing) => existing.union(rect),
            None => rect,
        });
    }

    fn mark_all_dirty(&mut self) {
        self.dirty = Some(self.surface.bounds());
    }
}

fn restore_or_fill(surface: &mut Surface, snapshot: &Snapshot, background: Color) {
    if let Err(e) = surface.restore(snapshot) {
        log::warn!("Discarding unusable history entry: {}", e);
        surface.fill(background);
    }
}
