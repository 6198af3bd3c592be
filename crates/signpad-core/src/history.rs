//! Undo/redo history of committed surface states.
//!
//! Each entry is the full surface as it looked right after a stroke ended.
//! The top of the undo stack is therefore always the committed state of the
//! surface, and undoing restores the entry beneath it.

use crate::surface::Snapshot;

/// What the surface should show after an undo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestoreTarget<'a> {
    /// A committed state.
    Snapshot(&'a Snapshot),
    /// Nothing committed remains; show the plain background.
    Background,
}

/// Undo and redo stacks, optionally bounded.
///
/// When a bound is set and exceeded, the oldest entry is folded into a base
/// state. Undoing past every remaining entry restores that base rather than
/// the background, so the surface never jumps back further than the history
/// can account for.
#[derive(Debug, Default)]
pub struct History {
    undo_stack: Vec<Snapshot>,
    redo_stack: Vec<Snapshot>,
    base: Option<Snapshot>,
    limit: Option<usize>,
}

impl History {
    /// Create an unbounded history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a history keeping at most `limit` undo steps (`None` for no bound).
    pub fn with_limit(limit: Option<usize>) -> Self {
        Self {
            limit: limit.map(|l| l.max(1)),
            ..Self::default()
        }
    }

    /// Record a newly committed state. Discards any redo entries.
    pub fn commit(&mut self, snapshot: Snapshot) {
        self.undo_stack.push(snapshot);
        self.redo_stack.clear();

        if let Some(limit) = self.limit {
            while self.undo_stack.len() > limit {
                self.base = Some(self.undo_stack.remove(0));
            }
        }
    }

    /// Step back one state. Returns `None` if there is nothing to undo.
    pub fn undo(&mut self) -> Option<RestoreTarget<'_>> {
        let entry = self.undo_stack.pop()?;
        self.redo_stack.push(entry);

        Some(match self.undo_stack.last().or(self.base.as_ref()) {
            Some(snapshot) => RestoreTarget::Snapshot(snapshot),
            None => RestoreTarget::Background,
        })
    }

    /// Step forward one state. Returns `None` if there is nothing to redo.
    pub fn redo(&mut self) -> Option<&Snapshot> {
        let entry = self.redo_stack.pop()?;
        self.undo_stack.push(entry);
        self.undo_stack.last()
    }

    /// Drop every entry, including the base state.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.base = None;
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }
}
