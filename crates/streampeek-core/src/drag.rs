// crates/streampeek-core/src/drag.rs
//
// Pointer-driven panel repositioning. The dragging flag scopes the whole
// interaction — the UI only routes move/release events while `is_dragging()`
// is true, so there is nothing to unhook on teardown.

use crate::geometry::{Pos, Rect, Size};

/// Where the pointer was released relative to the panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragEnd {
    Inside,
    Outside,
}

#[derive(Debug, Default)]
pub struct DragController {
    dragging: bool,
    /// Pointer offset from the panel's top-left, captured at drag start so
    /// the panel doesn't jump under the cursor.
    offset: Pos,
}

impl DragController {
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Enter the dragging state, recording where inside the panel the
    /// pointer grabbed it.
    pub fn begin(&mut self, pointer: Pos, panel_rect: Rect) {
        self.offset = Pos::new(pointer.x - panel_rect.left(), pointer.y - panel_rect.top());
        self.dragging = true;
    }

    /// New top-left for the panel given the current pointer position,
    /// clamped so the panel stays fully inside the viewport.
    pub fn drag_to(&self, pointer: Pos, viewport: Size, panel: Size) -> Pos {
        let left = (pointer.x - self.offset.x).min(viewport.w - panel.w).max(0.0);
        let top = (pointer.y - self.offset.y).min(viewport.h - panel.h).max(0.0);
        Pos::new(left, top)
    }

    /// Exit the dragging state and report whether the release point lies
    /// outside the panel's bounds (the controller resumes auto-hide then).
    pub fn end(&mut self, pointer: Pos, panel_rect: Rect) -> DragEnd {
        self.dragging = false;
        if panel_rect.contains(pointer) {
            DragEnd::Inside
        } else {
            DragEnd::Outside
        }
    }

    /// Safe to call whether or not a drag is active.
    pub fn cancel(&mut self) {
        self.dragging = false;
    }
}
