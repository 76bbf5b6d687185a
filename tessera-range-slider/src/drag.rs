//! Per-gesture drag state.

use crate::{px::Px, state::HandleId};

/// What a press grabbed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragTarget {
    /// One of the handles.
    Handle(HandleId),
    /// The highlighted band between the handles; moves both together.
    RangeBody,
}

/// Handle translates recorded when the gesture started.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CapturedOffsets {
    /// Left handle translate at capture, if the gesture drives it.
    pub left: Option<Px>,
    /// Right handle translate at capture, if the gesture drives it.
    pub right: Option<Px>,
}

/// State of one press-move-release gesture.
///
/// Moves are computed relative to the press, not incrementally, so clamping
/// on one move never accumulates into the next.
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    target: DragTarget,
    start_x: Px,
    last_x: Px,
    offsets: CapturedOffsets,
}

impl DragSession {
    /// Captures a gesture given the committed handle translates.
    pub fn capture(target: DragTarget, cursor_x: Px, left: Px, right: Px) -> Self {
        let offsets = match target {
            DragTarget::Handle(HandleId::Left) => CapturedOffsets {
                left: Some(left),
                right: None,
            },
            DragTarget::Handle(HandleId::Right) => CapturedOffsets {
                left: None,
                right: Some(right),
            },
            DragTarget::RangeBody => CapturedOffsets {
                left: Some(left),
                right: Some(right),
            },
        };
        Self {
            target,
            start_x: cursor_x,
            last_x: cursor_x,
            offsets,
        }
    }

    /// What the pointer currently drives.
    pub fn target(&self) -> DragTarget {
        self.target
    }

    /// Cursor position the proposals are measured from.
    pub fn start_x(&self) -> Px {
        self.start_x
    }

    /// Handle translates captured when the gesture started.
    pub fn offsets(&self) -> CapturedOffsets {
        self.offsets
    }

    pub(crate) fn record_cursor(&mut self, cursor_x: Px) {
        self.last_x = cursor_x;
    }

    /// Proposed translate of `handle` for the cursor at `cursor_x`.
    ///
    /// `None` if the handle was not captured by this gesture.
    pub fn proposed(&self, handle: HandleId, cursor_x: Px) -> Option<Px> {
        let offset = match handle {
            HandleId::Left => self.offsets.left,
            HandleId::Right => self.offsets.right,
        }?;
        Some(offset + cursor_x - self.start_x)
    }

    /// Hands the capture over to the other handle after a shuffle.
    ///
    /// The captured offset carries over, so the pointer keeps the same
    /// relationship to whichever handle it now drives.
    pub(crate) fn reassign(&mut self, to: HandleId) {
        if self.target != DragTarget::Handle(to.other()) {
            return;
        }
        self.target = DragTarget::Handle(to);
        self.offsets = CapturedOffsets {
            left: self.offsets.right,
            right: self.offsets.left,
        };
    }

    /// Restarts the gesture from the latest cursor position with new handle
    /// translates. Used when the track is re-laid out mid-drag.
    pub(crate) fn rebase(&mut self, left: Px, right: Px) {
        self.start_x = self.last_x;
        if self.offsets.left.is_some() {
            self.offsets.left = Some(left);
        }
        if self.offsets.right.is_some() {
            self.offsets.right = Some(right);
        }
    }
}
