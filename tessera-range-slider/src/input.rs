//! Pointer and keyboard input.
//!
//! Mouse and touch input differ only in how the horizontal coordinate is
//! read; the slider never cares which one drove a gesture. A host converts its
//! native events into [`PointerEvent`]s, either directly or by implementing
//! [`PointerSource`].

use std::collections::VecDeque;

use smallvec::SmallVec;

use crate::{drag::DragTarget, px::Px};

/// Anything that can report the horizontal pointer coordinate.
pub trait PointerSample {
    /// Horizontal coordinate in the host's client space, if the sample has one.
    fn client_x(&self) -> Option<Px>;
}

/// A mouse position sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouseSample {
    /// Horizontal cursor position.
    pub client_x: Px,
}

impl PointerSample for MouseSample {
    fn client_x(&self) -> Option<Px> {
        Some(self.client_x)
    }
}

/// One finger on a touch surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchPoint {
    /// Touch identifier assigned by the host.
    pub id: u64,
    /// Horizontal finger position.
    pub client_x: Px,
}

/// A touch sample; the first active touch point drives the slider.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TouchSample {
    /// Active touch points in the order the host reported them.
    pub touches: SmallVec<[TouchPoint; 2]>,
}

impl TouchSample {
    /// Sample with one touch point.
    pub fn single(id: u64, client_x: Px) -> Self {
        let mut touches = SmallVec::new();
        touches.push(TouchPoint { id, client_x });
        Self { touches }
    }
}

impl PointerSample for TouchSample {
    fn client_x(&self) -> Option<Px> {
        self.touches.first().map(|touch| touch.client_x)
    }
}

/// A normalized pointer event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// Pointer went down on `target` at `x`.
    Press {
        /// What was pressed.
        target: DragTarget,
        /// Cursor position.
        x: Px,
    },
    /// Pointer moved to `x`.
    Move {
        /// Cursor position.
        x: Px,
    },
    /// Pointer went up.
    Release,
    /// The host aborted the gesture.
    Cancel,
}

impl PointerEvent {
    /// Builds a press from any sample. `None` when the sample has no coordinate.
    pub fn press(target: DragTarget, sample: &impl PointerSample) -> Option<Self> {
        sample.client_x().map(|x| PointerEvent::Press { target, x })
    }

    /// Builds a move from any sample. `None` when the sample has no coordinate.
    pub fn moved(sample: &impl PointerSample) -> Option<Self> {
        sample.client_x().map(|x| PointerEvent::Move { x })
    }
}

/// A host environment that produces pointer events.
pub trait PointerSource {
    /// Next pending event, or `None` when the source is drained.
    fn next_event(&mut self) -> Option<PointerEvent>;
}

/// Pre-recorded gesture, used by tests and the headless demo.
#[derive(Debug, Clone, Default)]
pub struct ScriptedPointer {
    events: VecDeque<PointerEvent>,
}

impl ScriptedPointer {
    /// Empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a press on `target` at `x`.
    pub fn press(mut self, target: DragTarget, x: f32) -> Self {
        self.events.push_back(PointerEvent::Press { target, x: Px(x) });
        self
    }

    /// Appends a move to `x`.
    pub fn move_to(mut self, x: f32) -> Self {
        self.events.push_back(PointerEvent::Move { x: Px(x) });
        self
    }

    /// Appends a release.
    pub fn release(mut self) -> Self {
        self.events.push_back(PointerEvent::Release);
        self
    }

    /// Appends a cancel.
    pub fn cancel(mut self) -> Self {
        self.events.push_back(PointerEvent::Cancel);
        self
    }

    /// Number of events not yet consumed.
    pub fn remaining(&self) -> usize {
        self.events.len()
    }
}

impl PointerSource for ScriptedPointer {
    fn next_event(&mut self) -> Option<PointerEvent> {
        self.events.pop_front()
    }
}

/// A single keyboard step on the focused handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyNudge {
    /// One step down (left or down arrow).
    Decrease,
    /// One step up (right or up arrow).
    Increase,
}
