//! Change notification policy.
//!
//! Each field is de-duplicated on its own against the value last notified for
//! it. In live mode values go out while dragging; otherwise they are held
//! back until the gesture ends.

use smallvec::SmallVec;

use crate::{observer::SliderEvent, state::SliderValue};

/// Events produced by one emission pass.
pub type Emission = SmallVec<[SliderEvent; 2]>;

/// Decides when and what to notify.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueEmitter {
    live: bool,
    last: SliderValue,
}

impl ValueEmitter {
    /// Starts with `initial` as the last notified value, so the initial
    /// configuration is never reported as a change.
    pub fn new(initial: SliderValue, live: bool) -> Self {
        Self {
            live,
            last: initial,
        }
    }

    /// Whether values are emitted while dragging.
    pub fn is_live(&self) -> bool {
        self.live
    }

    /// Switches between live and on-release emission.
    pub fn set_live(&mut self, live: bool) {
        self.live = live;
    }

    /// Value last notified to observers.
    pub fn last(&self) -> SliderValue {
        self.last
    }

    /// Replaces the baseline without notifying. Used for programmatic writes.
    pub fn reset(&mut self, baseline: SliderValue) {
        self.last = baseline;
    }

    /// Called after every accepted drag move.
    pub fn on_move(&mut self, current: SliderValue) -> Emission {
        if self.live {
            self.emit(current)
        } else {
            Emission::new()
        }
    }

    /// Called when a gesture ends.
    ///
    /// Live mode has already reported every change, so this only catches up
    /// in deferred mode; the de-dup makes a second pass harmless either way.
    pub fn on_release(&mut self, current: SliderValue) -> Emission {
        self.emit(current)
    }

    /// Emits every field that differs from its last notified value.
    pub fn emit(&mut self, current: SliderValue) -> Emission {
        let mut events = Emission::new();
        match (self.last, current) {
            (SliderValue::Range { from: last_from, to: last_to }, SliderValue::Range { from, to }) => {
                if from != last_from {
                    events.push(SliderEvent::FromChanged(from));
                }
                if to != last_to {
                    events.push(SliderEvent::ToChanged(to));
                }
            }
            (SliderValue::Single(last), SliderValue::Single(value)) => {
                if value != last {
                    events.push(SliderEvent::ValueChanged(value));
                }
            }
            (_, SliderValue::Range { from, to }) => {
                events.push(SliderEvent::FromChanged(from));
                events.push(SliderEvent::ToChanged(to));
            }
            (_, SliderValue::Single(value)) => {
                events.push(SliderEvent::ValueChanged(value));
            }
        }
        self.last = current;
        events
    }
}
