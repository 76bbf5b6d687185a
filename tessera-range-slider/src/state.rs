//! Value-level slider state.

use std::fmt;

/// Whether the slider selects a range or a single value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SliderMode {
    /// Two handles selecting `from..=to`.
    #[default]
    Range,
    /// One handle selecting `value`.
    Single,
}

/// Identity of a handle.
///
/// In single mode only [`HandleId::Left`] exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandleId {
    /// The `from` handle (or the only handle in single mode).
    Left,
    /// The `to` handle.
    Right,
}

impl HandleId {
    /// The counterpart handle.
    pub fn other(self) -> Self {
        match self {
            HandleId::Left => HandleId::Right,
            HandleId::Right => HandleId::Left,
        }
    }
}

/// A complete slider value, as observed from outside.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SliderValue {
    /// Range mode value.
    Range {
        /// Lower value.
        from: u32,
        /// Upper value.
        to: u32,
    },
    /// Single mode value.
    Single(u32),
}

impl SliderValue {
    /// Mode this value belongs to.
    pub fn mode(&self) -> SliderMode {
        match self {
            SliderValue::Range { .. } => SliderMode::Range,
            SliderValue::Single(_) => SliderMode::Single,
        }
    }
}

impl fmt::Display for SliderValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SliderValue::Range { from, to } => write!(f, "{from}..={to}"),
            SliderValue::Single(value) => write!(f, "{value}"),
        }
    }
}

/// Named value field, used in diagnostics and emission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueField {
    /// Lower range value.
    From,
    /// Upper range value.
    To,
    /// Single-mode value.
    Value,
}

impl fmt::Display for ValueField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ValueField::From => "from",
            ValueField::To => "to",
            ValueField::Value => "value",
        })
    }
}

/// Committed values and behavior flags.
///
/// At rest `0 <= from <= to <= ceiling` (range mode) or `value <= ceiling`
/// (single mode). Both handles' values are kept in `low`/`high`; single mode
/// only uses `low`.
#[derive(Debug, Clone, PartialEq)]
pub struct SliderState {
    pub(crate) ceiling: u32,
    pub(crate) mode: SliderMode,
    pub(crate) low: u32,
    pub(crate) high: u32,
    pub(crate) overlap_allowed: bool,
    pub(crate) shuffle_allowed: bool,
    pub(crate) live_emission: bool,
    pub(crate) disabled: bool,
}

impl SliderState {
    /// Largest selectable value.
    pub fn ceiling(&self) -> u32 {
        self.ceiling
    }

    /// Range or single mode.
    pub fn mode(&self) -> SliderMode {
        self.mode
    }

    /// Lower range value.
    pub fn from(&self) -> u32 {
        self.low
    }

    /// Upper range value. Equals `from` in single mode.
    pub fn to(&self) -> u32 {
        self.high
    }

    /// Single-mode value. Mirrors `from` in range mode.
    pub fn value(&self) -> u32 {
        self.low
    }

    /// Whether the handles may share a value.
    pub fn overlap_allowed(&self) -> bool {
        self.overlap_allowed
    }

    /// Whether crossing handles swap roles.
    pub fn shuffle_allowed(&self) -> bool {
        self.shuffle_allowed
    }

    /// Whether values are emitted while dragging.
    pub fn live_emission(&self) -> bool {
        self.live_emission
    }

    /// Whether user input is rejected.
    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Snapshot of the current value.
    pub fn snapshot(&self) -> SliderValue {
        match self.mode {
            SliderMode::Range => SliderValue::Range {
                from: self.low,
                to: self.high,
            },
            SliderMode::Single => SliderValue::Single(self.low),
        }
    }

    pub(crate) fn value_of(&self, handle: HandleId) -> u32 {
        match handle {
            HandleId::Left => self.low,
            HandleId::Right => self.high,
        }
    }

    pub(crate) fn set_value_of(&mut self, handle: HandleId, value: u32) {
        match handle {
            HandleId::Left => self.low = value,
            HandleId::Right => self.high = value,
        }
    }

    /// Smallest allowed distance between `from` and `to`, in steps.
    pub(crate) fn minimal_gap_steps(&self) -> u32 {
        if self.overlap_allowed || self.ceiling == 0 {
            0
        } else {
            1
        }
    }

    /// Handles may swap roles only when they are allowed to coincide.
    pub(crate) fn can_shuffle(&self) -> bool {
        self.shuffle_allowed && self.overlap_allowed
    }
}
