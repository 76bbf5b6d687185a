//! Error and diagnostic types.
//!
//! Two tiers exist. Programmatic setters soften out-of-range input into a
//! [`Diagnostic`] and keep going. External writes through the binding adapter
//! are strict and fail with a [`ValidationError`] without touching state.

use thiserror::Error;

use crate::state::{SliderMode, ValueField};

/// A rejected external write.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A range value was written to a single slider or the other way around.
    #[error("expected a {expected:?} value but received a {received:?} value")]
    ShapeMismatch {
        /// Mode of the slider.
        expected: SliderMode,
        /// Mode of the written value.
        received: SliderMode,
    },
    /// A required field was absent.
    #[error("`{0}` is missing")]
    Missing(ValueField),
    /// A field was NaN.
    #[error("`{0}` is not a number")]
    NotANumber(ValueField),
    /// `from` was negative.
    #[error("from < 0 (from = {from})")]
    FromBelowZero {
        /// Written `from`.
        from: f64,
    },
    /// `to` exceeded the ceiling.
    #[error("to > ceiling (to = {to}, ceiling = {ceiling})")]
    ToAboveCeiling {
        /// Written `to`.
        to: f64,
        /// Current ceiling.
        ceiling: u32,
    },
    /// `to` was smaller than `from`.
    #[error("to < from (from = {from}, to = {to})")]
    Inverted {
        /// Written `from`.
        from: f64,
        /// Written `to`.
        to: f64,
    },
    /// A single value fell outside `[0, ceiling]`.
    #[error("value outside [0, {ceiling}] (value = {value})")]
    ValueOutOfRange {
        /// Written value.
        value: f64,
        /// Current ceiling.
        ceiling: u32,
    },
}

/// An unusable slider configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// The handle width was NaN, infinite or negative.
    #[error("handle width must be a finite, non-negative pixel count, got {0}")]
    InvalidHandleWidth(f32),
    /// `step_labels` was set but empty.
    #[error("step labels must contain at least one label")]
    EmptyStepLabels,
}

/// Which bound a softened setter ran into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    /// Zero, the lowest value.
    Zero,
    /// The slider ceiling.
    Ceiling,
    /// The counterpart handle's value.
    Counterpart,
}

/// Non-fatal report emitted when a programmatic setter had to clamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Diagnostic {
    /// Field that was written.
    pub field: ValueField,
    /// Value the caller asked for.
    pub requested: i64,
    /// Value actually stored.
    pub applied: u32,
    /// Bound the request violated.
    pub bound: Bound,
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "`{}` = {} is out of range, clamped to {} ({:?})",
            self.field, self.requested, self.applied, self.bound
        )
    }
}

/// Result of a programmatic setter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetOutcome {
    /// Value actually stored.
    pub applied: u32,
    /// Present when the request had to be clamped.
    pub diagnostic: Option<Diagnostic>,
}

impl SetOutcome {
    pub(crate) fn exact(applied: u32) -> Self {
        Self {
            applied,
            diagnostic: None,
        }
    }

    /// Whether the requested value was out of range.
    pub fn was_clamped(&self) -> bool {
        self.diagnostic.is_some()
    }
}

/// Clamps `requested` into `[low, high]`, describing the clamp if one happened.
///
/// `low_bound`/`high_bound` say which logical bound each end stands for.
pub(crate) fn soften(
    field: ValueField,
    requested: i64,
    (low, low_bound): (u32, Bound),
    (high, high_bound): (u32, Bound),
) -> SetOutcome {
    let (applied, bound) = if requested < i64::from(low) {
        (low, Some(low_bound))
    } else if requested > i64::from(high) {
        (high, Some(high_bound))
    } else {
        (requested as u32, None)
    };

    let diagnostic = bound.map(|bound| Diagnostic {
        field,
        requested,
        applied,
        bound,
    });
    if let Some(diagnostic) = diagnostic {
        tracing::warn!(%diagnostic, "programmatic slider write softened");
    }
    SetOutcome {
        applied,
        diagnostic,
    }
}
