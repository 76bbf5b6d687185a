//! Slider configuration.
//!
//! ## Usage
//!
//! ```
//! use tessera_range_slider::{SliderConfig, SliderMode};
//!
//! let config = SliderConfig::default()
//!     .ceiling(10)
//!     .from(3)
//!     .to(7)
//!     .overlap_allowed(false);
//! assert_eq!(config.mode, SliderMode::Range);
//! ```
use derive_setters::Setters;

use crate::{
    error::{Bound, ConfigError, Diagnostic, soften},
    geometry::DEFAULT_HANDLE_WIDTH,
    px::Px,
    state::{SliderMode, SliderState, ValueField},
};

/// Arguments for a slider instance.
#[derive(Debug, Clone, PartialEq, Setters)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SliderConfig {
    /// Largest selectable value. Ignored when `step_labels` is set.
    pub ceiling: u32,
    /// Range (two handles) or single (one handle).
    pub mode: SliderMode,
    /// Initial lower value in range mode.
    pub from: u32,
    /// Initial upper value in range mode. Defaults to the ceiling.
    #[setters(strip_option)]
    pub to: Option<u32>,
    /// Initial value in single mode.
    pub value: u32,
    /// Whether both handles may rest on the same value.
    pub overlap_allowed: bool,
    /// Whether handles swap roles when dragged across each other.
    pub shuffle_allowed: bool,
    /// Emit while dragging instead of once on release.
    pub live_emission: bool,
    /// Reject pointer and keyboard input.
    pub disabled: bool,
    /// Labels replacing the numeric step grid, one per step.
    #[setters(strip_option)]
    pub step_labels: Option<Vec<String>>,
    /// Width of a handle in pixels.
    pub handle_width: Px,
    /// Relayout after the host's next layout pass instead of immediately when
    /// values or the ceiling are written.
    pub defer_relayout: bool,
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self {
            ceiling: 100,
            mode: SliderMode::Range,
            from: 0,
            to: None,
            value: 0,
            overlap_allowed: true,
            shuffle_allowed: true,
            live_emission: false,
            disabled: false,
            step_labels: None,
            handle_width: DEFAULT_HANDLE_WIDTH,
            defer_relayout: false,
        }
    }
}

pub(crate) struct ResolvedConfig {
    pub(crate) state: SliderState,
    pub(crate) handle_width: Px,
    pub(crate) step_labels: Option<Vec<String>>,
    pub(crate) defer_relayout: bool,
    pub(crate) diagnostics: Vec<Diagnostic>,
}

impl SliderConfig {
    /// Effective ceiling after step labels are taken into account.
    pub fn effective_ceiling(&self) -> u32 {
        match &self.step_labels {
            Some(labels) if !labels.is_empty() => (labels.len() - 1) as u32,
            _ => self.ceiling,
        }
    }

    pub(crate) fn resolve(self) -> Result<ResolvedConfig, ConfigError> {
        let width = self.handle_width.to_f32();
        if !width.is_finite() || width < 0.0 {
            return Err(ConfigError::InvalidHandleWidth(width));
        }
        if self.step_labels.as_ref().is_some_and(Vec::is_empty) {
            return Err(ConfigError::EmptyStepLabels);
        }

        let ceiling = self.effective_ceiling();
        if self.step_labels.is_some() && ceiling != self.ceiling {
            tracing::debug!(ceiling, "step labels override the configured ceiling");
        }

        let mut diagnostics = Vec::new();
        let (low, high) = match self.mode {
            SliderMode::Range => {
                let from = soften(
                    ValueField::From,
                    i64::from(self.from),
                    (0, Bound::Zero),
                    (ceiling, Bound::Ceiling),
                );
                let to = soften(
                    ValueField::To,
                    i64::from(self.to.unwrap_or(ceiling)),
                    (from.applied, Bound::Counterpart),
                    (ceiling, Bound::Ceiling),
                );
                diagnostics.extend(from.diagnostic);
                diagnostics.extend(to.diagnostic);
                (from.applied, to.applied)
            }
            SliderMode::Single => {
                let value = soften(
                    ValueField::Value,
                    i64::from(self.value),
                    (0, Bound::Zero),
                    (ceiling, Bound::Ceiling),
                );
                diagnostics.extend(value.diagnostic);
                (value.applied, value.applied)
            }
        };

        Ok(ResolvedConfig {
            state: SliderState {
                ceiling,
                mode: self.mode,
                low,
                high,
                overlap_allowed: self.overlap_allowed,
                shuffle_allowed: self.shuffle_allowed,
                live_emission: self.live_emission,
                disabled: self.disabled,
            },
            handle_width: self.handle_width,
            step_labels: self.step_labels,
            defer_relayout: self.defer_relayout,
            diagnostics,
        })
    }
}
