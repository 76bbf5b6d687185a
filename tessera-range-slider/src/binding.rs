//! Two-way binding with a host form system.
//!
//! The host writes loosely typed values through [`ExternalBinding::write`],
//! which validates them strictly. In the other direction the slider pushes
//! every emitted value into a [`BindingStream`], which forwards it to the
//! host's change callback when it differs from the previous one.

use crate::{
    callback::{Callback, CallbackWith},
    error::ValidationError,
    observer::CancellationToken,
    state::{SliderMode, SliderValue, ValueField},
};

/// A value as written by the host, before validation.
///
/// Fields are optional and floating point because form systems routinely
/// hand over missing or non-numeric data.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BindingInput {
    /// A range value; either bound may be missing.
    Range {
        /// Lower bound.
        from: Option<f64>,
        /// Upper bound.
        to: Option<f64>,
    },
    /// A single value, possibly missing.
    Single(Option<f64>),
}

impl BindingInput {
    /// Range input with both bounds present.
    pub fn range(from: f64, to: f64) -> Self {
        BindingInput::Range {
            from: Some(from),
            to: Some(to),
        }
    }

    /// Single input with the value present.
    pub fn single(value: f64) -> Self {
        BindingInput::Single(Some(value))
    }

    fn mode(&self) -> SliderMode {
        match self {
            BindingInput::Range { .. } => SliderMode::Range,
            BindingInput::Single(_) => SliderMode::Single,
        }
    }
}

impl From<SliderValue> for BindingInput {
    fn from(value: SliderValue) -> Self {
        match value {
            SliderValue::Range { from, to } => BindingInput::range(f64::from(from), f64::from(to)),
            SliderValue::Single(value) => BindingInput::single(f64::from(value)),
        }
    }
}

/// The contract a host form system talks to.
pub trait ExternalBinding {
    /// Replaces the current value. Fails without side effects if the value
    /// does not fit the slider's mode and bounds.
    fn write(&mut self, value: BindingInput) -> Result<(), ValidationError>;

    /// Sets the callback receiving value changes.
    fn register_change_callback(&mut self, callback: CallbackWith<SliderValue>);

    /// Sets the callback fired on the first user interaction.
    fn register_touched_callback(&mut self, callback: Callback);

    /// Enables or disables user input. Disabling mid-drag cancels the
    /// gesture without emitting.
    fn set_disabled(&mut self, disabled: bool);
}

fn required(value: Option<f64>, field: ValueField) -> Result<f64, ValidationError> {
    let value = value.ok_or(ValidationError::Missing(field))?;
    if value.is_nan() {
        return Err(ValidationError::NotANumber(field));
    }
    Ok(value)
}

/// Checks a host value against the slider's mode and ceiling.
///
/// Accepted values are rounded to the nearest integer step.
pub fn validate(
    input: BindingInput,
    mode: SliderMode,
    ceiling: u32,
) -> Result<SliderValue, ValidationError> {
    if input.mode() != mode {
        return Err(ValidationError::ShapeMismatch {
            expected: mode,
            received: input.mode(),
        });
    }

    let ceiling_f = f64::from(ceiling);
    match input {
        BindingInput::Range { from, to } => {
            let from = required(from, ValueField::From)?;
            let to = required(to, ValueField::To)?;
            if from < 0.0 {
                return Err(ValidationError::FromBelowZero { from });
            }
            if to > ceiling_f {
                return Err(ValidationError::ToAboveCeiling { to, ceiling });
            }
            if to < from {
                return Err(ValidationError::Inverted { from, to });
            }
            Ok(SliderValue::Range {
                from: from.round() as u32,
                to: to.round() as u32,
            })
        }
        BindingInput::Single(value) => {
            let value = required(value, ValueField::Value)?;
            if !(0.0..=ceiling_f).contains(&value) {
                return Err(ValidationError::ValueOutOfRange { value, ceiling });
            }
            Ok(SliderValue::Single(value.round() as u32))
        }
    }
}

/// De-duplicating change stream towards the host, plus touched tracking.
#[derive(Debug)]
pub struct BindingStream {
    last: Option<SliderValue>,
    on_change: Option<CallbackWith<SliderValue>>,
    on_touched: Option<Callback>,
    touched: bool,
    token: CancellationToken,
}

impl BindingStream {
    /// Creates a stream without callbacks, silenced once `token` is cancelled.
    pub fn new(token: CancellationToken) -> Self {
        Self {
            last: None,
            on_change: None,
            on_touched: None,
            touched: false,
            token,
        }
    }

    /// Replaces the change callback.
    pub fn set_change_callback(&mut self, callback: CallbackWith<SliderValue>) {
        self.on_change = Some(callback);
    }

    /// Replaces the touched callback.
    pub fn set_touched_callback(&mut self, callback: Callback) {
        self.on_touched = Some(callback);
    }

    /// Forwards `value` if it structurally differs from the previous one.
    /// Returns whether the change callback ran.
    pub fn push(&mut self, value: SliderValue) -> bool {
        if self.token.is_cancelled() || self.last == Some(value) {
            return false;
        }
        self.last = Some(value);
        match &self.on_change {
            Some(callback) => {
                callback.call(value);
                true
            }
            None => false,
        }
    }

    /// Reports the first user interaction. Only the first call has an effect.
    pub fn mark_touched(&mut self) {
        if self.touched || self.token.is_cancelled() {
            return;
        }
        self.touched = true;
        if let Some(callback) = &self.on_touched {
            callback.call();
        }
    }

    /// Whether the user has interacted with the slider yet.
    pub fn is_touched(&self) -> bool {
        self.touched
    }

    pub(crate) fn clear(&mut self) {
        self.on_change = None;
        self.on_touched = None;
    }
}
