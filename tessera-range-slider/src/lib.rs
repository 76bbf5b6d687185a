//! Headless range slider for tessera.
//!
//! This crate holds everything a single or dual handle slider needs apart
//! from drawing it: mapping between pixels and integer values, the drag state
//! machine, handle collision rules, change notification and two-way binding
//! with a host form system.
//!
//! The host reports the measured track width with
//! [`SliderEngine::resize`], forwards pointer and keyboard input, and places
//! the two handles at [`SliderEngine::translate`] plus the highlighted band at
//! [`SliderEngine::indicator`].
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use parking_lot::Mutex;
//! use tessera_range_slider::{
//!     DragTarget, HandleId, Px, ScriptedPointer, SliderConfig, SliderEngine, SliderEvent,
//! };
//!
//! let mut slider = SliderEngine::new(SliderConfig::default().ceiling(10).from(3).to(7))?;
//! slider.resize(Px(117.0));
//!
//! let events = Arc::new(Mutex::new(Vec::new()));
//! let sink = Arc::clone(&events);
//! let _subscription = slider.subscribe(move |event: SliderEvent| {
//!     sink.lock().push(event);
//! });
//!
//! let mut gesture = ScriptedPointer::new()
//!     .press(DragTarget::Handle(HandleId::Left), 0.0)
//!     .move_to(20.0)
//!     .release();
//! slider.drive(&mut gesture);
//!
//! assert_eq!(
//!     *events.lock(),
//!     vec![SliderEvent::FromChanged(5), SliderEvent::DragEnded]
//! );
//! # Ok::<(), tessera_range_slider::ConfigError>(())
//! ```
#![deny(missing_docs, clippy::unwrap_used)]

pub mod binding;
pub mod callback;
pub mod config;
pub mod constraint;
pub mod drag;
pub mod emitter;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod input;
pub mod mapper;
pub mod observer;
pub mod px;
pub mod scheduler;
pub mod state;

#[cfg(test)]
mod tests;

pub use binding::{BindingInput, BindingStream, ExternalBinding};
pub use callback::{Callback, CallbackWith};
pub use config::SliderConfig;
pub use constraint::{ConstraintResolver, Resolution};
pub use drag::{DragSession, DragTarget};
pub use emitter::ValueEmitter;
pub use engine::{DragPhase, NudgeOutcome, SliderEngine};
pub use error::{Bound, ConfigError, Diagnostic, SetOutcome, ValidationError};
pub use geometry::{DEFAULT_HANDLE_WIDTH, RangeIndicator, TrackGeometry};
pub use input::{
    KeyNudge, MouseSample, PointerEvent, PointerSample, PointerSource, ScriptedPointer,
    TouchPoint, TouchSample,
};
pub use observer::{CancellationToken, SliderEvent, Subscription, SubscriptionKey};
pub use px::Px;
pub use state::{HandleId, SliderMode, SliderState, SliderValue, ValueField};
