//! # Slider engine
//!
//! [`SliderEngine`] owns one slider instance and processes every input it
//! receives: pointer gestures, keyboard nudges, track resizes, programmatic
//! writes and host writes through [`ExternalBinding`].
//!
//! ## Drag lifecycle
//!
//! ```text
//! Idle --press--> Dragging(target) --move--> Dragging(target') --release--> Idle
//! ```
//!
//! A move may change the target when handles shuffle. Resizes and value
//! writes are accepted in both phases; mid-drag they rebase the gesture
//! instead of cancelling it. Only one gesture is tracked at a time: a press
//! while dragging is ignored.
//!
//! ## Usage
//!
//! ```
//! use tessera_range_slider::{DragTarget, HandleId, Px, SliderConfig, SliderEngine, SliderValue};
//!
//! let mut slider = SliderEngine::new(SliderConfig::default().ceiling(10).from(3).to(7))?;
//! slider.resize(Px(117.0)); // 100 px of travel, 10 px per step
//!
//! slider.press(DragTarget::Handle(HandleId::Left), Px(30.0));
//! slider.move_to(Px(50.0));
//! slider.release();
//!
//! assert_eq!(slider.value(), SliderValue::Range { from: 5, to: 7 });
//! # Ok::<(), tessera_range_slider::ConfigError>(())
//! ```

use tracing::{debug, trace, warn};

use crate::{
    binding::{BindingInput, BindingStream, ExternalBinding, validate},
    callback::{Callback, CallbackWith},
    config::SliderConfig,
    constraint::{ConstraintResolver, Resolution},
    drag::{DragSession, DragTarget},
    emitter::{Emission, ValueEmitter},
    error::{Bound, ConfigError, Diagnostic, SetOutcome, ValidationError, soften},
    geometry::{RangeIndicator, TrackGeometry},
    input::{KeyNudge, PointerEvent, PointerSource},
    mapper::{translate_to_value, value_to_translate},
    observer::{CancellationToken, ObserverRegistry, SliderEvent, Subscription},
    px::Px,
    scheduler::{DeferredTask, LayoutScheduler},
    state::{HandleId, SliderMode, SliderState, SliderValue, ValueField},
};

/// Drag state machine phase.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum DragPhase {
    /// No gesture in progress.
    #[default]
    Idle,
    /// A pointer gesture is in progress.
    Dragging(DragSession),
}

/// Result of a keyboard nudge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NudgeOutcome {
    /// Handle holding focus after the nudge; differs from the nudged handle
    /// when the nudge was re-routed across the counterpart.
    pub focused: HandleId,
    /// Whether any value changed.
    pub changed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
struct HandlePositions {
    left: Px,
    right: Px,
}

impl HandlePositions {
    fn get(&self, handle: HandleId) -> Px {
        match handle {
            HandleId::Left => self.left,
            HandleId::Right => self.right,
        }
    }

    fn set(&mut self, handle: HandleId, translate: Px) {
        match handle {
            HandleId::Left => self.left = translate,
            HandleId::Right => self.right = translate,
        }
    }
}

/// A single or dual handle slider instance.
#[derive(Debug)]
pub struct SliderEngine {
    state: SliderState,
    geometry: TrackGeometry,
    handles: HandlePositions,
    indicator: RangeIndicator,
    phase: DragPhase,
    focused: Option<HandleId>,
    emitter: ValueEmitter,
    observers: ObserverRegistry,
    binding: BindingStream,
    scheduler: LayoutScheduler,
    step_labels: Option<Vec<String>>,
    defer_relayout: bool,
    token: CancellationToken,
}

impl SliderEngine {
    /// Creates a slider. Out-of-range initial values are clamped with a
    /// warning; only an unusable configuration fails.
    pub fn new(config: SliderConfig) -> Result<Self, ConfigError> {
        let resolved = config.resolve()?;
        if !resolved.diagnostics.is_empty() {
            debug!(
                softened = resolved.diagnostics.len(),
                "slider created with corrected initial values"
            );
        }
        let token = CancellationToken::new();
        let state = resolved.state;
        let mut engine = Self {
            geometry: TrackGeometry::unmeasured(resolved.handle_width),
            handles: HandlePositions::default(),
            indicator: RangeIndicator::default(),
            phase: DragPhase::Idle,
            focused: None,
            emitter: ValueEmitter::new(state.snapshot(), state.live_emission),
            observers: ObserverRegistry::new(token.clone()),
            binding: BindingStream::new(token.clone()),
            scheduler: LayoutScheduler::default(),
            step_labels: resolved.step_labels,
            defer_relayout: resolved.defer_relayout,
            token,
            state,
        };
        engine.relayout();
        Ok(engine)
    }

    /// Committed value-level state.
    pub fn state(&self) -> &SliderState {
        &self.state
    }

    /// Snapshot of the committed value.
    pub fn value(&self) -> SliderValue {
        self.state.snapshot()
    }

    /// Track measurements from the last [`resize`](Self::resize) or
    /// [`run_idle`](Self::run_idle).
    pub fn geometry(&self) -> &TrackGeometry {
        &self.geometry
    }

    /// Current translate of a handle.
    pub fn translate(&self, handle: HandleId) -> Px {
        self.handles.get(handle)
    }

    /// Highlighted band between the handles.
    pub fn indicator(&self) -> RangeIndicator {
        self.indicator
    }

    /// Current drag phase.
    pub fn phase(&self) -> &DragPhase {
        &self.phase
    }

    /// Whether a pointer gesture is in progress.
    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, DragPhase::Dragging(_))
    }

    /// What the running gesture drives, if any.
    pub fn drag_target(&self) -> Option<DragTarget> {
        match &self.phase {
            DragPhase::Dragging(session) => Some(session.target()),
            DragPhase::Idle => None,
        }
    }

    /// Handle holding keyboard focus.
    pub fn focused(&self) -> Option<HandleId> {
        self.focused
    }

    /// Whether the user has pressed the slider at least once.
    pub fn is_touched(&self) -> bool {
        self.binding.is_touched()
    }

    /// Whether [`teardown`](Self::teardown) has run.
    pub fn is_torn_down(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Configured step labels, if any.
    pub fn step_labels(&self) -> Option<&[String]> {
        self.step_labels.as_deref()
    }

    /// Label of a step when step labels are configured.
    pub fn label_for(&self, value: u32) -> Option<&str> {
        self.step_labels
            .as_ref()
            .and_then(|labels| labels.get(value as usize))
            .map(String::as_str)
    }

    /// Registers an observer for value and drag events.
    pub fn subscribe(&self, observer: impl Into<CallbackWith<SliderEvent>>) -> Subscription {
        self.observers.subscribe(observer.into())
    }

    /// Releases every listener and stops reacting to input. Idempotent.
    pub fn teardown(&mut self) {
        if !self.token.cancel() {
            return;
        }
        debug!("slider torn down");
        self.phase = DragPhase::Idle;
        self.observers.clear();
        self.binding.clear();
        self.scheduler.clear();
    }

    // Geometry

    /// Reports the measured track width. Re-snaps the handles immediately.
    pub fn resize(&mut self, track_width: Px) {
        if self.is_torn_down() {
            return;
        }
        self.measure(track_width);
        self.relayout();
    }

    fn measure(&mut self, track_width: Px) {
        self.geometry = TrackGeometry::new(track_width, self.geometry.handle_width());
        trace!(
            track_width = self.geometry.track_width().to_f32(),
            max_translate = self.geometry.max_translate().to_f32(),
            "track measured"
        );
    }

    /// Runs work deferred to after the host's layout pass. Returns the number
    /// of tasks run.
    ///
    /// `track_width` is the width measured once that pass has settled; a
    /// deferred relayout re-measures with it before re-snapping the handles.
    pub fn run_idle(&mut self, track_width: Px) -> usize {
        if self.is_torn_down() {
            return 0;
        }
        let tasks = self.scheduler.take();
        for task in &tasks {
            match task {
                DeferredTask::Relayout => {
                    self.measure(track_width);
                    self.relayout();
                }
            }
        }
        tasks.len()
    }

    /// Whether a relayout waits for [`run_idle`](Self::run_idle).
    pub fn has_pending_layout(&self) -> bool {
        self.scheduler.has_pending()
    }

    fn request_relayout(&mut self) {
        if self.defer_relayout {
            self.scheduler.schedule(DeferredTask::Relayout);
        } else {
            self.relayout();
        }
    }

    /// Snaps both handles onto their value positions and rebases a running
    /// gesture onto them.
    fn relayout(&mut self) {
        self.snap_handles();
        if let DragPhase::Dragging(session) = &mut self.phase {
            session.rebase(self.handles.left, self.handles.right);
            debug!("drag rebased after relayout");
        }
    }

    fn snap_handles(&mut self) {
        let ceiling = self.state.ceiling;
        self.handles.left = value_to_translate(self.state.low, &self.geometry, ceiling);
        self.handles.right = match self.state.mode {
            SliderMode::Range => value_to_translate(self.state.high, &self.geometry, ceiling),
            SliderMode::Single => self.handles.left,
        };
        self.update_indicator();
    }

    fn update_indicator(&mut self) {
        self.indicator = match self.state.mode {
            SliderMode::Range => {
                RangeIndicator::between(self.handles.left, self.handles.right, &self.geometry)
            }
            SliderMode::Single => RangeIndicator::up_to(self.handles.left, &self.geometry),
        };
    }

    fn resolver(&self) -> ConstraintResolver<'_> {
        ConstraintResolver {
            geometry: &self.geometry,
            ceiling: self.state.ceiling,
            overlap_allowed: self.state.overlap_allowed,
            shuffle_allowed: self.state.shuffle_allowed,
        }
    }

    // Pointer input

    /// Feeds one pointer event into the state machine.
    pub fn pointer(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Press { target, x } => self.press(target, x),
            PointerEvent::Move { x } => self.move_to(x),
            PointerEvent::Release | PointerEvent::Cancel => self.release(),
        }
    }

    /// Drains a pointer source. Stops early if the slider is torn down.
    pub fn drive(&mut self, source: &mut impl PointerSource) -> usize {
        let mut handled = 0;
        while !self.is_torn_down() {
            let Some(event) = source.next_event() else {
                break;
            };
            self.pointer(event);
            handled += 1;
        }
        handled
    }

    /// Starts a gesture on `target` with the cursor at `x`.
    pub fn press(&mut self, target: DragTarget, x: Px) {
        if self.is_torn_down() {
            return;
        }
        if self.state.disabled {
            debug!(?target, "press ignored: slider disabled");
            return;
        }
        if self.is_dragging() {
            debug!(?target, "press ignored: a drag is already in progress");
            return;
        }
        if !x.is_finite() {
            return;
        }
        let valid = match (self.state.mode, target) {
            (SliderMode::Range, _) => true,
            (SliderMode::Single, DragTarget::Handle(HandleId::Left)) => true,
            (SliderMode::Single, _) => false,
        };
        if !valid {
            debug!(?target, "press ignored: target does not exist in single mode");
            return;
        }

        self.binding.mark_touched();
        if let DragTarget::Handle(handle) = target {
            self.focused = Some(handle);
        }
        self.phase = DragPhase::Dragging(DragSession::capture(
            target,
            x,
            self.handles.left,
            self.handles.right,
        ));
        debug!(?target, "drag started");
    }

    /// Moves the cursor of the running gesture to `x`.
    pub fn move_to(&mut self, x: Px) {
        if self.is_torn_down() || !x.is_finite() {
            return;
        }
        let has_travel = self.geometry.has_travel();
        let DragPhase::Dragging(session) = &mut self.phase else {
            return;
        };
        if !has_travel {
            trace!("move ignored: track not measured yet");
            return;
        }
        session.record_cursor(x);
        let session = session.clone();

        match session.target() {
            DragTarget::RangeBody => self.move_body(&session, x),
            DragTarget::Handle(handle) => self.move_handle(&session, handle, x),
        }

        debug_assert!(self.state.mode == SliderMode::Single || self.state.low <= self.state.high);
        self.update_indicator();
        let events = self.emitter.on_move(self.state.snapshot());
        self.publish(events);
    }

    fn move_body(&mut self, session: &DragSession, x: Px) {
        let (Some(left), Some(right)) = (
            session.proposed(HandleId::Left, x),
            session.proposed(HandleId::Right, x),
        ) else {
            return;
        };
        match self.resolver().resolve_body(left, right) {
            Some((left, right)) => {
                self.handles.left = left;
                self.handles.right = right;
                self.commit(HandleId::Left);
                self.commit(HandleId::Right);
            }
            None => trace!("range move rejected: would leave the track"),
        }
    }

    fn move_handle(&mut self, session: &DragSession, handle: HandleId, x: Px) {
        let Some(proposed) = session.proposed(handle, x) else {
            return;
        };
        trace!(?handle, proposed = proposed.to_f32(), "handle move");

        if self.state.mode == SliderMode::Single {
            self.handles.left = self.geometry.clamp_translate(proposed);
            self.commit(HandleId::Left);
            return;
        }

        let other = handle.other();
        let other_translate = self.handles.get(other);
        match self.resolver().resolve_handle(handle, proposed, other_translate) {
            Resolution::Accept(translate) | Resolution::Push(translate) => {
                self.handles.set(handle, translate);
                self.commit(handle);
            }
            Resolution::Shuffle => {
                // The dragged handle parks on the other one's slot and the
                // pointer carries on with the other handle.
                self.handles.set(handle, other_translate);
                self.commit(handle);
                if let DragPhase::Dragging(live) = &mut self.phase {
                    live.reassign(other);
                }
                self.focused = Some(other);
                debug!(from = ?handle, to = ?other, "handles shuffled");

                let translate = self
                    .resolver()
                    .resolve_without_shuffle(other, proposed, other_translate);
                self.handles.set(other, translate);
                self.commit(other);
            }
        }
    }

    /// Derives the committed value of a moved handle from its translate.
    fn commit(&mut self, handle: HandleId) {
        let value = translate_to_value(
            self.handles.get(handle),
            &self.geometry,
            self.state.ceiling,
        );
        self.state.set_value_of(handle, value);
        if self.state.mode == SliderMode::Single {
            self.state.high = value;
        }
    }

    /// Ends the running gesture. `Release` and `Cancel` behave the same.
    pub fn release(&mut self) {
        if self.is_torn_down() {
            return;
        }
        if std::mem::take(&mut self.phase) == DragPhase::Idle {
            return;
        }
        let events = self.emitter.on_release(self.state.snapshot());
        self.publish(events);
        self.snap_handles();
        self.observers.notify(SliderEvent::DragEnded);
        debug!(value = %self.state.snapshot(), "drag ended");
    }

    fn publish(&mut self, events: Emission) {
        if events.is_empty() {
            return;
        }
        for event in events {
            self.observers.notify(event);
        }
        self.binding.push(self.state.snapshot());
    }

    // Keyboard

    /// Gives keyboard focus to a handle.
    pub fn focus(&mut self, handle: HandleId) {
        if self.state.mode == SliderMode::Single && handle == HandleId::Right {
            return;
        }
        self.focused = Some(handle);
    }

    /// Clears keyboard focus.
    pub fn blur(&mut self) {
        self.focused = None;
    }

    /// Applies a one-step nudge to the focused handle (the left handle when
    /// nothing is focused). `None` when the slider ignores input.
    pub fn nudge(&mut self, nudge: KeyNudge) -> Option<NudgeOutcome> {
        let handle = self.focused.unwrap_or(HandleId::Left);
        self.nudge_handle(handle, nudge)
    }

    /// Applies a one-step nudge to `handle`.
    ///
    /// Nudging a handle into its counterpart moves focus to the counterpart
    /// and nudges that one instead, when handles are allowed to shuffle.
    pub fn nudge_handle(&mut self, handle: HandleId, nudge: KeyNudge) -> Option<NudgeOutcome> {
        if self.is_torn_down() || self.state.disabled {
            return None;
        }
        let handle = match self.state.mode {
            SliderMode::Single => HandleId::Left,
            SliderMode::Range => handle,
        };
        let (target, next) = self.resolve_nudge(handle, nudge);
        let changed = next != self.state.value_of(target);
        self.focused = Some(target);
        if target != handle {
            debug!(from = ?handle, to = ?target, "keyboard nudge re-routed");
        }

        if changed {
            self.state.set_value_of(target, next);
            if self.state.mode == SliderMode::Single {
                self.state.high = next;
            }
            self.relayout();
            let events = self.emitter.emit(self.state.snapshot());
            self.publish(events);
        }
        Some(NudgeOutcome {
            focused: target,
            changed,
        })
    }

    fn resolve_nudge(&self, handle: HandleId, nudge: KeyNudge) -> (HandleId, u32) {
        let state = &self.state;
        let step = |value: u32, nudge: KeyNudge| match nudge {
            KeyNudge::Increase => value.saturating_add(1).min(state.ceiling),
            KeyNudge::Decrease => value.saturating_sub(1),
        };

        if state.mode == SliderMode::Single {
            return (HandleId::Left, step(state.low, nudge));
        }

        let gap = state.minimal_gap_steps();
        match (handle, nudge) {
            (HandleId::Left, KeyNudge::Increase) => {
                let next = step(state.low, nudge);
                if next.saturating_add(gap) <= state.high {
                    (HandleId::Left, next)
                } else if state.can_shuffle() {
                    (HandleId::Right, step(state.high, nudge))
                } else {
                    (HandleId::Left, state.high.saturating_sub(gap).max(state.low))
                }
            }
            (HandleId::Right, KeyNudge::Decrease) => {
                let next = step(state.high, nudge);
                if next >= state.low.saturating_add(gap) {
                    (HandleId::Right, next)
                } else if state.can_shuffle() {
                    (HandleId::Left, step(state.low, nudge))
                } else {
                    (HandleId::Right, state.low.saturating_add(gap).min(state.high))
                }
            }
            (handle, nudge) => (handle, step(state.value_of(handle), nudge)),
        }
    }

    // Programmatic writes

    /// Sets `from`. Values outside `[0, to]` are clamped with a diagnostic.
    pub fn set_from(&mut self, from: i64) -> SetOutcome {
        self.set_handle_value(HandleId::Left, ValueField::From, from)
    }

    /// Sets `to`. Values outside `[from, ceiling]` are clamped with a
    /// diagnostic.
    pub fn set_to(&mut self, to: i64) -> SetOutcome {
        self.set_handle_value(HandleId::Right, ValueField::To, to)
    }

    /// Sets the single-mode value, clamped into `[0, ceiling]`.
    pub fn set_value(&mut self, value: i64) -> SetOutcome {
        self.set_handle_value(HandleId::Left, ValueField::Value, value)
    }

    fn set_handle_value(&mut self, handle: HandleId, field: ValueField, requested: i64) -> SetOutcome {
        let state = &self.state;
        let ceiling = (state.ceiling, Bound::Ceiling);
        let (low, high) = match (state.mode, handle) {
            (SliderMode::Single, HandleId::Right) => {
                warn!(%field, "ignored: single-mode slider has no upper handle");
                return SetOutcome::exact(state.high);
            }
            (SliderMode::Single, HandleId::Left) => ((0, Bound::Zero), ceiling),
            (SliderMode::Range, HandleId::Left) if state.high < state.ceiling => {
                ((0, Bound::Zero), (state.high, Bound::Counterpart))
            }
            (SliderMode::Range, HandleId::Left) => ((0, Bound::Zero), ceiling),
            (SliderMode::Range, HandleId::Right) if state.low > 0 => {
                ((state.low, Bound::Counterpart), ceiling)
            }
            (SliderMode::Range, HandleId::Right) => ((0, Bound::Zero), ceiling),
        };
        let outcome = soften(field, requested, low, high);
        self.state.set_value_of(handle, outcome.applied);
        if self.state.mode == SliderMode::Single {
            self.state.high = outcome.applied;
        }
        self.emitter.reset(self.state.snapshot());
        self.request_relayout();
        outcome
    }

    /// Replaces both range values at once without notifying observers.
    pub fn update_values(&mut self, from: i64, to: i64) -> (SetOutcome, SetOutcome) {
        if self.state.mode == SliderMode::Single {
            let outcome = self.set_value(from);
            return (outcome, outcome);
        }
        let ceiling = self.state.ceiling;
        let from = soften(ValueField::From, from, (0, Bound::Zero), (ceiling, Bound::Ceiling));
        let to = soften(
            ValueField::To,
            to,
            (from.applied, Bound::Counterpart),
            (ceiling, Bound::Ceiling),
        );
        self.state.low = from.applied;
        self.state.high = to.applied;
        self.emitter.reset(self.state.snapshot());
        self.request_relayout();
        (from, to)
    }

    /// Changes the ceiling, clamping current values into the new range.
    ///
    /// Step labels no longer matching the new ceiling are dropped.
    pub fn set_ceiling(&mut self, ceiling: u32) -> Vec<Diagnostic> {
        if self
            .step_labels
            .as_ref()
            .is_some_and(|labels| labels.len() != ceiling as usize + 1)
        {
            warn!(ceiling, "step labels dropped: they no longer match the ceiling");
            self.step_labels = None;
        }
        self.apply_ceiling(ceiling)
    }

    /// Replaces the step labels; the ceiling follows their count.
    pub fn set_step_labels(&mut self, labels: Vec<String>) -> Result<Vec<Diagnostic>, ConfigError> {
        if labels.is_empty() {
            return Err(ConfigError::EmptyStepLabels);
        }
        let ceiling = (labels.len() - 1) as u32;
        self.step_labels = Some(labels);
        Ok(self.apply_ceiling(ceiling))
    }

    fn apply_ceiling(&mut self, ceiling: u32) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();
        let clamp = |field: ValueField, value: u32| {
            soften(field, i64::from(value), (0, Bound::Zero), (ceiling, Bound::Ceiling))
        };
        let (low_field, high_field) = match self.state.mode {
            SliderMode::Range => (ValueField::From, ValueField::To),
            SliderMode::Single => (ValueField::Value, ValueField::Value),
        };
        let high = clamp(high_field, self.state.high);
        let low = clamp(low_field, self.state.low);
        diagnostics.extend(low.diagnostic);
        if self.state.mode == SliderMode::Range {
            diagnostics.extend(high.diagnostic);
        }

        self.state.ceiling = ceiling;
        self.state.low = low.applied;
        self.state.high = high.applied.max(low.applied);
        self.emitter.reset(self.state.snapshot());
        self.request_relayout();
        diagnostics
    }

    /// Switches between live and on-release emission. Takes effect on the
    /// next move.
    pub fn set_live_emission(&mut self, live: bool) {
        self.state.live_emission = live;
        self.emitter.set_live(live);
    }

    /// Allows or forbids the handles to share a value.
    pub fn set_overlap_allowed(&mut self, allowed: bool) {
        self.state.overlap_allowed = allowed;
    }

    /// Allows or forbids handles to swap roles when crossed.
    pub fn set_shuffle_allowed(&mut self, allowed: bool) {
        self.state.shuffle_allowed = allowed;
    }
}

impl ExternalBinding for SliderEngine {
    fn write(&mut self, value: BindingInput) -> Result<(), ValidationError> {
        let value = validate(value, self.state.mode, self.state.ceiling)?;
        if self.is_torn_down() {
            return Ok(());
        }
        match value {
            SliderValue::Range { from, to } => {
                self.state.low = from;
                self.state.high = to;
            }
            SliderValue::Single(v) => {
                self.state.low = v;
                self.state.high = v;
            }
        }
        self.emitter.reset(value);
        self.request_relayout();
        self.binding.push(value);
        Ok(())
    }

    fn register_change_callback(&mut self, callback: CallbackWith<SliderValue>) {
        self.binding.set_change_callback(callback);
    }

    fn register_touched_callback(&mut self, callback: Callback) {
        self.binding.set_touched_callback(callback);
    }

    fn set_disabled(&mut self, disabled: bool) {
        self.state.disabled = disabled;
        if disabled && self.is_dragging() {
            debug!("drag cancelled: slider disabled");
            self.phase = DragPhase::Idle;
            // Drop the moves nobody was told about.
            match self.emitter.last() {
                SliderValue::Range { from, to } => {
                    self.state.low = from;
                    self.state.high = to;
                }
                SliderValue::Single(value) => {
                    self.state.low = value;
                    self.state.high = value;
                }
            }
            self.snap_handles();
        }
    }
}
