use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use parking_lot::Mutex;
use proptest::prelude::*;

use crate::{
    BindingInput, Bound, Callback, CallbackWith, DragTarget, ExternalBinding, HandleId, KeyNudge,
    MouseSample, PointerEvent, Px, ScriptedPointer, SliderConfig, SliderEngine, SliderEvent,
    SliderMode, SliderValue, Subscription, TouchSample, ValidationError,
    mapper::value_to_translate,
};

const LEFT: DragTarget = DragTarget::Handle(HandleId::Left);
const RIGHT: DragTarget = DragTarget::Handle(HandleId::Right);

/// 117 px track with the default 17 px handle: 100 px of travel, so with a
/// ceiling of 10 one step is exactly 10 px.
const TRACK: Px = Px(117.0);

fn slider(config: SliderConfig) -> SliderEngine {
    let mut slider = SliderEngine::new(config).expect("valid config");
    slider.resize(TRACK);
    slider
}

fn range(from: u32, to: u32) -> SliderConfig {
    SliderConfig::default().ceiling(10).from(from).to(to)
}

fn record(slider: &SliderEngine) -> (Arc<Mutex<Vec<SliderEvent>>>, Subscription) {
    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&events);
    let subscription = slider.subscribe(move |event: SliderEvent| sink.lock().push(event));
    (events, subscription)
}

fn record_changes(slider: &mut SliderEngine) -> Arc<Mutex<Vec<SliderValue>>> {
    let changes = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&changes);
    slider.register_change_callback(CallbackWith::new(move |v| sink.lock().push(v)));
    changes
}

#[test]
fn test_drag_left_two_steps_emits_once_on_release() {
    let mut slider = slider(range(3, 7));
    let (events, _sub) = record(&slider);

    slider.press(LEFT, Px(100.0));
    slider.move_to(Px(110.0));
    slider.move_to(Px(120.0));
    assert!(events.lock().is_empty());
    slider.release();

    assert_eq!(slider.value(), SliderValue::Range { from: 5, to: 7 });
    assert_eq!(
        *events.lock(),
        vec![SliderEvent::FromChanged(5), SliderEvent::DragEnded]
    );
}

#[test]
fn test_live_drag_emits_each_new_value() {
    let mut slider = slider(range(3, 7).live_emission(true));
    let (events, _sub) = record(&slider);

    slider.press(LEFT, Px(0.0));
    slider.move_to(Px(10.0));
    slider.move_to(Px(20.0));
    slider.release();

    assert_eq!(
        *events.lock(),
        vec![
            SliderEvent::FromChanged(4),
            SliderEvent::FromChanged(5),
            SliderEvent::DragEnded,
        ]
    );
}

#[test]
fn test_moves_rounding_to_same_value_notify_once() {
    let mut slider = slider(range(3, 7).live_emission(true));
    let (events, _sub) = record(&slider);

    slider.press(LEFT, Px(0.0));
    slider.move_to(Px(20.0));
    slider.move_to(Px(21.0));
    slider.move_to(Px(19.0));

    assert_eq!(*events.lock(), vec![SliderEvent::FromChanged(5)]);
}

#[test]
fn test_right_handle_stops_one_step_above_left() {
    let mut slider = slider(range(3, 7).overlap_allowed(false));

    slider.press(RIGHT, Px(0.0));
    slider.move_to(Px(-60.0));
    assert_eq!(slider.state().to(), 4);
    slider.move_to(Px(-200.0));
    assert_eq!(slider.state().to(), 4);
    slider.release();

    assert_eq!(slider.value(), SliderValue::Range { from: 3, to: 4 });
    assert_eq!(slider.translate(HandleId::Right), Px(40.0));
}

#[test]
fn test_overlap_allowed_lets_handles_coincide() {
    let mut slider = slider(range(3, 7).shuffle_allowed(false));

    slider.press(LEFT, Px(0.0));
    slider.move_to(Px(80.0));
    slider.release();

    assert_eq!(slider.value(), SliderValue::Range { from: 7, to: 7 });
    assert_eq!(
        slider.translate(HandleId::Left),
        slider.translate(HandleId::Right)
    );
}

#[test]
fn test_crossing_shuffles_capture_to_other_handle() {
    let mut slider = slider(range(3, 7).live_emission(true));
    let (events, _sub) = record(&slider);

    slider.press(LEFT, Px(0.0));
    slider.move_to(Px(60.0));
    assert_eq!(slider.drag_target(), Some(RIGHT));
    assert_eq!(slider.value(), SliderValue::Range { from: 7, to: 9 });

    slider.move_to(Px(70.0));
    assert_eq!(slider.value(), SliderValue::Range { from: 7, to: 10 });
    slider.release();

    assert_eq!(
        *events.lock(),
        vec![
            SliderEvent::FromChanged(7),
            SliderEvent::ToChanged(9),
            SliderEvent::ToChanged(10),
            SliderEvent::DragEnded,
        ]
    );
    assert_eq!(slider.focused(), Some(HandleId::Right));
}

#[test]
fn test_crossing_back_shuffles_again() {
    let mut slider = slider(range(3, 7).live_emission(true));

    slider.press(LEFT, Px(0.0));
    slider.move_to(Px(60.0));
    slider.move_to(Px(20.0));

    assert_eq!(slider.drag_target(), Some(LEFT));
    assert_eq!(slider.value(), SliderValue::Range { from: 5, to: 7 });
}

#[test]
fn test_range_body_moves_both_or_nothing() {
    let mut slider = slider(range(3, 7));
    let (events, _sub) = record(&slider);

    slider.press(DragTarget::RangeBody, Px(0.0));
    slider.move_to(Px(20.0));
    assert_eq!(slider.value(), SliderValue::Range { from: 5, to: 9 });

    slider.move_to(Px(50.0));
    assert_eq!(slider.translate(HandleId::Left), Px(50.0));
    assert_eq!(slider.translate(HandleId::Right), Px(90.0));
    slider.release();

    assert_eq!(
        *events.lock(),
        vec![
            SliderEvent::FromChanged(5),
            SliderEvent::ToChanged(9),
            SliderEvent::DragEnded,
        ]
    );
}

#[test]
fn test_release_resnaps_handles_and_indicator() {
    let mut slider = slider(range(3, 7));

    slider.press(LEFT, Px(0.0));
    slider.move_to(Px(17.0));
    assert_eq!(slider.translate(HandleId::Left), Px(47.0));
    slider.release();

    assert_eq!(slider.state().from(), 5);
    assert_eq!(slider.translate(HandleId::Left), Px(50.0));
    let indicator = slider.indicator();
    assert_eq!(indicator.offset, Px(58.5));
    assert_eq!(indicator.width, Px(20.0));
}

#[test]
fn test_second_press_is_ignored() {
    let mut slider = slider(range(3, 7));

    slider.press(LEFT, Px(0.0));
    slider.press(RIGHT, Px(500.0));
    assert_eq!(slider.drag_target(), Some(LEFT));

    slider.move_to(Px(10.0));
    assert_eq!(slider.value(), SliderValue::Range { from: 4, to: 7 });
}

#[test]
fn test_resize_mid_drag_keeps_gesture() {
    let mut slider = slider(range(3, 7));

    slider.press(LEFT, Px(0.0));
    slider.move_to(Px(20.0));
    // 200 px of travel: 20 px per step.
    slider.resize(Px(217.0));
    assert!(slider.is_dragging());
    assert_eq!(slider.translate(HandleId::Left), Px(100.0));
    assert_eq!(slider.translate(HandleId::Right), Px(140.0));

    slider.move_to(Px(40.0));
    assert_eq!(slider.translate(HandleId::Left), Px(120.0));
    assert_eq!(slider.state().from(), 6);
}

#[test]
fn test_moves_before_measurement_are_ignored() {
    let mut slider = SliderEngine::new(range(3, 7)).expect("valid config");

    slider.press(LEFT, Px(0.0));
    slider.move_to(Px(40.0));
    slider.release();

    assert_eq!(slider.value(), SliderValue::Range { from: 3, to: 7 });
}

#[test]
fn test_single_mode_drag_and_touch_input() {
    let mut slider = slider(
        SliderConfig::default()
            .mode(SliderMode::Single)
            .ceiling(10)
            .value(2),
    );
    let (events, _sub) = record(&slider);

    slider.press(RIGHT, Px(0.0));
    assert!(!slider.is_dragging());

    let press = PointerEvent::press(LEFT, &TouchSample::single(1, Px(0.0)))
        .expect("touch has a coordinate");
    slider.pointer(press);
    slider.pointer(PointerEvent::moved(&MouseSample { client_x: Px(35.0) }).expect("coordinate"));
    slider.pointer(PointerEvent::Cancel);

    assert_eq!(slider.value(), SliderValue::Single(6));
    assert_eq!(
        *events.lock(),
        vec![SliderEvent::ValueChanged(6), SliderEvent::DragEnded]
    );
    assert_eq!(slider.indicator().width, Px(60.0));
}

#[test]
fn test_scripted_pointer_drives_engine() {
    let mut slider = slider(range(0, 10));
    let mut gesture = ScriptedPointer::new()
        .press(RIGHT, 300.0)
        .move_to(250.0)
        .release();

    assert_eq!(slider.drive(&mut gesture), 3);
    assert_eq!(slider.value(), SliderValue::Range { from: 0, to: 5 });
}

#[test]
fn test_single_keyboard_decrease() {
    let mut slider = slider(
        SliderConfig::default()
            .mode(SliderMode::Single)
            .ceiling(100)
            .value(50),
    );
    let (events, _sub) = record(&slider);

    let outcome = slider.nudge(KeyNudge::Decrease).expect("enabled");

    assert!(outcome.changed);
    assert_eq!(slider.value(), SliderValue::Single(49));
    assert_eq!(*events.lock(), vec![SliderEvent::ValueChanged(49)]);
}

#[test]
fn test_keyboard_is_clamped_to_bounds() {
    let mut slider = slider(range(0, 10));
    slider.focus(HandleId::Left);
    let outcome = slider.nudge(KeyNudge::Decrease).expect("enabled");
    assert!(!outcome.changed);

    slider.focus(HandleId::Right);
    let outcome = slider.nudge(KeyNudge::Increase).expect("enabled");
    assert!(!outcome.changed);
    assert_eq!(slider.value(), SliderValue::Range { from: 0, to: 10 });
}

#[test]
fn test_keyboard_crossing_moves_focus() {
    let mut slider = slider(range(5, 5));
    let (events, _sub) = record(&slider);

    slider.focus(HandleId::Left);
    let outcome = slider.nudge(KeyNudge::Increase).expect("enabled");

    assert_eq!(outcome.focused, HandleId::Right);
    assert!(outcome.changed);
    assert_eq!(slider.focused(), Some(HandleId::Right));
    assert_eq!(slider.value(), SliderValue::Range { from: 5, to: 6 });
    assert_eq!(*events.lock(), vec![SliderEvent::ToChanged(6)]);

    slider.nudge_handle(HandleId::Right, KeyNudge::Decrease);
    let outcome = slider
        .nudge_handle(HandleId::Right, KeyNudge::Decrease)
        .expect("enabled");
    assert_eq!(outcome.focused, HandleId::Left);
    assert_eq!(slider.value(), SliderValue::Range { from: 4, to: 5 });
}

#[test]
fn test_keyboard_without_shuffle_stops_at_counterpart() {
    let mut slider = slider(range(4, 5).overlap_allowed(false));

    let outcome = slider
        .nudge_handle(HandleId::Left, KeyNudge::Increase)
        .expect("enabled");
    assert_eq!(outcome.focused, HandleId::Left);
    assert!(!outcome.changed);

    let outcome = slider
        .nudge_handle(HandleId::Right, KeyNudge::Decrease)
        .expect("enabled");
    assert!(!outcome.changed);
    assert_eq!(slider.value(), SliderValue::Range { from: 4, to: 5 });
}

#[test]
fn test_write_rejects_negative_from_without_mutation() {
    let mut slider = slider(range(3, 7));
    let changes = record_changes(&mut slider);

    let err = slider
        .write(BindingInput::range(-1.0, 5.0))
        .expect_err("from < 0 must fail");

    assert_eq!(err, ValidationError::FromBelowZero { from: -1.0 });
    assert!(err.to_string().contains("from < 0"));
    assert_eq!(slider.value(), SliderValue::Range { from: 3, to: 7 });
    assert_eq!(slider.translate(HandleId::Left), Px(30.0));
    assert!(changes.lock().is_empty());
}

#[test]
fn test_write_rejects_bad_shapes() {
    let mut slider = slider(range(3, 7));
    assert!(matches!(
        slider.write(BindingInput::single(4.0)),
        Err(ValidationError::ShapeMismatch { .. })
    ));
    assert!(matches!(
        slider.write(BindingInput::range(4.0, 11.0)),
        Err(ValidationError::ToAboveCeiling { .. })
    ));
    assert!(matches!(
        slider.write(BindingInput::range(6.0, 2.0)),
        Err(ValidationError::Inverted { .. })
    ));
    assert!(matches!(
        slider.write(BindingInput::Range {
            from: Some(f64::NAN),
            to: Some(2.0)
        }),
        Err(ValidationError::NotANumber(_))
    ));
    assert_eq!(slider.value(), SliderValue::Range { from: 3, to: 7 });
}

#[test]
fn test_write_updates_state_and_dedups_change_stream() {
    let mut slider = slider(range(3, 7));
    let (events, _sub) = record(&slider);
    let changes = record_changes(&mut slider);

    slider.write(BindingInput::range(2.0, 8.0)).expect("valid");
    slider.write(BindingInput::range(2.0, 8.0)).expect("valid");

    assert_eq!(slider.value(), SliderValue::Range { from: 2, to: 8 });
    assert_eq!(slider.translate(HandleId::Right), Px(80.0));
    assert_eq!(*changes.lock(), vec![SliderValue::Range { from: 2, to: 8 }]);
    assert!(events.lock().is_empty());
}

#[test]
fn test_user_changes_reach_binding() {
    let mut slider = slider(range(3, 7).live_emission(true));
    let changes = record_changes(&mut slider);

    slider.press(LEFT, Px(0.0));
    slider.move_to(Px(10.0));
    slider.move_to(Px(12.0));
    slider.release();

    assert_eq!(*changes.lock(), vec![SliderValue::Range { from: 4, to: 7 }]);
}

#[test]
fn test_touched_fires_once_per_lifetime() {
    let mut slider = slider(range(3, 7));
    let count = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&count);
    slider.register_touched_callback(Callback::new(move || {
        counter.fetch_add(1, Ordering::SeqCst);
    }));

    for _ in 0..3 {
        slider.press(LEFT, Px(0.0));
        slider.release();
    }

    assert!(slider.is_touched());
    assert_eq!(count.load(Ordering::SeqCst), 1);
}

#[test]
fn test_disabled_rejects_input() {
    let mut slider = slider(range(3, 7).disabled(true));

    slider.press(LEFT, Px(0.0));
    assert!(!slider.is_dragging());
    assert!(!slider.is_touched());
    assert_eq!(slider.nudge(KeyNudge::Increase), None);

    slider.set_disabled(false);
    slider.press(LEFT, Px(0.0));
    assert!(slider.is_dragging());
}

#[test]
fn test_disabling_mid_drag_cancels_without_emission() {
    let mut slider = slider(range(3, 7));
    let (events, _sub) = record(&slider);

    slider.press(LEFT, Px(0.0));
    slider.move_to(Px(20.0));
    slider.set_disabled(true);

    assert!(!slider.is_dragging());
    assert!(events.lock().is_empty());
    assert_eq!(slider.value(), SliderValue::Range { from: 3, to: 7 });
    assert_eq!(slider.translate(HandleId::Left), Px(30.0));
}

#[test]
fn test_cancelled_drag_does_not_leak_into_next_gesture() {
    let mut slider = slider(range(3, 7));
    let (events, _sub) = record(&slider);
    let changes = record_changes(&mut slider);

    slider.press(LEFT, Px(0.0));
    slider.move_to(Px(20.0));
    slider.set_disabled(true);
    slider.set_disabled(false);
    slider.press(RIGHT, Px(0.0));
    slider.release();

    assert_eq!(*events.lock(), vec![SliderEvent::DragEnded]);
    assert!(changes.lock().is_empty());
    assert_eq!(slider.value(), SliderValue::Range { from: 3, to: 7 });
}

#[test]
fn test_disabling_live_drag_keeps_reported_value() {
    let mut slider = slider(range(3, 7).live_emission(true));
    let (events, _sub) = record(&slider);

    slider.press(LEFT, Px(0.0));
    slider.move_to(Px(20.0));
    slider.set_disabled(true);

    assert_eq!(*events.lock(), vec![SliderEvent::FromChanged(5)]);
    assert_eq!(slider.value(), SliderValue::Range { from: 5, to: 7 });
    assert_eq!(slider.translate(HandleId::Left), Px(50.0));
}

#[test]
fn test_programmatic_setters_soften() {
    let mut slider = slider(range(3, 7));
    let (events, _sub) = record(&slider);

    let outcome = slider.set_from(-3);
    assert_eq!(outcome.applied, 0);
    assert_eq!(outcome.diagnostic.map(|d| d.bound), Some(Bound::Zero));

    let outcome = slider.set_to(15);
    assert_eq!(outcome.applied, 10);
    assert_eq!(outcome.diagnostic.map(|d| d.bound), Some(Bound::Ceiling));

    let outcome = slider.set_from(4);
    assert!(!outcome.was_clamped());

    slider.set_to(6);
    let outcome = slider.set_from(9);
    assert_eq!(outcome.applied, 6);
    assert_eq!(outcome.diagnostic.map(|d| d.bound), Some(Bound::Counterpart));

    assert!(events.lock().is_empty());
    assert_eq!(slider.translate(HandleId::Left), Px(60.0));
}

#[test]
fn test_programmatic_value_is_new_baseline() {
    let mut slider = slider(range(3, 7));
    let (events, _sub) = record(&slider);

    slider.update_values(5, 8);
    slider.press(LEFT, Px(0.0));
    slider.release();

    assert_eq!(*events.lock(), vec![SliderEvent::DragEnded]);
}

#[test]
fn test_ceiling_change_clamps_values() {
    let mut slider = slider(range(3, 7));

    let diagnostics = slider.set_ceiling(5);

    assert_eq!(diagnostics.len(), 1);
    assert_eq!(slider.value(), SliderValue::Range { from: 3, to: 5 });
    assert_eq!(slider.translate(HandleId::Right), Px(100.0));
}

#[test]
fn test_deferred_relayout_waits_for_idle() {
    let mut slider = slider(range(3, 7).defer_relayout(true));

    slider.update_values(2, 4);
    assert!(slider.has_pending_layout());
    assert_eq!(slider.translate(HandleId::Left), Px(30.0));

    assert_eq!(slider.run_idle(TRACK), 1);
    assert_eq!(slider.translate(HandleId::Left), Px(20.0));
    assert_eq!(slider.translate(HandleId::Right), Px(40.0));
    assert_eq!(slider.run_idle(TRACK), 0);
}

#[test]
fn test_deferred_relayout_uses_settled_width() {
    let mut slider = slider(range(3, 7).defer_relayout(true));

    slider.set_ceiling(5);
    // Layout settled at 200 px of travel: 40 px per step.
    assert_eq!(slider.run_idle(Px(217.0)), 1);

    assert_eq!(slider.geometry().max_translate(), Px(200.0));
    assert_eq!(slider.translate(HandleId::Left), Px(120.0));
    assert_eq!(slider.translate(HandleId::Right), Px(200.0));
}

#[test]
fn test_step_labels() {
    let labels: Vec<String> = ["Mon", "Tue", "Wed", "Thu", "Fri"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    let mut slider = slider(SliderConfig::default().step_labels(labels));

    assert_eq!(slider.state().ceiling(), 4);
    assert_eq!(slider.value(), SliderValue::Range { from: 0, to: 4 });
    assert_eq!(slider.label_for(2), Some("Wed"));
    assert_eq!(slider.label_for(9), None);

    slider.set_ceiling(6);
    assert_eq!(slider.step_labels(), None);
}

#[test]
fn test_zero_ceiling_degrades_to_zero() {
    let mut slider = slider(SliderConfig::default().ceiling(0).from(0).to(0));
    assert_eq!(slider.translate(HandleId::Left), Px::ZERO);
    assert_eq!(slider.translate(HandleId::Right), Px::ZERO);
    assert_eq!(value_to_translate(7, slider.geometry(), 0), Px::ZERO);

    slider.press(RIGHT, Px(0.0));
    slider.move_to(Px(55.0));
    slider.release();
    assert_eq!(slider.value(), SliderValue::Range { from: 0, to: 0 });
}

#[test]
fn test_teardown_releases_everything() {
    let mut slider = slider(range(3, 7).live_emission(true));
    let (events, subscription) = record(&slider);
    let changes = record_changes(&mut slider);

    slider.press(LEFT, Px(0.0));
    slider.teardown();
    slider.teardown();
    slider.move_to(Px(20.0));
    slider.release();
    slider.press(LEFT, Px(0.0));

    assert!(slider.is_torn_down());
    assert!(!slider.is_dragging());
    assert!(events.lock().is_empty());
    assert!(changes.lock().is_empty());
    assert!(!subscription.unsubscribe());
}

fn arb_target() -> impl Strategy<Value = DragTarget> {
    prop_oneof![Just(LEFT), Just(RIGHT), Just(DragTarget::RangeBody)]
}

#[derive(Debug, Clone)]
enum Op {
    Press(DragTarget, f32),
    Move(f32),
    Release,
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        1 => (arb_target(), -50.0f32..150.0).prop_map(|(t, x)| Op::Press(t, x)),
        4 => (-300.0f32..300.0).prop_map(Op::Move),
        1 => Just(Op::Release),
    ]
}

proptest! {
    #[test]
    fn prop_drags_never_break_bounds(
        overlap in any::<bool>(),
        shuffle in any::<bool>(),
        live in any::<bool>(),
        from in 0u32..10,
        span in 1u32..=10,
        ops in prop::collection::vec(arb_op(), 1..40),
    ) {
        let to = (from + span).min(10);
        let mut slider = slider(
            range(from, to)
                .overlap_allowed(overlap)
                .shuffle_allowed(shuffle)
                .live_emission(live),
        );
        let max = slider.geometry().max_translate();

        for op in ops {
            match op {
                Op::Press(target, x) => slider.press(target, Px(x)),
                Op::Move(x) => slider.move_to(Px(x)),
                Op::Release => slider.release(),
            }
            let state = slider.state();
            for handle in [HandleId::Left, HandleId::Right] {
                let t = slider.translate(handle);
                prop_assert!(t >= Px::ZERO && t <= max);
            }
            prop_assert!(state.from() <= state.to());
            prop_assert!(state.to() <= state.ceiling());
            if !overlap {
                prop_assert!(state.to() - state.from() >= 1);
            }
        }
    }
}
