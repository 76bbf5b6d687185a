//! Headless walk-through of the range slider.
//!
//! Usage: `example [config.json]`. Without a path a 0..=10 range slider is
//! used. Set `RUST_LOG=tessera_range_slider=trace` to watch the engine.

use std::{env, error::Error, fs};

use tessera_range_slider::{
    BindingInput, CallbackWith, DragTarget, ExternalBinding, HandleId, KeyNudge, Px,
    ScriptedPointer, SliderConfig, SliderEngine, SliderEvent, SliderMode, SliderValue,
};
use tracing::{info, warn};

const TRACK_WIDTH: Px = Px(217.0);

fn init_tracing() {
    let filter = match tracing_subscriber::EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => match tracing_subscriber::EnvFilter::try_new("error,example=info,tessera_range_slider=info") {
            Ok(filter) => filter,
            Err(_) => tracing_subscriber::EnvFilter::new("error"),
        },
    };

    let _ = tracing_subscriber::fmt()
        .pretty()
        .with_env_filter(filter)
        .try_init();
}

fn load_config() -> Result<SliderConfig, Box<dyn Error>> {
    match env::args().nth(1) {
        Some(path) => {
            let raw = fs::read_to_string(&path)?;
            let config = serde_json::from_str(&raw)?;
            info!(%path, "loaded slider config");
            Ok(config)
        }
        None => Ok(SliderConfig::default().ceiling(10).from(2).to(8)),
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    init_tracing();

    let config = load_config()?;
    let mode = config.mode;
    let mut slider = SliderEngine::new(config)?;
    slider.resize(TRACK_WIDTH);

    let _subscription = slider.subscribe(|event: SliderEvent| info!(?event, "slider event"));
    slider.register_change_callback(CallbackWith::new(|value: SliderValue| {
        info!(%value, "binding received value")
    }));

    let step = slider.geometry().max_translate().to_f32() / slider.state().ceiling().max(1) as f32;
    let mut gesture = match mode {
        SliderMode::Range => ScriptedPointer::new()
            .press(DragTarget::Handle(HandleId::Left), 0.0)
            .move_to(step * 2.0)
            .move_to(step * 9.0)
            .release()
            .press(DragTarget::RangeBody, 0.0)
            .move_to(-step)
            .cancel(),
        SliderMode::Single => ScriptedPointer::new()
            .press(DragTarget::Handle(HandleId::Left), 0.0)
            .move_to(step * 3.0)
            .release(),
    };
    let handled = slider.drive(&mut gesture);
    info!(handled, value = %slider.value(), "gesture replayed");

    slider.nudge(KeyNudge::Decrease);
    info!(value = %slider.value(), focused = ?slider.focused(), "keyboard nudge");

    let invalid = match mode {
        SliderMode::Range => BindingInput::range(-1.0, 5.0),
        SliderMode::Single => BindingInput::single(-1.0),
    };
    if let Err(err) = slider.write(invalid) {
        warn!(%err, "host write rejected");
    }

    slider.teardown();
    Ok(())
}
