//! Pixel to value conversion.
//!
//! Values are integers in `[0, ceiling]`; handle positions are translates in
//! `[0, max_translate]`. The mapping is linear:
//!
//! - `translate = value * max_translate / ceiling`
//! - `value = round(ceiling * translate / max_translate)`
//!
//! A ceiling of zero, or a track with no travel, maps everything to zero.

use crate::{geometry::TrackGeometry, px::Px};

/// Translate of the handle that represents `value`.
pub fn value_to_translate(value: u32, geometry: &TrackGeometry, ceiling: u32) -> Px {
    if ceiling == 0 || !geometry.has_travel() {
        return Px::ZERO;
    }
    let value = value.min(ceiling);
    let max = f64::from(geometry.max_translate().to_f32());
    Px((f64::from(value) * max / f64::from(ceiling)) as f32)
}

/// Value represented by a handle sitting at `translate`.
///
/// The result is rounded to the nearest step and kept inside `[0, ceiling]`.
pub fn translate_to_value(translate: Px, geometry: &TrackGeometry, ceiling: u32) -> u32 {
    if ceiling == 0 || !geometry.has_travel() || !translate.is_finite() {
        return 0;
    }
    let max = f64::from(geometry.max_translate().to_f32());
    let raw = (f64::from(ceiling) * f64::from(translate.to_f32()) / max).round();
    raw.clamp(0.0, f64::from(ceiling)) as u32
}

/// Pixel width of one value step along the travel range.
pub fn step_translate(geometry: &TrackGeometry, ceiling: u32) -> Px {
    if ceiling == 0 {
        return Px::ZERO;
    }
    geometry.max_translate() / ceiling as f32
}
