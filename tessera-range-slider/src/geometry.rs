//! Track measurements and the highlighted range band derived from them.

use crate::px::Px;

/// Default handle width, matching the stock handle artwork.
pub const DEFAULT_HANDLE_WIDTH: Px = Px(17.0);

/// Measured geometry of the slider track.
///
/// `max_translate` is the furthest a handle may be translated from the start of
/// the track so that it stays fully inside it. A track narrower than its handle
/// collapses to a zero travel distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackGeometry {
    track_width: Px,
    handle_width: Px,
    max_translate: Px,
}

impl TrackGeometry {
    /// Builds the geometry for a measured track width.
    pub fn new(track_width: Px, handle_width: Px) -> Self {
        let track_width = if track_width.is_finite() {
            track_width.positive()
        } else {
            Px::ZERO
        };
        Self {
            track_width,
            handle_width,
            max_translate: (track_width - handle_width).positive(),
        }
    }

    /// Geometry before the host has reported any width.
    pub fn unmeasured(handle_width: Px) -> Self {
        Self::new(Px::ZERO, handle_width)
    }

    /// Measured track width.
    pub fn track_width(&self) -> Px {
        self.track_width
    }

    /// Width of one handle.
    pub fn handle_width(&self) -> Px {
        self.handle_width
    }

    /// Largest translate a handle can take.
    pub fn max_translate(&self) -> Px {
        self.max_translate
    }

    /// Returns `true` when handles have some room to travel.
    pub fn has_travel(&self) -> bool {
        self.max_translate > Px::ZERO
    }

    /// Clamps a translate into `[0, max_translate]`.
    pub fn clamp_translate(&self, translate: Px) -> Px {
        translate.clamp(Px::ZERO, self.max_translate)
    }

    /// Returns `true` if the translate lies inside the travel range.
    pub fn contains(&self, translate: Px) -> bool {
        translate >= Px::ZERO && translate <= self.max_translate
    }
}

/// Position and size of the highlighted band between the handles.
///
/// The band starts in the middle of the left handle and ends in the middle of
/// the right one.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct RangeIndicator {
    /// Start of the band, measured from the track start.
    pub offset: Px,
    /// Length of the band.
    pub width: Px,
}

impl RangeIndicator {
    pub(crate) fn between(left: Px, right: Px, geometry: &TrackGeometry) -> Self {
        Self {
            offset: left + geometry.handle_width() / 2.0,
            width: (right - left).positive(),
        }
    }

    pub(crate) fn up_to(handle: Px, geometry: &TrackGeometry) -> Self {
        Self {
            offset: geometry.handle_width() / 2.0,
            width: handle.positive(),
        }
    }
}
