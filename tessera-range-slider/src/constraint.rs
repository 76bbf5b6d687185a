//! Handle collision and bounds resolution.
//!
//! A dragged handle is clamped to the track and kept on its side of the other
//! handle. When the handles may coincide and shuffling is enabled, crossing
//! the other handle swaps which handle the pointer drives instead.

use crate::{geometry::TrackGeometry, px::Px, state::HandleId};

/// Outcome of resolving one proposed handle translate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Resolution {
    /// The proposal (clamped to the track) keeps enough distance.
    Accept(Px),
    /// The proposal came too close; the handle stops one minimal gap away.
    Push(Px),
    /// The proposal reached the other handle: snap onto it and let the
    /// pointer drive the other handle from now on.
    Shuffle,
}

impl Resolution {
    /// The committed translate, if the resolution does not swap handles.
    pub fn translate(self) -> Option<Px> {
        match self {
            Resolution::Accept(t) | Resolution::Push(t) => Some(t),
            Resolution::Shuffle => None,
        }
    }
}

/// Policy and geometry needed to resolve a drag move.
#[derive(Debug, Clone, Copy)]
pub struct ConstraintResolver<'a> {
    /// Current track measurements.
    pub geometry: &'a TrackGeometry,
    /// Largest selectable value.
    pub ceiling: u32,
    /// Whether the handles may coincide.
    pub overlap_allowed: bool,
    /// Whether crossing handles swap roles.
    pub shuffle_allowed: bool,
}

impl ConstraintResolver<'_> {
    /// Smallest pixel distance allowed between the handles.
    ///
    /// One step of the full track width, or zero when overlap is allowed.
    pub fn minimal_gap(&self) -> Px {
        if self.overlap_allowed || self.ceiling == 0 {
            Px::ZERO
        } else {
            self.geometry.track_width() / self.ceiling as f32
        }
    }

    /// Resolves a single handle drag against the other handle at `other`.
    pub fn resolve_handle(&self, dragged: HandleId, proposed: Px, other: Px) -> Resolution {
        self.resolve(dragged, proposed, other, self.shuffle_allowed)
    }

    /// Same as [`resolve_handle`](Self::resolve_handle) but never shuffles.
    ///
    /// Used for the follow-up resolution right after a shuffle so one move
    /// cannot swap back and forth.
    pub fn resolve_without_shuffle(&self, dragged: HandleId, proposed: Px, other: Px) -> Px {
        match self.resolve(dragged, proposed, other, false) {
            Resolution::Accept(t) | Resolution::Push(t) => t,
            Resolution::Shuffle => other,
        }
    }

    fn resolve(&self, dragged: HandleId, proposed: Px, other: Px, shuffle: bool) -> Resolution {
        let clamped = self.geometry.clamp_translate(proposed);
        let gap = self.minimal_gap();
        let future_gap = match dragged {
            HandleId::Left => other - clamped,
            HandleId::Right => clamped - other,
        };
        if future_gap > gap {
            return Resolution::Accept(clamped);
        }

        if shuffle && gap == Px::ZERO && future_gap < Px::ZERO {
            return Resolution::Shuffle;
        }

        let pushed = match dragged {
            HandleId::Left => other - gap,
            HandleId::Right => other + gap,
        };
        Resolution::Push(self.geometry.clamp_translate(pushed))
    }

    /// Moves both handles by the same delta, all or nothing.
    ///
    /// Returns `None` when either handle would leave the track.
    pub fn resolve_body(&self, left: Px, right: Px) -> Option<(Px, Px)> {
        if !self.geometry.contains(left) || !self.geometry.contains(right) {
            return None;
        }
        Some((left, right))
    }
}
