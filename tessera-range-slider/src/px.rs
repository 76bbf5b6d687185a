//! Pixel quantities used by the slider geometry.
//!
//! Every horizontal measurement the slider works with (track width, handle
//! width, handle translate, cursor coordinate, minimal gap) is a [`Px`]. The
//! value is fractional because a single value step is usually not a whole
//! number of pixels: a 117 px track with a ceiling of 10 has an 11.7 px step.
//!
//! # Example
//!
//! ```
//! use tessera_range_slider::px::Px;
//!
//! let track = Px::new(117.0);
//! let handle = Px::new(17.0);
//!
//! let max_translate = track - handle;
//! assert_eq!(max_translate, Px::new(100.0));
//! assert_eq!(Px::new(-4.0).clamp(Px::ZERO, max_translate), Px::ZERO);
//! ```

use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

/// A horizontal pixel offset or length.
///
/// Negative values are allowed so that raw, not yet clamped, drag proposals
/// can be represented.
#[derive(Debug, Default, Clone, Copy, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Px(pub f32);

impl Px {
    /// Zero pixels.
    pub const ZERO: Self = Self(0.0);

    /// Creates a new `Px` from a raw `f32`.
    pub const fn new(value: f32) -> Self {
        Px(value)
    }

    /// Returns the raw `f32` value.
    pub fn to_f32(self) -> f32 {
        self.0
    }

    /// Returns `true` unless the value is NaN or infinite.
    pub fn is_finite(self) -> bool {
        self.0.is_finite()
    }

    /// Returns the value with negatives mapped to zero.
    pub fn positive(self) -> Self {
        Px(self.0.max(0.0))
    }

    /// Restricts the value to `[min, max]`.
    ///
    /// Unlike [`f32::clamp`] this never panics: when `max < min` the result is
    /// `min`, which is what a collapsed track (handle wider than the track)
    /// needs.
    pub fn clamp(self, min: Self, max: Self) -> Self {
        if self.0 < min.0 {
            min
        } else if self.0 > max.0 {
            if max.0 < min.0 { min } else { max }
        } else {
            self
        }
    }

    /// Returns the smaller of two values.
    pub fn min(self, other: Self) -> Self {
        Px(self.0.min(other.0))
    }

    /// Returns the larger of two values.
    pub fn max(self, other: Self) -> Self {
        Px(self.0.max(other.0))
    }
}

impl From<f32> for Px {
    fn from(value: f32) -> Self {
        Px(value)
    }
}

impl Add for Px {
    type Output = Px;

    fn add(self, rhs: Self) -> Self::Output {
        Px(self.0 + rhs.0)
    }
}

impl Sub for Px {
    type Output = Px;

    fn sub(self, rhs: Self) -> Self::Output {
        Px(self.0 - rhs.0)
    }
}

impl Neg for Px {
    type Output = Px;

    fn neg(self) -> Self::Output {
        Px(-self.0)
    }
}

impl Mul<f32> for Px {
    type Output = Px;

    fn mul(self, rhs: f32) -> Self::Output {
        Px(self.0 * rhs)
    }
}

impl Div<f32> for Px {
    type Output = Px;

    fn div(self, rhs: f32) -> Self::Output {
        Px(self.0 / rhs)
    }
}

impl AddAssign for Px {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl SubAssign for Px {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}
