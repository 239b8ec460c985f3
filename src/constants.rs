//! Frequency conversion helpers.

use std::f64::consts::PI;

/// Returns the angular frequency `2πf` corresponding to a linear frequency `hz`.
#[inline]
#[must_use]
pub fn angular_frequency(hz: f64) -> f64 {
    2.0 * PI * hz
}
