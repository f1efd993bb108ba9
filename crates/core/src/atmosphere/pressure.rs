//! Pressure-altitude conversion.

use crate::core_types::units::{Hectopascals, Kilometers};

/// Reference surface pressure (hPa).
pub const P0: f64 = 1013.25;

/// Atmospheric scale height (km).
pub const SCALE_HEIGHT: f64 = 7.0;

/// Pressure at a given pressure-altitude.
///
/// `p = P0 * exp(-z / H0)`
#[inline]
#[must_use]
pub fn pressure(z: Kilometers) -> Hectopascals {
    Hectopascals::new(P0 * (-*z / SCALE_HEIGHT).exp())
}

/// Pressure-altitude of a given pressure, the inverse of [`pressure`].
///
/// `z = H0 * ln(P0 / p)`
#[inline]
#[must_use]
pub fn altitude(p: Hectopascals) -> Kilometers {
    Kilometers::new(SCALE_HEIGHT * (P0 / *p).ln())
}
