//! Semantic unit types for parcel coordinates
//!
//! Newtype wrappers keep altitudes, pressures and angles from being mixed up
//! while the sweep hands values between the sampler, the atmosphere transform
//! and the writers.
//!
//! # Design Philosophy
//! - All coordinates use f64; parcel positions are written with full precision
//! - `Deref` to the inner value for arithmetic-heavy call sites
//! - Total ordering via `Ord` (NaN handled as greater than all values)
//! - Serde support for serialization
//!
//! # Usage
//! ```
//! use parcel_init_core::core_types::units::{Hectopascals, Kilometers};
//!
//! let z = Kilometers::new(7.0);
//! let p: Hectopascals = z.into();
//! assert!((*p - 1013.25 / std::f64::consts::E).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Deref, Sub};

/// Implements total ordering, `Deref<Target = f64>` and `Display` for an f64 newtype.
macro_rules! f64_unit {
    ($name:ident, $suffix:literal) => {
        impl Eq for $name {}

        impl PartialOrd for $name {
            fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
                Some(self.cmp(other))
            }
        }

        impl Ord for $name {
            fn cmp(&self, other: &Self) -> Ordering {
                self.0.total_cmp(&other.0)
            }
        }

        impl Deref for $name {
            type Target = f64;
            #[inline]
            fn deref(&self) -> &f64 {
                &self.0
            }
        }

        impl Add for $name {
            type Output = Self;
            #[inline]
            fn add(self, rhs: Self) -> Self {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $name {
            type Output = Self;
            #[inline]
            fn sub(self, rhs: Self) -> Self {
                Self(self.0 - rhs.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{} {}", self.0, $suffix)
            }
        }

        impl $name {
            /// Create a new value
            #[inline]
            #[must_use]
            pub const fn new(value: f64) -> Self {
                Self(value)
            }

            /// Raw value
            #[inline]
            #[must_use]
            pub const fn value(self) -> f64 {
                self.0
            }
        }
    };
}

// ============================================================================
// VERTICAL COORDINATES
// ============================================================================

/// Pressure-altitude in kilometers
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Kilometers(f64);

f64_unit!(Kilometers, "km");

/// Pressure in hectopascals
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Hectopascals(f64);

f64_unit!(Hectopascals, "hPa");

impl From<Kilometers> for Hectopascals {
    fn from(z: Kilometers) -> Self {
        crate::atmosphere::pressure(z)
    }
}

impl From<Hectopascals> for Kilometers {
    fn from(p: Hectopascals) -> Self {
        crate::atmosphere::altitude(p)
    }
}

// ============================================================================
// ANGLES
// ============================================================================

/// Angle in degrees (longitude or latitude)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Degrees(f64);

f64_unit!(Degrees, "deg");

impl Degrees {
    /// Wrap a longitude into [-180, 180)
    #[inline]
    #[must_use]
    pub fn wrap_longitude(self) -> Self {
        let wrapped = (self.0 + 180.0).rem_euclid(360.0) - 180.0;
        // rem_euclid rounds tiny negative inputs up to 360
        if wrapped >= 180.0 {
            Self(-180.0)
        } else {
            Self(wrapped)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering_total() {
        let a = Kilometers::new(1.0);
        let b = Kilometers::new(f64::NAN);
        assert!(a < b);
        assert_eq!(a.max(Kilometers::new(0.5)), a);
    }

    #[test]
    fn test_wrap_longitude() {
        assert_eq!(*Degrees::new(180.0).wrap_longitude(), -180.0);
        assert_eq!(*Degrees::new(-180.0).wrap_longitude(), -180.0);
        assert_eq!(*Degrees::new(190.0).wrap_longitude(), -170.0);
        assert_eq!(*Degrees::new(-190.0).wrap_longitude(), 170.0);
        assert_eq!(*Degrees::new(45.0).wrap_longitude(), 45.0);
    }

    #[test]
    fn test_wrap_longitude_just_below_dateline() {
        let below = Degrees::new(f64::from_bits((-180.0f64).to_bits() + 1));
        assert!(*below < -180.0);
        let wrapped = below.wrap_longitude();
        assert!(
            (-180.0..180.0).contains(&*wrapped),
            "wrapped longitude {} outside [-180, 180)",
            *wrapped
        );
    }

    #[test]
    fn test_display_suffix() {
        assert_eq!(Hectopascals::new(500.0).to_string(), "500 hPa");
        assert_eq!(Degrees::new(-30.5).to_string(), "-30.5 deg");
    }
}
