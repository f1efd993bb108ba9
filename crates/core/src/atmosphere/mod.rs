//! Vertical coordinate transforms for parcel initialisation.
//!
//! Parcels are swept in pressure-altitude but stored in pressure, so the
//! sampler converts every jittered altitude through [`pressure`] and the
//! writers convert back through [`altitude`] when reporting heights.
//!
//! # Scientific Background
//!
//! Pressure-altitude uses an isothermal atmosphere with a constant scale
//! height, the usual vertical coordinate in Lagrangian transport models:
//! `p(z) = p0 * exp(-z / H0)`. It is strictly monotonic, so any altitude
//! jitter maps onto a unique pressure.
//!
//! # References
//!
//! - Wallace, J.M. & Hobbs, P.V. (2006). "Atmospheric Science: An Introductory Survey."
//! - Hoffmann, L. et al. (2016). "Lagrangian transport simulations of volcanic sulfur dioxide emissions."

mod pressure;

pub use pressure::{altitude, pressure, P0, SCALE_HEIGHT};
