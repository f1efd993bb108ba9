//! Sweep specification: the grid axes, jitter widths and run parameters.

use super::control::ControlFile;
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Default ensemble capacity (maximum number of parcels).
pub const DEFAULT_CAPACITY: usize = 10_000_000;

/// Default cap on latitude-band rejection redraws per parcel.
pub const DEFAULT_MAX_TRIES: usize = 1_000_000;

/// Name of the quantity that carries parcel mass.
pub const MASS_QUANTITY: &str = "m";

/// One grid dimension, swept inclusively from `start` to `stop`.
///
/// Values are produced by repeated addition of `step`, so a zero or
/// wrong-signed step with `start <= stop` never terminates.
/// [`SweepAxis::step_count`] reports such axes as `None` and the generator
/// rejects them before sweeping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepAxis {
    pub start: f64,
    pub stop: f64,
    pub step: f64,
}

impl SweepAxis {
    pub const fn new(start: f64, stop: f64, step: f64) -> Self {
        Self { start, stop, step }
    }

    /// Axis with exactly one value
    pub const fn single(value: f64) -> Self {
        Self::new(value, value, 1.0)
    }

    /// Iterate the nominal values of the axis
    pub fn values(&self) -> AxisValues {
        AxisValues {
            next: self.start,
            stop: self.stop,
            step: self.step,
        }
    }

    /// Number of values on the axis, or `None` if the sweep never ends
    pub fn step_count(&self) -> Option<usize> {
        let advances = self.step > 0.0;
        if self.start <= self.stop && !advances {
            return None;
        }
        Some(self.values().count())
    }

    fn from_control(
        ctl: &ControlFile,
        start: &str,
        stop: &str,
        step: &str,
    ) -> Result<Self, ConfigError> {
        Ok(Self::new(
            ctl.scan(start, 0.0)?,
            ctl.scan(stop, 0.0)?,
            ctl.scan(step, 1.0)?,
        ))
    }
}

impl Default for SweepAxis {
    fn default() -> Self {
        Self::single(0.0)
    }
}

/// Iterator over the nominal values of a [`SweepAxis`].
#[derive(Debug, Clone)]
pub struct AxisValues {
    next: f64,
    stop: f64,
    step: f64,
}

impl Iterator for AxisValues {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        if self.next <= self.stop {
            let value = self.next;
            self.next += self.step;
            Some(value)
        } else {
            None
        }
    }
}

/// Total jitter widths applied symmetrically around a cell's nominal values.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Perturbation {
    /// Time jitter width (s)
    pub ut: f64,
    /// Altitude jitter width (km)
    pub uz: f64,
    /// Longitude jitter width (deg), only used for zero-width latitude bands
    pub ulon: f64,
    /// Latitude band width (deg)
    pub ulat: f64,
}

/// Fully resolved parameters of one generation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepSpec {
    /// Time axis (s)
    pub time: SweepAxis,
    /// Pressure-altitude axis (km)
    pub altitude: SweepAxis,
    /// Longitude axis (deg)
    pub longitude: SweepAxis,
    /// Latitude axis (deg)
    pub latitude: SweepAxis,
    pub perturbation: Perturbation,
    /// Parcels emitted per grid cell
    pub rep: usize,
    /// Total mass split over all parcels; `None` when no mass quantity is configured
    pub mass: Option<f64>,
    /// Random seed; 0 selects non-deterministic seeding
    pub seed: u64,
    /// Maximum number of parcels
    pub capacity: usize,
    /// Maximum latitude-band redraws per parcel
    pub max_tries: usize,
}

impl Default for SweepSpec {
    fn default() -> Self {
        Self {
            time: SweepAxis::default(),
            altitude: SweepAxis::default(),
            longitude: SweepAxis::default(),
            latitude: SweepAxis::default(),
            perturbation: Perturbation::default(),
            rep: 1,
            mass: None,
            seed: 0,
            capacity: DEFAULT_CAPACITY,
            max_tries: DEFAULT_MAX_TRIES,
        }
    }
}

impl SweepSpec {
    /// Resolve a sweep from control parameters.
    ///
    /// # Errors
    /// Returns error if any parameter fails to parse or a quantity
    /// table entry is missing
    pub fn from_control(ctl: &ControlFile) -> Result<Self, ConfigError> {
        let time = SweepAxis::from_control(ctl, "INIT_T0", "INIT_T1", "INIT_DT")?;
        let altitude = SweepAxis::from_control(ctl, "INIT_Z0", "INIT_Z1", "INIT_DZ")?;
        let longitude = SweepAxis::from_control(ctl, "INIT_LON0", "INIT_LON1", "INIT_DLON")?;
        let latitude = SweepAxis::from_control(ctl, "INIT_LAT0", "INIT_LAT1", "INIT_DLAT")?;

        let perturbation = Perturbation {
            ut: ctl.scan("INIT_UT", 0.0)?,
            uz: ctl.scan("INIT_UZ", 0.0)?,
            ulon: ctl.scan("INIT_ULON", 0.0)?,
            ulat: ctl.scan("INIT_ULAT", 0.0)?,
        };

        let rep = ctl.scan_count("INIT_REP", 1)? as usize;
        let total_mass: f64 = ctl.scan("INIT_MASS", 0.0)?;
        let seed = ctl.scan_count("INIT_SEED", 0)?;
        let capacity = ctl.scan_count("NP", DEFAULT_CAPACITY as u64)? as usize;
        let max_tries = ctl.scan_count("INIT_MAX_TRIES", DEFAULT_MAX_TRIES as u64)? as usize;

        let mass = mass_quantity_enabled(ctl)?.then_some(total_mass);

        Ok(Self {
            time,
            altitude,
            longitude,
            latitude,
            perturbation,
            rep,
            mass,
            seed,
            capacity,
            max_tries,
        })
    }

    /// Expected number of parcels, or `None` if some axis never terminates
    pub fn expected_count(&self) -> Option<usize> {
        [self.time, self.altitude, self.longitude, self.latitude]
            .iter()
            .try_fold(self.rep, |acc, axis| {
                axis.step_count().and_then(|n| acc.checked_mul(n))
            })
    }
}

/// Scan the quantity table (`NQ`, `QNT_NAME[i]`) for the mass quantity.
fn mass_quantity_enabled(ctl: &ControlFile) -> Result<bool, ConfigError> {
    let nq = ctl.scan_count("NQ", 0)? as usize;
    let mut enabled = false;

    for iq in 0..nq {
        let name = ctl
            .get_indexed("QNT_NAME", iq)
            .ok_or_else(|| ConfigError::Invalid {
                name: format!("QNT_NAME[{iq}]"),
                msg: format!("missing, NQ = {nq}"),
            })?;

        if name == MASS_QUANTITY {
            enabled = true;
        } else {
            warn!("Quantity '{name}' is not initialised by this tool, ignoring");
        }
    }

    Ok(enabled)
}
