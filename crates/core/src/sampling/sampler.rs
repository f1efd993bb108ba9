//! Single-parcel sampler.
//!
//! Time and altitude receive a uniform jitter around the cell's nominal
//! value. Horizontal positions are drawn uniformly over the sphere and
//! rejected until they fall inside the cell's latitude band, which keeps the
//! accepted points uniform by area within the band.
//!
//! # Scientific Background
//!
//! For `U1, U2 ~ U[0, 1)`, `theta = 2*pi*U1` and `phi = acos(2*U2 - 1)` give
//! a point distributed uniformly over the sphere surface. Drawing `phi`
//! uniformly instead would crowd points towards the poles, because the area
//! of a latitude strip scales with `cos(latitude)`.
//!
//! # References
//!
//! - Marsaglia, G. (1972). "Choosing a point from the surface of a sphere." Ann. Math. Stat.
//! - Weisstein, E.W. "Sphere Point Picking." `MathWorld`.

use crate::atmosphere::pressure;
use crate::config::Perturbation;
use crate::core_types::units::{Degrees, Kilometers};
use crate::ensemble::Parcel;
use crate::error::InitError;
use crate::random::UniformSource;
use std::f64::consts::PI;

/// Latitude limit of the sphere (deg).
const MAX_LATITUDE: f64 = 90.0;

/// Nominal values of one grid cell
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    /// Time (s)
    pub t: f64,
    /// Pressure-altitude (km)
    pub z: f64,
    /// Longitude (deg)
    pub lon: f64,
    /// Latitude (deg)
    pub lat: f64,
}

/// Draw a point uniformly distributed on the sphere.
///
/// Returns `(longitude, latitude)` with longitude in [-180, 180) and
/// latitude in [-90, 90]. Consumes exactly two draws.
pub fn sphere_point<S: UniformSource + ?Sized>(rng: &mut S) -> (Degrees, Degrees) {
    let theta = 2.0 * PI * rng.uniform();
    let phi = (2.0 * rng.uniform() - 1.0).acos();

    let lon = Degrees::new(theta * 180.0 / PI - 180.0).wrap_longitude();
    let lat = Degrees::new(phi * 180.0 / PI - MAX_LATITUDE);
    (lon, lat)
}

/// Symmetric uniform jitter of total width `width` around `center`
#[inline]
fn jitter<S: UniformSource + ?Sized>(rng: &mut S, center: f64, width: f64) -> f64 {
    center + width * (rng.uniform() - 0.5)
}

/// Synthesizes parcels for grid cells
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParcelSampler {
    perturbation: Perturbation,
    max_tries: usize,
}

impl ParcelSampler {
    /// Sampler applying `perturbation`, giving up on a latitude band after
    /// `max_tries` rejected redraws
    pub fn new(perturbation: Perturbation, max_tries: usize) -> Self {
        Self {
            perturbation,
            max_tries,
        }
    }

    /// Latitude band `[lat - ulat/2, lat + ulat/2]` for a nominal latitude
    pub fn band(&self, lat: f64) -> (f64, f64) {
        let half = self.perturbation.ulat / 2.0;
        (lat - half, lat + half)
    }

    /// Check that the latitude band around `lat` can be sampled at all.
    ///
    /// # Errors
    /// Returns `DegenerateBand` for a negative or NaN band width, or a band
    /// that does not overlap [-90, 90] with positive width
    pub fn check_band(&self, lat: f64) -> Result<(), InitError> {
        let ulat = self.perturbation.ulat;
        if ulat.is_nan() || ulat < 0.0 {
            return Err(InitError::degenerate_band(lat, ulat, "band width must be non-negative"));
        }

        let (lo, hi) = self.band(lat);
        if ulat == 0.0 {
            if lat.abs() > MAX_LATITUDE {
                return Err(InitError::degenerate_band(lat, ulat, "latitude lies outside [-90, 90]"));
            }
        } else if lo >= MAX_LATITUDE || hi <= -MAX_LATITUDE {
            return Err(InitError::degenerate_band(lat, ulat, "band lies outside [-90, 90]"));
        }
        Ok(())
    }

    /// Sample one parcel for `cell`.
    ///
    /// Draw order is time, altitude, then longitude/latitude pairs until a
    /// latitude inside the band is found. A zero-width band pins the
    /// latitude to the nominal value and jitters longitude by `ulon`.
    ///
    /// # Errors
    /// Returns `DegenerateBand` if the band is unusable or no draw lands in
    /// it within `max_tries` redraws
    pub fn sample<S: UniformSource + ?Sized>(
        &self,
        rng: &mut S,
        cell: Cell,
    ) -> Result<Parcel, InitError> {
        let Perturbation { ut, uz, ulon, ulat } = self.perturbation;

        let time = jitter(rng, cell.t, ut);
        let pressure = pressure(Kilometers::new(jitter(rng, cell.z, uz)));

        let (longitude, latitude) = if ulat == 0.0 {
            self.check_band(cell.lat)?;
            let lon = Degrees::new(jitter(rng, cell.lon, ulon)).wrap_longitude();
            (lon, Degrees::new(cell.lat))
        } else {
            self.sample_in_band(rng, cell.lat)?
        };

        Ok(Parcel {
            time,
            pressure,
            longitude,
            latitude,
        })
    }

    /// Rejection-sample a sphere point whose latitude lies in the band
    /// around `lat`.
    ///
    /// # Errors
    /// Returns `DegenerateBand` if the band is unusable or the redraw cap is
    /// exhausted
    pub fn sample_in_band<S: UniformSource + ?Sized>(
        &self,
        rng: &mut S,
        lat: f64,
    ) -> Result<(Degrees, Degrees), InitError> {
        self.check_band(lat)?;
        let (lo, hi) = self.band(lat);

        let mut redraws = 0;
        loop {
            let (lon, sampled_lat) = sphere_point(rng);
            if (lo..=hi).contains(&*sampled_lat) {
                return Ok((lon, sampled_lat));
            }

            redraws += 1;
            if redraws > self.max_tries {
                return Err(InitError::degenerate_band(
                    lat,
                    self.perturbation.ulat,
                    format!("no sample within {} redraws", self.max_tries),
                ));
            }
        }
    }
}
