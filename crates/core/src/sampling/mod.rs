//! Grid sweep driver.
//!
//! Enumerates the sweep grid and asks the [`ParcelSampler`] for `rep`
//! parcels per cell. The nesting order is time, altitude, longitude,
//! latitude and finally repetition; parcels land in the ensemble in exactly
//! that order, which downstream tools rely on for reproducible file layouts.

mod sampler;

pub use sampler::{sphere_point, Cell, ParcelSampler};

use crate::config::SweepSpec;
use crate::ensemble::ParcelEnsemble;
use crate::error::{ConfigError, InitError};
use crate::random::{RandomSource, UniformSource};
use tracing::{debug, info, warn};

/// Generate the parcel ensemble for `spec`, seeding a fresh random source
/// from `spec.seed` (0 selects non-deterministic seeding).
///
/// # Errors
/// Returns `Config`, `CapacityExceeded`, `EmptyEnsemble` or
/// `DegenerateBand`; no partial ensemble is ever returned
pub fn generate(spec: &SweepSpec) -> Result<ParcelEnsemble, InitError> {
    let mut rng = RandomSource::from_seed_option(spec.seed);
    generate_with(spec, &mut rng)
}

/// Generate the parcel ensemble for `spec` drawing from `rng`.
///
/// # Errors
/// Returns `Config` for an axis whose step never reaches its stop value,
/// `CapacityExceeded` as soon as the sweep would overflow the ensemble
/// (before drawing for the overflowing parcel), `EmptyEnsemble` if the sweep
/// produced nothing, and `DegenerateBand` if a latitude band cannot be
/// sampled
pub fn generate_with<S: UniformSource + ?Sized>(
    spec: &SweepSpec,
    rng: &mut S,
) -> Result<ParcelEnsemble, InitError> {
    let sampler = ParcelSampler::new(spec.perturbation, spec.max_tries);
    if spec.perturbation.ulat != 0.0 && spec.perturbation.ulon != 0.0 {
        warn!(
            "INIT_ULON = {} is ignored: longitudes are drawn over the full sphere when INIT_ULAT > 0",
            spec.perturbation.ulon
        );
    }

    for (name, axis) in [
        ("time", &spec.time),
        ("altitude", &spec.altitude),
        ("longitude", &spec.longitude),
        ("latitude", &spec.latitude),
    ] {
        if axis.step_count().is_none() {
            return Err(ConfigError::Invalid {
                name: format!("{name} axis"),
                msg: format!("step {} never reaches stop {}", axis.step, axis.stop),
            }
            .into());
        }
    }
    if let Some(n) = spec.expected_count() {
        info!("Creating {n} air parcels (capacity {})", spec.capacity);
    }
    debug!(
        time = ?spec.time,
        altitude = ?spec.altitude,
        longitude = ?spec.longitude,
        latitude = ?spec.latitude,
        rep = spec.rep,
        "Sweep grid"
    );

    let mut ensemble = ParcelEnsemble::with_capacity(spec.capacity);

    for t in spec.time.values() {
        for z in spec.altitude.values() {
            for lon in spec.longitude.values() {
                for lat in spec.latitude.values() {
                    for _ in 0..spec.rep {
                        if ensemble.is_full() {
                            return Err(InitError::CapacityExceeded {
                                capacity: ensemble.capacity(),
                            });
                        }
                        let parcel = sampler.sample(rng, Cell { t, z, lon, lat })?;
                        ensemble.push(parcel)?;
                    }
                }
            }
        }
    }

    if ensemble.is_empty() {
        return Err(InitError::EmptyEnsemble);
    }

    if let Some(total) = spec.mass {
        ensemble.assign_mass(total)?;
        debug!("Assigned mass {} per parcel", total / ensemble.len() as f64);
    }

    info!("Created {} air parcels", ensemble.len());
    Ok(ensemble)
}
