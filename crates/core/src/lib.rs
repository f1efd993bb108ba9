//! Parcel Initialisation Core Library
//!
//! Generates the initial air-parcel ensemble for a Lagrangian particle
//! dispersion model. A regular grid over time, pressure-altitude, longitude
//! and latitude is swept, each cell emits a configurable number of parcels,
//! and each parcel position is jittered around its cell.
//!
//! ## Sampling
//!
//! - Time and altitude receive a uniform jitter of configurable width
//! - Horizontal positions are drawn uniformly over the sphere and rejected
//!   until they fall inside the cell's latitude band
//! - An optional total mass is split equally over all parcels
//!
//! ## Usage
//! ```
//! use parcel_init_core::{generate_with, RandomSource, SweepAxis, SweepSpec};
//!
//! let spec = SweepSpec {
//!     latitude: SweepAxis::new(-10.0, 10.0, 10.0),
//!     rep: 2,
//!     ..SweepSpec::default()
//! };
//! let ensemble = generate_with(&spec, &mut RandomSource::seeded(42)).unwrap();
//! assert_eq!(ensemble.len(), 6);
//! ```

// Core types and utilities
pub mod atmosphere;
pub mod core_types;
pub mod error;
pub mod random;

// Configuration
pub mod config;

// Generation and output
pub mod ensemble;
pub mod output;
pub mod sampling;

pub use config::{ControlFile, Perturbation, SweepAxis, SweepSpec};
pub use core_types::{Degrees, Hectopascals, Kilometers};
pub use ensemble::{Parcel, ParcelEnsemble};
pub use error::{ConfigError, InitError, WriteError};
pub use output::{write_atm, AtmFormat};
pub use random::{RandomSource, UniformSource};
pub use sampling::{generate, generate_with, sphere_point, Cell, ParcelSampler};
