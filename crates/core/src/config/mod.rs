//! Run configuration.
//!
//! Parameters come from a control file plus command-line overrides
//! ([`ControlFile`]) and are resolved once into a [`SweepSpec`].

mod control;
mod sweep;

pub use control::{ControlFile, NO_FILE};
pub use sweep::{
    AxisValues, Perturbation, SweepAxis, SweepSpec, DEFAULT_CAPACITY, DEFAULT_MAX_TRIES,
    MASS_QUANTITY,
};
