//! Binary column writer.
//!
//! Layout (all little-endian):
//! - magic `PATM`
//! - `u32` format version
//! - `u64` parcel count
//! - `u32` quantity count (0 or 1)
//! - `f64` columns: time, pressure, longitude, latitude, then mass if present

use crate::ensemble::ParcelEnsemble;
use crate::error::WriteError;
use std::io::Write;

/// File magic
pub const BINARY_MAGIC: &[u8; 4] = b"PATM";

/// Current binary format version
pub const BINARY_VERSION: u32 = 1;

fn write_column<W: Write>(writer: &mut W, values: &[f64]) -> Result<(), WriteError> {
    for v in values {
        writer.write_all(&v.to_le_bytes())?;
    }
    Ok(())
}

/// Write the ensemble as raw little-endian columns
///
/// # Errors
/// Returns error if the writer fails
pub fn write_binary<W: Write>(writer: &mut W, ensemble: &ParcelEnsemble) -> Result<(), WriteError> {
    let nq: u32 = u32::from(ensemble.mass().is_some());

    writer.write_all(BINARY_MAGIC)?;
    writer.write_all(&BINARY_VERSION.to_le_bytes())?;
    writer.write_all(&(ensemble.len() as u64).to_le_bytes())?;
    writer.write_all(&nq.to_le_bytes())?;

    write_column(writer, ensemble.times())?;
    write_column(writer, ensemble.pressures())?;
    write_column(writer, ensemble.longitudes())?;
    write_column(writer, ensemble.latitudes())?;
    if let Some(mass) = ensemble.mass() {
        write_column(writer, mass)?;
    }

    Ok(())
}
