//! ASCII table writer.

use crate::atmosphere::altitude;
use crate::config::MASS_QUANTITY;
use crate::ensemble::ParcelEnsemble;
use crate::error::WriteError;
use std::io::Write;

/// Write a `#`-commented header followed by one row per parcel.
///
/// Columns are time (s, two decimals), altitude (km), longitude and latitude
/// (deg) and, when assigned, mass (kg). A blank line separates rows whose
/// time differs from the previous row.
///
/// # Errors
/// Returns error if the writer fails
pub fn write_ascii<W: Write>(writer: &mut W, ensemble: &ParcelEnsemble) -> Result<(), WriteError> {
    writeln!(writer, "# $1 = time [s]")?;
    writeln!(writer, "# $2 = altitude [km]")?;
    writeln!(writer, "# $3 = longitude [deg]")?;
    writeln!(writer, "# $4 = latitude [deg]")?;
    if ensemble.mass().is_some() {
        writeln!(writer, "# $5 = {MASS_QUANTITY} [kg]")?;
    }

    let mut last_time = None;
    for (ip, parcel) in ensemble.iter().enumerate() {
        if last_time != Some(parcel.time) {
            writeln!(writer)?;
            last_time = Some(parcel.time);
        }

        let z = altitude(parcel.pressure);
        write!(
            writer,
            "{:.2} {} {} {}",
            parcel.time, *z, *parcel.longitude, *parcel.latitude
        )?;
        if let Some(mass) = ensemble.mass() {
            write!(writer, " {}", mass[ip])?;
        }
        writeln!(writer)?;
    }

    Ok(())
}
