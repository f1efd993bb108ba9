//! JSON writer.

use crate::ensemble::ParcelEnsemble;
use crate::error::WriteError;
use std::io::Write;

/// Write the serde representation of the ensemble
///
/// # Errors
/// Returns error if serialization or the writer fails
pub fn write_json<W: Write>(writer: &mut W, ensemble: &ParcelEnsemble) -> Result<(), WriteError> {
    serde_json::to_writer_pretty(&mut *writer, ensemble)
        .map_err(|e| WriteError::SerializeFailed(e.to_string()))?;
    writeln!(writer)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_CAPACITY;
    use crate::core_types::units::{Degrees, Hectopascals};
    use crate::ensemble::Parcel;

    #[test]
    fn test_json_preserves_ensemble() {
        let mut ens = ParcelEnsemble::with_capacity(8);
        ens.push(Parcel {
            time: 60.0,
            pressure: Hectopascals::new(250.0),
            longitude: Degrees::new(-120.0),
            latitude: Degrees::new(35.0),
        })
        .unwrap();

        let mut out = Vec::new();
        write_json(&mut out, &ens).unwrap();

        let parsed: ParcelEnsemble = serde_json::from_slice(&out).unwrap();
        assert_eq!(parsed.times(), ens.times());
        assert_eq!(parsed.pressures(), ens.pressures());
        assert_eq!(parsed.longitudes(), ens.longitudes());
        assert_eq!(parsed.latitudes(), ens.latitudes());
        // Capacity is a run limit and is not written
        assert_eq!(parsed.capacity(), DEFAULT_CAPACITY);

        let text = String::from_utf8(out).unwrap();
        assert!(!text.contains("mass"));
        assert!(!text.contains("capacity"));
    }
}
