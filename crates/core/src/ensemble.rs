//! Parcel ensemble: the initial state handed to the trajectory model.
//!
//! Parcel attributes are stored as parallel columns indexed by parcel number,
//! matching the layout the writers emit. Insertion order is preserved exactly.

use crate::config::DEFAULT_CAPACITY;
use crate::core_types::units::{Degrees, Hectopascals};
use crate::error::InitError;
use serde::{Deserialize, Serialize};

/// One air parcel's position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Parcel {
    /// Time (s)
    pub time: f64,
    pub pressure: Hectopascals,
    /// Longitude in [-180, 180)
    pub longitude: Degrees,
    /// Latitude in [-90, 90]
    pub latitude: Degrees,
}

/// Bounded, ordered collection of parcels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParcelEnsemble {
    /// Run limit, not part of the saved state; reloads get the default
    #[serde(skip, default = "default_capacity")]
    capacity: usize,
    time: Vec<f64>,
    pressure: Vec<f64>,
    longitude: Vec<f64>,
    latitude: Vec<f64>,
    /// Per-parcel mass, present only when a mass quantity is configured
    #[serde(skip_serializing_if = "Option::is_none", default)]
    mass: Option<Vec<f64>>,
}

fn default_capacity() -> usize {
    DEFAULT_CAPACITY
}

impl ParcelEnsemble {
    /// Empty ensemble holding at most `capacity` parcels
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            time: Vec::new(),
            pressure: Vec::new(),
            longitude: Vec::new(),
            latitude: Vec::new(),
            mass: None,
        }
    }

    /// Append a parcel at the next free index.
    ///
    /// # Errors
    /// Returns `CapacityExceeded` if the ensemble is already full; the
    /// ensemble is left unchanged
    pub fn push(&mut self, parcel: Parcel) -> Result<(), InitError> {
        if self.is_full() {
            return Err(InitError::CapacityExceeded {
                capacity: self.capacity,
            });
        }

        self.time.push(parcel.time);
        self.pressure.push(*parcel.pressure);
        self.longitude.push(*parcel.longitude);
        self.latitude.push(*parcel.latitude);
        if let Some(mass) = &mut self.mass {
            mass.push(0.0);
        }
        Ok(())
    }

    /// Split `total` equally over every parcel
    ///
    /// # Errors
    /// Returns `EmptyEnsemble` if there are no parcels to carry the mass
    pub fn assign_mass(&mut self, total: f64) -> Result<(), InitError> {
        if self.is_empty() {
            return Err(InitError::EmptyEnsemble);
        }
        let share = total / self.len() as f64;
        self.mass = Some(vec![share; self.len()]);
        Ok(())
    }

    /// Number of parcels
    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    /// Maximum number of parcels
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// True if another push would exceed the capacity
    pub fn is_full(&self) -> bool {
        self.len() >= self.capacity
    }

    /// Parcel at `index`
    pub fn get(&self, index: usize) -> Option<Parcel> {
        Some(Parcel {
            time: *self.time.get(index)?,
            pressure: Hectopascals::new(self.pressure[index]),
            longitude: Degrees::new(self.longitude[index]),
            latitude: Degrees::new(self.latitude[index]),
        })
    }

    /// Parcels in insertion order
    pub fn iter(&self) -> impl Iterator<Item = Parcel> + '_ {
        (0..self.len()).filter_map(|i| self.get(i))
    }

    pub fn times(&self) -> &[f64] {
        &self.time
    }

    pub fn pressures(&self) -> &[f64] {
        &self.pressure
    }

    pub fn longitudes(&self) -> &[f64] {
        &self.longitude
    }

    pub fn latitudes(&self) -> &[f64] {
        &self.latitude
    }

    /// Per-parcel mass, if assigned
    pub fn mass(&self) -> Option<&[f64]> {
        self.mass.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parcel(time: f64) -> Parcel {
        Parcel {
            time,
            pressure: Hectopascals::new(500.0),
            longitude: Degrees::new(10.0),
            latitude: Degrees::new(-20.0),
        }
    }

    #[test]
    fn test_push_preserves_order() {
        let mut ens = ParcelEnsemble::with_capacity(10);
        for t in 0..5 {
            ens.push(parcel(f64::from(t))).unwrap();
        }
        assert_eq!(ens.len(), 5);
        assert_eq!(ens.times(), &[0.0, 1.0, 2.0, 3.0, 4.0]);
        assert_eq!(ens.get(3), Some(parcel(3.0)));
        assert_eq!(ens.get(5), None);
    }

    #[test]
    fn test_capacity_is_hard_limit() {
        let mut ens = ParcelEnsemble::with_capacity(2);
        ens.push(parcel(0.0)).unwrap();
        ens.push(parcel(1.0)).unwrap();

        let err = ens.push(parcel(2.0)).unwrap_err();
        assert!(matches!(err, InitError::CapacityExceeded { capacity: 2 }));
        assert_eq!(ens.len(), 2);
    }

    #[test]
    fn test_mass_split() {
        let mut ens = ParcelEnsemble::with_capacity(10);
        assert_eq!(ens.mass(), None);
        for t in 0..4 {
            ens.push(parcel(f64::from(t))).unwrap();
        }
        ens.assign_mass(100.0).unwrap();
        assert_eq!(ens.mass(), Some(&[25.0, 25.0, 25.0, 25.0][..]));
    }

    #[test]
    fn test_mass_on_empty_ensemble() {
        let mut ens = ParcelEnsemble::with_capacity(10);
        assert!(matches!(
            ens.assign_mass(1.0),
            Err(InitError::EmptyEnsemble)
        ));
    }

    #[test]
    fn test_iter_matches_columns() {
        let mut ens = ParcelEnsemble::with_capacity(3);
        ens.push(parcel(1.0)).unwrap();
        ens.push(parcel(2.0)).unwrap();
        let times: Vec<f64> = ens.iter().map(|p| p.time).collect();
        assert_eq!(times, ens.times());
    }
}
