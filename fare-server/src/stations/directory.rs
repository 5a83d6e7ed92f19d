//! Per-mode station directory.

use std::collections::{BTreeMap, HashMap};

use crate::domain::{Coordinate, Mode, StationId};

use super::error::StationError;

/// Read-only station lookup, keyed by mode then exact station name.
#[derive(Debug, Clone, Default)]
pub struct StationDirectory {
    stations: HashMap<Mode, BTreeMap<StationId, Coordinate>>,
}

impl StationDirectory {
    /// Create an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a station to a mode's network.
    ///
    /// Station names must be unique within a mode; the same name may appear
    /// in both the rail and bus networks.
    pub fn insert(
        &mut self,
        mode: Mode,
        station: StationId,
        coordinate: Coordinate,
    ) -> Result<(), StationError> {
        let network = self.stations.entry(mode).or_default();
        if network.contains_key(&station) {
            return Err(StationError::DuplicateStation { mode, station });
        }
        network.insert(station, coordinate);
        Ok(())
    }

    /// Look up a station's coordinate.
    pub fn coordinate_of(
        &self,
        mode: Mode,
        station: &StationId,
    ) -> Result<Coordinate, StationError> {
        self.stations
            .get(&mode)
            .and_then(|network| network.get(station))
            .copied()
            .ok_or_else(|| StationError::UnknownStation {
                mode,
                station: station.clone(),
            })
    }

    /// Check whether a station exists in a mode's network.
    pub fn contains(&self, mode: Mode, station: &StationId) -> bool {
        self.stations
            .get(&mode)
            .is_some_and(|network| network.contains_key(station))
    }

    /// All stations of a mode, sorted by name.
    pub fn stations(&self, mode: Mode) -> impl Iterator<Item = (&StationId, &Coordinate)> {
        self.stations.get(&mode).into_iter().flat_map(|n| n.iter())
    }

    /// Number of stations across all modes.
    pub fn len(&self) -> usize {
        self.stations.values().map(BTreeMap::len).sum()
    }

    /// Returns true if no stations are loaded.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
