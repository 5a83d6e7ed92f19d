//! Origin/destination pair → fare zone lookup.
//!
//! Each mode has its own OD-pair table. Rail pairs map to exactly one zone;
//! bus pairs are additionally keyed by route, since several routes may serve
//! the same pair with different fare bands.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::domain::{Mode, RouteId, StationId, ZoneCode};

/// One row of an OD-pair table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OdPair {
    pub origin: StationId,
    pub destination: StationId,
    /// Route serving the pair (bus only).
    pub route: Option<RouteId>,
    pub zone: ZoneCode,
}

impl OdPair {
    pub fn new(
        origin: StationId,
        destination: StationId,
        route: Option<RouteId>,
        zone: ZoneCode,
    ) -> Self {
        Self {
            origin,
            destination,
            route,
            zone,
        }
    }
}

/// Error building a zone map.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error(
    "conflicting {mode} fare zone for {origin} -> {destination}{}: {existing} vs {conflicting}",
    .route.as_ref().map(|r| format!(" (route {r})")).unwrap_or_default()
)]
pub struct DuplicateOdPair {
    pub mode: Mode,
    pub origin: StationId,
    pub destination: StationId,
    pub route: Option<RouteId>,
    pub existing: ZoneCode,
    pub conflicting: ZoneCode,
}

/// Outcome of a single-answer zone lookup that found no unique zone.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ZoneLookupError {
    /// No OD-pair record for the journey
    #[error("no OD-pair record")]
    Unreachable,

    /// Several routes serve the journey with different zones
    #[error("routes disagree on fare zone: {0:?}")]
    Ambiguous(Vec<ZoneCode>),
}

/// Pairs leaving one origin, grouped by destination. Each group is sorted
/// by route.
type Fanout = BTreeMap<StationId, Vec<OdPair>>;

/// Read-only (mode, origin, destination, route) → zone index.
#[derive(Debug, Clone, Default)]
pub struct ZoneMap {
    pairs: HashMap<Mode, HashMap<StationId, Fanout>>,
}

impl ZoneMap {
    /// Create an empty zone map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an OD pair.
    ///
    /// Returns `Ok(false)` if an identical record was already present. A
    /// record for the same (origin, destination, route) with a different
    /// zone is rejected.
    pub fn insert(&mut self, mode: Mode, pair: OdPair) -> Result<bool, DuplicateOdPair> {
        let group = self
            .pairs
            .entry(mode)
            .or_default()
            .entry(pair.origin.clone())
            .or_default()
            .entry(pair.destination.clone())
            .or_default();

        match group.binary_search_by(|p| p.route.cmp(&pair.route)) {
            Ok(idx) => {
                let existing = &group[idx];
                if existing.zone == pair.zone {
                    Ok(false)
                } else {
                    Err(DuplicateOdPair {
                        mode,
                        existing: existing.zone.clone(),
                        conflicting: pair.zone,
                        origin: pair.origin,
                        destination: pair.destination,
                        route: pair.route,
                    })
                }
            }
            Err(idx) => {
                group.insert(idx, pair);
                Ok(true)
            }
        }
    }

    /// All records for a journey, sorted by route.
    ///
    /// With a route, only records tagged with that route match; records
    /// without a route never match a route constraint.
    pub fn lookup(
        &self,
        mode: Mode,
        origin: &StationId,
        destination: &StationId,
        route: Option<&RouteId>,
    ) -> Vec<&OdPair> {
        self.fanout(mode, origin)
            .and_then(|f| f.get(destination))
            .map(|group| filter_route(group, route).collect())
            .unwrap_or_default()
    }

    /// The zone for a journey, when there is exactly one answer.
    ///
    /// Routes that agree on the zone count as one answer.
    pub fn zone_of(
        &self,
        mode: Mode,
        origin: &StationId,
        destination: &StationId,
        route: Option<&RouteId>,
    ) -> Result<ZoneCode, ZoneLookupError> {
        let distinct: BTreeSet<&ZoneCode> = self
            .lookup(mode, origin, destination, route)
            .into_iter()
            .map(|p| &p.zone)
            .collect();
        let mut zones: Vec<ZoneCode> = distinct.into_iter().cloned().collect();

        match zones.len() {
            0 => Err(ZoneLookupError::Unreachable),
            1 => Ok(zones.remove(0)),
            _ => Err(ZoneLookupError::Ambiguous(zones)),
        }
    }

    /// Every destination reachable from an origin, with its matching
    /// records. Destinations with no record on the given route are omitted.
    pub fn destinations_from(
        &self,
        mode: Mode,
        origin: &StationId,
        route: Option<&RouteId>,
    ) -> BTreeMap<&StationId, Vec<&OdPair>> {
        let Some(fanout) = self.fanout(mode, origin) else {
            return BTreeMap::new();
        };

        fanout
            .iter()
            .filter_map(|(dest, group)| {
                let matching: Vec<_> = filter_route(group, route).collect();
                (!matching.is_empty()).then_some((dest, matching))
            })
            .collect()
    }

    /// Sorted origins of a mode's OD table.
    pub fn origins(&self, mode: Mode) -> Vec<&StationId> {
        let mut origins: Vec<_> = self
            .pairs
            .get(&mode)
            .map(|by_origin| by_origin.keys().collect())
            .unwrap_or_default();
        origins.sort();
        origins
    }

    /// Sorted unique destinations of a mode's OD table.
    pub fn destinations(&self, mode: Mode) -> Vec<&StationId> {
        self.pairs
            .get(&mode)
            .into_iter()
            .flat_map(|by_origin| by_origin.values())
            .flat_map(|fanout| fanout.keys())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Every zone code used by a mode's OD table.
    pub fn zones(&self, mode: Mode) -> BTreeSet<&ZoneCode> {
        self.records(mode).map(|p| &p.zone).collect()
    }

    /// Every record of a mode, in no particular order.
    pub fn records(&self, mode: Mode) -> impl Iterator<Item = &OdPair> {
        self.pairs
            .get(&mode)
            .into_iter()
            .flat_map(|by_origin| by_origin.values())
            .flat_map(|fanout| fanout.values())
            .flatten()
    }

    /// Number of records across all modes.
    pub fn len(&self) -> usize {
        Mode::ALL.iter().map(|m| self.records(*m).count()).sum()
    }

    /// Returns true if no records are loaded.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn fanout(&self, mode: Mode, origin: &StationId) -> Option<&Fanout> {
        self.pairs.get(&mode).and_then(|by_origin| by_origin.get(origin))
    }
}

fn filter_route<'a>(
    group: &'a [OdPair],
    route: Option<&RouteId>,
) -> impl Iterator<Item = &'a OdPair> {
    group
        .iter()
        .filter(move |p| route.is_none_or(|r| p.route.as_ref() == Some(r)))
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn station_name() -> impl Strategy<Value = String> {
        prop::sample::select(vec!["A", "B", "C", "D", "E"]).prop_map(str::to_string)
    }

    proptest! {
        /// zone_of answers exactly for the pairs inserted, and nothing else
        #[test]
        fn zone_of_matches_table(
            rows in prop::collection::btree_map(
                (station_name(), station_name()),
                "[A-Z][0-9]{1,2}",
                0..20,
            )
        ) {
            let mut map = ZoneMap::new();
            for ((o, d), z) in &rows {
                let pair = OdPair::new(
                    StationId::parse(o).unwrap(),
                    StationId::parse(d).unwrap(),
                    None,
                    ZoneCode::parse(z).unwrap(),
                );
                map.insert(Mode::Rail, pair).unwrap();
            }

            for o in ["A", "B", "C", "D", "E"] {
                for d in ["A", "B", "C", "D", "E"] {
                    let actual = map.zone_of(
                        Mode::Rail,
                        &StationId::parse(o).unwrap(),
                        &StationId::parse(d).unwrap(),
                        None,
                    );
                    match rows.get(&(o.to_string(), d.to_string())) {
                        Some(z) => prop_assert_eq!(actual, Ok(ZoneCode::parse(z).unwrap())),
                        None => prop_assert_eq!(actual, Err(ZoneLookupError::Unreachable)),
                    }
                }
            }
        }

        /// The fan-out has one entry per distinct destination of the origin
        #[test]
        fn fanout_counts_destinations(
            rows in prop::collection::vec((station_name(), station_name()), 0..30)
        ) {
            let mut map = ZoneMap::new();
            for (o, d) in &rows {
                let pair = OdPair::new(
                    StationId::parse(o).unwrap(),
                    StationId::parse(d).unwrap(),
                    None,
                    ZoneCode::parse("D1").unwrap(),
                );
                map.insert(Mode::Rail, pair).unwrap();
            }

            let origin = StationId::parse("A").unwrap();
            let expected: BTreeSet<_> = rows
                .iter()
                .filter(|(o, _)| o == "A")
                .map(|(_, d)| d.clone())
                .collect();
            let fanout = map.destinations_from(Mode::Rail, &origin, None);
            prop_assert_eq!(fanout.len(), expected.len());
        }
    }
}
