//! The fare resolver: zone lookup joined to price lookup.

use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, warn};

use crate::domain::{Mode, PaymentMeans, RouteId, StationId, TicketType, ZoneCode};
use crate::fares::{FareClass, FareTable, PassengerCategories};
use crate::stations::StationDirectory;
use crate::zones::{OdPair, ZoneMap};

use super::error::QueryError;
use super::query::{Destination, FareQuery};
use super::result::{FareOutcome, FareResult, ScheduleRow};

/// A fare class resolved against the loaded tables.
///
/// Built once per query, before any zone is priced, so each regime builds
/// its own lookup key.
#[derive(Debug, Clone, Copy)]
enum Pricer<'a> {
    Standard {
        mode: Mode,
        payment_means: &'a PaymentMeans,
        ticket_type: &'a TicketType,
    },
    Period {
        ticket_type: &'a TicketType,
    },
    Band {
        eligible: &'a BTreeSet<TicketType>,
    },
}

impl Pricer<'_> {
    fn price(&self, fares: &FareTable, zone: &ZoneCode) -> FareOutcome {
        let priced = |price| FareOutcome::Priced {
            zone: zone.clone(),
            price,
            alternatives: Vec::new(),
        };
        let gap = || FareOutcome::PricingGap { zone: zone.clone() };

        match *self {
            Pricer::Standard {
                mode,
                payment_means,
                ticket_type,
            } => fares
                .standard_price(mode, payment_means, ticket_type, zone)
                .map_or_else(|_| gap(), priced),
            Pricer::Period { ticket_type } => fares
                .period_price(ticket_type, zone)
                .map_or_else(|_| gap(), priced),
            Pricer::Band { eligible } => {
                let alternatives = fares.band_options(zone, eligible);
                match alternatives.first() {
                    Some(cheapest) => FareOutcome::Priced {
                        zone: zone.clone(),
                        price: cheapest.price,
                        alternatives,
                    },
                    None => gap(),
                }
            }
        }
    }

    fn schedule(&self, fares: &FareTable) -> Vec<ScheduleRow> {
        let row = |(zone, price): (&ZoneCode, _)| ScheduleRow {
            zone: zone.clone(),
            price,
        };

        match *self {
            Pricer::Standard {
                mode,
                payment_means,
                ticket_type,
            } => fares
                .standard_zones(mode, payment_means, ticket_type)
                .into_iter()
                .map(row)
                .collect(),
            Pricer::Period { ticket_type } => {
                fares.period_zones(ticket_type).into_iter().map(row).collect()
            }
            Pricer::Band { eligible } => fares
                .bands()
                .filter_map(|band| {
                    fares.band_options(band, eligible).first().map(|o| ScheduleRow {
                        zone: band.clone(),
                        price: o.price,
                    })
                })
                .collect(),
        }
    }
}

/// Resolves fare queries against read-only tables.
///
/// The resolver holds no per-query state, so one instance can serve many
/// concurrent requests behind an `Arc`.
#[derive(Debug, Clone)]
pub struct FareResolver {
    stations: StationDirectory,
    zones: ZoneMap,
    fares: FareTable,
    categories: PassengerCategories,
}

impl FareResolver {
    pub fn new(
        stations: StationDirectory,
        zones: ZoneMap,
        fares: FareTable,
        categories: PassengerCategories,
    ) -> Self {
        Self {
            stations,
            zones,
            fares,
            categories,
        }
    }

    pub fn stations(&self) -> &StationDirectory {
        &self.stations
    }

    pub fn zones(&self) -> &ZoneMap {
        &self.zones
    }

    pub fn fares(&self) -> &FareTable {
        &self.fares
    }

    pub fn categories(&self) -> &PassengerCategories {
        &self.categories
    }

    /// Resolve a query.
    ///
    /// A single destination yields one result, except when several bus
    /// routes serve the journey with different fare bands: then there is
    /// one result per band, each listing its routes. Destination `Any`
    /// behaves as [`resolve_all`](Self::resolve_all).
    pub fn resolve(&self, query: &FareQuery) -> Result<Vec<FareResult>, QueryError> {
        let destination = match &query.destination {
            Destination::Any => {
                return self.resolve_all(
                    query.mode,
                    &query.origin,
                    &query.fare_class,
                    query.route.as_ref(),
                );
            }
            Destination::Station(station) => station,
        };

        self.check_station(query.mode, &query.origin)?;
        self.check_station(query.mode, destination)?;
        let pricer = self.pricer(query.mode, &query.fare_class)?;

        debug!(
            mode = %query.mode,
            origin = %query.origin,
            destination = %destination,
            fare_class = %query.fare_class,
            "resolving fare"
        );

        let pairs = self.zones.lookup(
            query.mode,
            &query.origin,
            destination,
            query.route.as_ref(),
        );
        Ok(self.price_pairs(
            &query.origin,
            destination,
            query.route.as_ref(),
            &pairs,
            &pricer,
        ))
    }

    /// Resolve fares to every destination reachable from an origin.
    ///
    /// Destinations are in name order. Not-found entries are included so
    /// callers can filter as they need.
    pub fn resolve_all(
        &self,
        mode: Mode,
        origin: &StationId,
        fare_class: &FareClass,
        route: Option<&RouteId>,
    ) -> Result<Vec<FareResult>, QueryError> {
        self.check_station(mode, origin)?;
        let pricer = self.pricer(mode, fare_class)?;

        let fanout = self.zones.destinations_from(mode, origin, route);
        debug!(
            %mode,
            %origin,
            %fare_class,
            destinations = fanout.len(),
            "resolving fares to all destinations"
        );

        Ok(fanout
            .iter()
            .flat_map(|(destination, pairs)| {
                self.price_pairs(origin, destination, route, pairs, &pricer)
            })
            .collect())
    }

    /// Every zone's price for a fare class, cheapest first, ties by zone.
    ///
    /// For a passenger category each band shows its cheapest eligible
    /// option.
    pub fn schedule(
        &self,
        mode: Mode,
        fare_class: &FareClass,
    ) -> Result<Vec<ScheduleRow>, QueryError> {
        let pricer = self.pricer(mode, fare_class)?;
        let mut rows = pricer.schedule(&self.fares);
        rows.sort_by(|a, b| a.price.cmp(&b.price).then_with(|| a.zone.cmp(&b.zone)));
        Ok(rows)
    }

    fn check_station(&self, mode: Mode, station: &StationId) -> Result<(), QueryError> {
        if self.stations.contains(mode, station) {
            Ok(())
        } else {
            Err(QueryError::UnknownStation {
                mode,
                station: station.clone(),
            })
        }
    }

    fn pricer<'a>(&'a self, mode: Mode, fare_class: &'a FareClass) -> Result<Pricer<'a>, QueryError> {
        if !fare_class.supports(mode) {
            return Err(QueryError::UnsupportedFareClass {
                mode,
                fare_class: fare_class.clone(),
            });
        }

        Ok(match fare_class {
            FareClass::Standard {
                payment_means,
                ticket_type,
            } => Pricer::Standard {
                mode,
                payment_means,
                ticket_type,
            },
            FareClass::Period { ticket_type } => Pricer::Period { ticket_type },
            FareClass::Passenger { category } => {
                let eligible = self
                    .categories
                    .eligible(category)
                    .ok_or_else(|| QueryError::UnknownPassengerCategory(category.clone()))?;
                Pricer::Band { eligible }
            }
        })
    }

    /// Price the records for one destination.
    ///
    /// Routes that agree on a zone share one result; routes with different
    /// zones get one result each, in zone order.
    fn price_pairs(
        &self,
        origin: &StationId,
        destination: &StationId,
        route: Option<&RouteId>,
        pairs: &[&OdPair],
        pricer: &Pricer<'_>,
    ) -> Vec<FareResult> {
        let same_station = origin == destination;
        if same_station {
            warn!(station = %destination, "origin and destination are the same station");
        }

        if pairs.is_empty() {
            return vec![FareResult {
                origin: origin.clone(),
                destination: destination.clone(),
                routes: route.cloned().into_iter().collect(),
                same_station,
                outcome: FareOutcome::Unreachable,
            }];
        }

        let mut by_zone: BTreeMap<&ZoneCode, Vec<RouteId>> = BTreeMap::new();
        for pair in pairs {
            by_zone
                .entry(&pair.zone)
                .or_default()
                .extend(pair.route.iter().cloned());
        }

        by_zone
            .into_iter()
            .map(|(zone, routes)| FareResult {
                origin: origin.clone(),
                destination: destination.clone(),
                routes,
                same_station,
                outcome: pricer.price(&self.fares, zone),
            })
            .collect()
    }
}
