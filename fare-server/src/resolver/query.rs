//! Fare query values.

use crate::domain::{Mode, RouteId, StationId};
use crate::fares::FareClass;

/// Where a query is going.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    /// A single destination station.
    Station(StationId),
    /// Every destination reachable from the origin.
    Any,
}

impl Destination {
    /// The selector entry meaning every destination.
    pub const ANY: &'static str = "Any";

    /// Parse a destination, treating `"Any"` as every destination.
    pub fn parse(s: &str) -> Option<Self> {
        if s == Self::ANY {
            return Some(Destination::Any);
        }
        StationId::parse(s).ok().map(Destination::Station)
    }
}

/// One user fare lookup.
///
/// Queries are plain values: the resolver keeps no selection state between
/// them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FareQuery {
    pub mode: Mode,
    pub origin: StationId,
    pub destination: Destination,
    pub fare_class: FareClass,
    /// Restrict bus lookups to one route. Without it every route serving
    /// the origin is considered.
    pub route: Option<RouteId>,
}

impl FareQuery {
    /// Create a query over all routes.
    pub fn new(
        mode: Mode,
        origin: StationId,
        destination: Destination,
        fare_class: FareClass,
    ) -> Self {
        Self {
            mode,
            origin,
            destination,
            fare_class,
            route: None,
        }
    }

    /// Restrict the query to one route.
    pub fn with_route(mut self, route: RouteId) -> Self {
        self.route = Some(route);
        self
    }
}
