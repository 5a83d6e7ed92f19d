//! Fare resolution results.

use std::fmt;

use crate::domain::{Price, RouteId, StationId, ZoneCode};
use crate::fares::FareOption;

/// Coarse outcome of a fare lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FareStatus {
    Priced,
    Unreachable,
    PricingGap,
}

impl FareStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FareStatus::Priced => "priced",
            FareStatus::Unreachable => "unreachable",
            FareStatus::PricingGap => "pricing_gap",
        }
    }
}

impl fmt::Display for FareStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the lookup found for one journey.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FareOutcome {
    /// The journey has a zone and a price.
    ///
    /// For bus passenger queries `price` is the cheapest option and
    /// `alternatives` lists every eligible option, cheapest first. It is
    /// empty for other fare classes.
    Priced {
        zone: ZoneCode,
        price: Price,
        alternatives: Vec<FareOption>,
    },

    /// No OD-pair record links the stations.
    Unreachable,

    /// The journey has a zone but the selected ticket has no price for it.
    PricingGap { zone: ZoneCode },
}

/// The fare for one (destination, zone) answer of a query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FareResult {
    pub origin: StationId,
    pub destination: StationId,
    /// Bus routes giving this outcome, sorted. Empty for rail.
    pub routes: Vec<RouteId>,
    /// Origin and destination are the same station.
    pub same_station: bool,
    pub outcome: FareOutcome,
}

impl FareResult {
    pub fn status(&self) -> FareStatus {
        match self.outcome {
            FareOutcome::Priced { .. } => FareStatus::Priced,
            FareOutcome::Unreachable => FareStatus::Unreachable,
            FareOutcome::PricingGap { .. } => FareStatus::PricingGap,
        }
    }

    pub fn zone(&self) -> Option<&ZoneCode> {
        match &self.outcome {
            FareOutcome::Priced { zone, .. } | FareOutcome::PricingGap { zone } => Some(zone),
            FareOutcome::Unreachable => None,
        }
    }

    pub fn price(&self) -> Option<Price> {
        match &self.outcome {
            FareOutcome::Priced { price, .. } => Some(*price),
            _ => None,
        }
    }

    pub fn alternatives(&self) -> &[FareOption] {
        match &self.outcome {
            FareOutcome::Priced { alternatives, .. } => alternatives,
            _ => &[],
        }
    }

    /// One-line explanation of the result for display.
    pub fn summary(&self) -> String {
        let mut text = String::new();

        if !self.routes.is_empty() {
            let routes: Vec<_> = self.routes.iter().map(RouteId::as_str).collect();
            text.push_str(&format!("Route {}: ", routes.join(", ")));
        }

        match &self.outcome {
            FareOutcome::Priced { zone, price, .. } => {
                text.push_str(&format!(
                    "This journey is in Zone {zone} and will cost {price}."
                ));
            }
            FareOutcome::Unreachable => {
                text.push_str(&format!(
                    "No fare zone is defined from {} to {}.",
                    self.origin, self.destination
                ));
            }
            FareOutcome::PricingGap { zone } => {
                text.push_str(&format!(
                    "This journey is in Zone {zone} but the selected ticket has no price for it."
                ));
            }
        }

        if self.same_station {
            text.push_str(" The selected origin and destination stations are the same.");
        }
        text
    }
}

/// One row of a fare legend: a zone and its price for the selected ticket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleRow {
    pub zone: ZoneCode,
    pub price: Price,
}
