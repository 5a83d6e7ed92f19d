//! Query rejection errors.

use crate::domain::{Mode, PassengerCategory, StationId};
use crate::fares::FareClass;

/// Reasons a fare query is rejected outright.
///
/// Missing routes and missing prices are not errors: they come back as
/// [`FareOutcome::Unreachable`](super::FareOutcome::Unreachable) and
/// [`FareOutcome::PricingGap`](super::FareOutcome::PricingGap) results.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    /// Origin or destination is not a station of the mode's network
    #[error("unknown {mode} station: {station}")]
    UnknownStation { mode: Mode, station: StationId },

    /// The mode has no price table for the fare class
    #[error("{mode} has no fares for {fare_class}")]
    UnsupportedFareClass { mode: Mode, fare_class: FareClass },

    /// The passenger category has no eligible ticket types
    #[error("unknown passenger category: {0}")]
    UnknownPassengerCategory(PassengerCategory),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TicketType;

    #[test]
    fn error_display() {
        let err = QueryError::UnknownStation {
            mode: Mode::Rail,
            station: StationId::parse("Atlantis").unwrap(),
        };
        assert_eq!(err.to_string(), "unknown rail station: Atlantis");

        let err = QueryError::UnsupportedFareClass {
            mode: Mode::Bus,
            fare_class: FareClass::period(TicketType::parse("Annual").unwrap()),
        };
        assert_eq!(err.to_string(), "bus has no fares for Annual period pass");

        let err = QueryError::UnknownPassengerCategory(PassengerCategory::parse("Senior").unwrap());
        assert_eq!(err.to_string(), "unknown passenger category: Senior");
    }
}
