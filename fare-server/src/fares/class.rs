//! Fare classes: which price table a query reads.

use std::fmt;

use crate::domain::{Mode, PassengerCategory, PaymentMeans, TicketType};

/// The payment dimension of a fare query.
///
/// Each variant selects a different price table with a different key shape,
/// so callers branch on the class before building a lookup key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FareClass {
    /// Per-trip fares keyed by (payment means, ticket type, zone).
    Standard {
        payment_means: PaymentMeans,
        ticket_type: TicketType,
    },

    /// Rail period passes keyed by (ticket type, zone).
    Period { ticket_type: TicketType },

    /// Bus fares for a passenger category, keyed by fare band over every
    /// ticket type the category may use.
    Passenger { category: PassengerCategory },
}

impl FareClass {
    pub fn standard(payment_means: PaymentMeans, ticket_type: TicketType) -> Self {
        FareClass::Standard {
            payment_means,
            ticket_type,
        }
    }

    pub fn period(ticket_type: TicketType) -> Self {
        FareClass::Period { ticket_type }
    }

    pub fn passenger(category: PassengerCategory) -> Self {
        FareClass::Passenger { category }
    }

    /// Whether a mode has a price table for this class.
    ///
    /// Period passes are rail-only and passenger-category fare bands are
    /// bus-only; standard fares exist for both.
    pub fn supports(&self, mode: Mode) -> bool {
        match self {
            FareClass::Standard { .. } => true,
            FareClass::Period { .. } => mode == Mode::Rail,
            FareClass::Passenger { .. } => mode == Mode::Bus,
        }
    }
}

impl fmt::Display for FareClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FareClass::Standard {
                payment_means,
                ticket_type,
            } => write!(f, "{payment_means} {ticket_type}"),
            FareClass::Period { ticket_type } => write!(f, "{ticket_type} period pass"),
            FareClass::Passenger { category } => write!(f, "{category} passenger"),
        }
    }
}
