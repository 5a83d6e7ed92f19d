//! Fare price tables.
//!
//! Three regimes with different key shapes:
//!
//! - standard fares: (mode, payment means, ticket type, zone)
//! - rail period passes: (ticket type, zone), no payment means
//! - bus fare bands: (fare band, ticket type, payment means), queried by
//!   passenger category over every eligible ticket type

mod categories;
mod class;
mod table;

pub use categories::PassengerCategories;
pub use class::FareClass;
pub use table::{DuplicateFareDefinition, FareKey, FareOption, FareTable, PricingGap};
