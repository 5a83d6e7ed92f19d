//! Fare resolution.
//!
//! Answers "what does this journey cost on this ticket?" by joining the
//! zone map to the fare table:
//!
//! 1. the origin (and an explicit destination) must be known stations
//! 2. the fare class picks the price table and builds its key shape
//! 3. the zone map gives the zone for each destination and route
//! 4. the price table prices each zone, or reports a pricing gap
//!
//! Unreachable journeys and pricing gaps come back as typed results rather
//! than errors, so every result can be rendered.

mod error;
mod query;
mod resolve;
mod result;


pub use error::QueryError;
pub use query::{Destination, FareQuery};
pub use resolve::FareResolver;
pub use result::{FareOutcome, FareResult, FareStatus, ScheduleRow};
