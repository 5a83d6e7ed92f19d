//! Domain types for the fare lookup server.
//!
//! All types enforce their invariants at construction time, so tables and
//! queries built from them can trust their validity. Zone codes, prices and
//! modes are validated when tables are loaded rather than when a result is
//! rendered.

mod label;
mod mode;
mod price;
mod station;
mod zone;

pub use label::{InvalidLabel, PassengerCategory, PaymentMeans, RouteId, TicketType};
pub use mode::{InvalidMode, Mode};
pub use price::{InvalidPrice, Price};
pub use station::{Coordinate, InvalidCoordinate, InvalidStationId, StationId};
pub use zone::{InvalidZone, ZoneCode};
