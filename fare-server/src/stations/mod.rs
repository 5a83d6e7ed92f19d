//! Station name → coordinate lookup.
//!
//! Coordinates are only needed to place results on a map; fare resolution
//! uses the directory to check that a queried station exists.

mod directory;
mod error;

pub use directory::StationDirectory;
pub use error::StationError;
