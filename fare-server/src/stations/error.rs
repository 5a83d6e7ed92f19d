//! Station directory error types.

use crate::domain::{Mode, StationId};

/// Errors from building or querying the station directory.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StationError {
    /// The station is not part of the mode's network
    #[error("unknown {mode} station: {station}")]
    UnknownStation { mode: Mode, station: StationId },

    /// The same station name was listed twice for one mode
    #[error("duplicate {mode} station: {station}")]
    DuplicateStation { mode: Mode, station: StationId },
}
