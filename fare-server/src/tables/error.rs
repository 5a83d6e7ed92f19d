//! Table loading error types.

use std::path::PathBuf;

use crate::domain::{Mode, ZoneCode};
use crate::fares::DuplicateFareDefinition;
use crate::stations::StationError;
use crate::zones::DuplicateOdPair;

/// Errors that abort loading the fare tables.
///
/// Row-level errors carry the file and 1-based line (the header is line 1).
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// File could not be opened or a row could not be read as CSV
    #[error("failed to read {}: {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// A field failed validation
    #[error("{}:{line}: {message}", .path.display())]
    InvalidRow {
        path: PathBuf,
        line: u64,
        message: String,
    },

    /// Two rows give the same fare different prices
    #[error("{}:{line}: {source}", .path.display())]
    DuplicateFareDefinition {
        path: PathBuf,
        line: u64,
        #[source]
        source: DuplicateFareDefinition,
    },

    /// Two rows give the same OD pair different zones
    #[error("{}:{line}: {source}", .path.display())]
    DuplicateOdPair {
        path: PathBuf,
        line: u64,
        #[source]
        source: DuplicateOdPair,
    },

    /// A station is listed twice
    #[error("{}:{line}: {source}", .path.display())]
    DuplicateStation {
        path: PathBuf,
        line: u64,
        #[source]
        source: StationError,
    },

    /// OD pairs use zones that no fare table prices
    #[error("{mode} OD pairs use zones with no fares: {}", zone_list(.zones))]
    UnknownZone { mode: Mode, zones: Vec<ZoneCode> },
}

fn zone_list(zones: &[ZoneCode]) -> String {
    zones
        .iter()
        .map(ZoneCode::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}
