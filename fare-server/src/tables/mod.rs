//! Loading the fare tables from CSV files.
//!
//! Every table is read once at startup into the in-memory lookups used by
//! [`FareResolver`]. Any malformed or conflicting row aborts the load.

mod error;
mod loader;
mod rows;

use std::path::Path;

use tracing::{info, warn};

use crate::config::{FareDataConfig, ZonePolicy};
use crate::domain::{Mode, ZoneCode};
use crate::fares::{FareTable, PassengerCategories};
use crate::resolver::FareResolver;
use crate::stations::StationDirectory;
use crate::zones::ZoneMap;

pub use error::LoadError;
pub use loader::{
    LoadStats, load_categories, load_fare_bands, load_od_pairs, load_period_fares,
    load_stations, load_standard_fares,
};

/// Load every configured table and build a resolver.
pub fn load(config: &FareDataConfig) -> Result<FareResolver, LoadError> {
    let mut stations = StationDirectory::new();
    let mut zones = ZoneMap::new();
    let mut fares = FareTable::new();

    let summary = |table: &str, path: &Path, stats: LoadStats| {
        info!(
            table,
            path = %path.display(),
            rows = stats.added,
            duplicates = stats.duplicates,
            "loaded table"
        );
    };

    summary(
        "rail stations",
        &config.rail_stations,
        load_stations(&config.rail_stations, Mode::Rail, &mut stations)?,
    );
    summary(
        "rail OD pairs",
        &config.rail_od_pairs,
        load_od_pairs(&config.rail_od_pairs, Mode::Rail, &mut zones)?,
    );
    summary(
        "rail fares",
        &config.rail_fares,
        load_standard_fares(&config.rail_fares, Mode::Rail, &mut fares)?,
    );
    if let Some(path) = &config.rail_period_fares {
        summary("rail period fares", path, load_period_fares(path, &mut fares)?);
    }

    if let Some(path) = &config.bus_stations {
        summary("bus stations", path, load_stations(path, Mode::Bus, &mut stations)?);
    }
    if let Some(path) = &config.bus_od_pairs {
        summary("bus OD pairs", path, load_od_pairs(path, Mode::Bus, &mut zones)?);
    }
    if let Some(path) = &config.bus_fares {
        summary(
            "bus fares",
            path,
            load_standard_fares(path, Mode::Bus, &mut fares)?,
        );
    }
    if let Some(path) = &config.bus_fare_bands {
        summary("bus fare bands", path, load_fare_bands(path, &mut fares)?);
    }

    let categories = match &config.passenger_categories {
        Some(path) => load_categories(path)?,
        None => PassengerCategories::default(),
    };

    for mode in Mode::ALL {
        check_zone_coverage(mode, &zones, &fares, config.zone_policy)?;
    }

    info!(
        stations = stations.len(),
        od_pairs = zones.len(),
        fares = fares.len(),
        categories = categories.len(),
        "fare tables ready"
    );

    Ok(FareResolver::new(stations, zones, fares, categories))
}

/// Check that every zone a mode's OD pairs use is priced by some table.
///
/// Under [`ZonePolicy::Lenient`] unpriced zones are only logged; queries
/// reaching them resolve to pricing gaps.
pub fn check_zone_coverage(
    mode: Mode,
    zones: &ZoneMap,
    fares: &FareTable,
    policy: ZonePolicy,
) -> Result<(), LoadError> {
    let priced = fares.priced_zones(mode);
    let unpriced: Vec<ZoneCode> = zones
        .zones(mode)
        .into_iter()
        .filter(|zone| !priced.contains(zone))
        .cloned()
        .collect();

    if unpriced.is_empty() {
        return Ok(());
    }

    let err = LoadError::UnknownZone {
        mode,
        zones: unpriced,
    };
    match policy {
        ZonePolicy::Strict => Err(err),
        ZonePolicy::Lenient => {
            warn!("{err}");
            Ok(())
        }
    }
}
