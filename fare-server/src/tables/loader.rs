//! CSV readers for each table.

use std::fmt::Display;
use std::path::Path;

use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::domain::{
    Coordinate, Mode, PassengerCategory, PaymentMeans, Price, RouteId, StationId, TicketType,
    ZoneCode,
};
use crate::fares::{FareTable, PassengerCategories};
use crate::stations::StationDirectory;
use crate::zones::{OdPair, ZoneMap};

use super::error::LoadError;
use super::rows::{
    CategoryRow, FareBandRow, OdPairRow, PeriodFareRow, StandardFareRow, StationRow,
};

/// Row counts from one table: rows added and identical duplicates skipped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadStats {
    pub added: usize,
    pub duplicates: usize,
}

impl LoadStats {
    fn record(&mut self, added: bool) {
        if added {
            self.added += 1;
        } else {
            self.duplicates += 1;
        }
    }
}

/// Read every row of a CSV file, paired with its 1-based line number.
fn read_rows<R: DeserializeOwned>(path: &Path) -> Result<Vec<(u64, R)>, LoadError> {
    let csv_error = |source| LoadError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_path(path)
        .map_err(csv_error)?;

    let headers = reader.headers().map_err(csv_error)?.clone();

    // Blank lines and quoted newlines mean records and lines diverge
    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.map_err(csv_error)?;
        let line = record.position().map_or(0, |p| p.line());
        let row = record.deserialize::<R>(Some(&headers)).map_err(csv_error)?;
        rows.push((line, row));
    }
    Ok(rows)
}

/// Build a row-validation error at a line.
fn invalid(path: &Path, line: u64) -> impl Fn(&dyn Display) -> LoadError + '_ {
    move |e: &dyn Display| LoadError::InvalidRow {
        path: path.to_path_buf(),
        line,
        message: e.to_string(),
    }
}

/// Empty optional cells count as absent.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Load a station coordinate table into a mode's network.
pub fn load_stations(
    path: &Path,
    mode: Mode,
    directory: &mut StationDirectory,
) -> Result<LoadStats, LoadError> {
    let mut stats = LoadStats::default();

    for (line, row) in read_rows::<StationRow>(path)? {
        let err = invalid(path, line);
        let station = StationId::parse(&row.name).map_err(|e| err(&e))?;
        let coordinate = Coordinate::new(row.latitude, row.longitude).map_err(|e| err(&e))?;

        directory
            .insert(mode, station, coordinate)
            .map_err(|source| LoadError::DuplicateStation {
                path: path.to_path_buf(),
                line,
                source,
            })?;
        stats.record(true);
    }

    Ok(stats)
}

/// Load an OD-pair table into a mode's zone map.
pub fn load_od_pairs(path: &Path, mode: Mode, zones: &mut ZoneMap) -> Result<LoadStats, LoadError> {
    let mut stats = LoadStats::default();

    for (line, row) in read_rows::<OdPairRow>(path)? {
        let err = invalid(path, line);
        let origin = StationId::parse(&row.origin).map_err(|e| err(&e))?;
        let destination = StationId::parse(&row.destination).map_err(|e| err(&e))?;
        let route = non_empty(row.route)
            .map(|r| RouteId::parse(&r))
            .transpose()
            .map_err(|e| err(&e))?;
        let zone = ZoneCode::parse(&row.zone).map_err(|e| err(&e))?;

        let pair = OdPair::new(origin, destination, route, zone);
        let added = zones
            .insert(mode, pair)
            .map_err(|source| LoadError::DuplicateOdPair {
                path: path.to_path_buf(),
                line,
                source,
            })?;
        if !added {
            warn!(path = %path.display(), line, "duplicate OD pair row ignored");
        }
        stats.record(added);
    }

    Ok(stats)
}

/// Load a standard fare table for a mode.
pub fn load_standard_fares(
    path: &Path,
    mode: Mode,
    fares: &mut FareTable,
) -> Result<LoadStats, LoadError> {
    let mut stats = LoadStats::default();

    for (line, row) in read_rows::<StandardFareRow>(path)? {
        let err = invalid(path, line);
        let payment_means = PaymentMeans::parse(&row.payment_means).map_err(|e| err(&e))?;
        let ticket_type = TicketType::parse(&row.ticket_type).map_err(|e| err(&e))?;
        let zone = ZoneCode::parse(&row.zone).map_err(|e| err(&e))?;
        let price = Price::parse(&row.fare).map_err(|e| err(&e))?;

        let added = fares
            .insert_standard(mode, payment_means, ticket_type, zone, price)
            .map_err(|source| LoadError::DuplicateFareDefinition {
                path: path.to_path_buf(),
                line,
                source,
            })?;
        if !added {
            warn!(path = %path.display(), line, "duplicate fare row ignored");
        }
        stats.record(added);
    }

    Ok(stats)
}

/// Load a rail period-pass table.
pub fn load_period_fares(path: &Path, fares: &mut FareTable) -> Result<LoadStats, LoadError> {
    let mut stats = LoadStats::default();

    for (line, row) in read_rows::<PeriodFareRow>(path)? {
        let err = invalid(path, line);
        let ticket_type = TicketType::parse(&row.ticket_type).map_err(|e| err(&e))?;
        let zone = ZoneCode::parse(&row.zone).map_err(|e| err(&e))?;
        let price = Price::parse(&row.fare).map_err(|e| err(&e))?;

        let added = fares
            .insert_period(ticket_type, zone, price)
            .map_err(|source| LoadError::DuplicateFareDefinition {
                path: path.to_path_buf(),
                line,
                source,
            })?;
        if !added {
            warn!(path = %path.display(), line, "duplicate period fare row ignored");
        }
        stats.record(added);
    }

    Ok(stats)
}

/// Load a bus fare-band table.
pub fn load_fare_bands(path: &Path, fares: &mut FareTable) -> Result<LoadStats, LoadError> {
    let mut stats = LoadStats::default();

    for (line, row) in read_rows::<FareBandRow>(path)? {
        let err = invalid(path, line);
        let payment_means = non_empty(row.payment_means)
            .map(|p| PaymentMeans::parse(&p))
            .transpose()
            .map_err(|e| err(&e))?;
        let ticket_type = TicketType::parse(&row.ticket_type).map_err(|e| err(&e))?;
        let band = ZoneCode::parse(&row.band).map_err(|e| err(&e))?;
        let price = Price::parse(&row.fare).map_err(|e| err(&e))?;

        let added = fares
            .insert_band(payment_means, ticket_type, band, price)
            .map_err(|source| LoadError::DuplicateFareDefinition {
                path: path.to_path_buf(),
                line,
                source,
            })?;
        if !added {
            warn!(path = %path.display(), line, "duplicate fare band row ignored");
        }
        stats.record(added);
    }

    Ok(stats)
}

/// Load a passenger category table, replacing the built-in categories.
pub fn load_categories(path: &Path) -> Result<PassengerCategories, LoadError> {
    let mut categories = PassengerCategories::empty();

    for (line, row) in read_rows::<CategoryRow>(path)? {
        let err = invalid(path, line);
        let category = PassengerCategory::parse(&row.category).map_err(|e| err(&e))?;
        let ticket_type = TicketType::parse(&row.ticket_type).map_err(|e| err(&e))?;
        categories.insert(category, ticket_type);
    }

    debug!(path = %path.display(), categories = categories.len(), "loaded passenger categories");
    Ok(categories)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::{TempDir, tempdir};

    fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    fn station(s: &str) -> StationId {
        StationId::parse(s).unwrap()
    }

    fn zone(s: &str) -> ZoneCode {
        ZoneCode::parse(s).unwrap()
    }

    #[test]
    fn stations_with_gtfs_columns() {
        let dir = tempdir().unwrap();
        let path = write(
            &dir,
            "stations.csv",
            "stop_name,stop_lat,stop_lon\nBray,53.2043,-6.1005\nGreystones,53.1441,-6.0612\n",
        );

        let mut directory = StationDirectory::new();
        let stats = load_stations(&path, Mode::Rail, &mut directory).unwrap();
        assert_eq!(stats.added, 2);
        assert_eq!(
            directory.coordinate_of(Mode::Rail, &station("Bray")),
            Ok(Coordinate::new(53.2043, -6.1005).unwrap())
        );
    }

    #[test]
    fn duplicate_station_reports_line() {
        let dir = tempdir().unwrap();
        let path = write(
            &dir,
            "stations.csv",
            "name,latitude,longitude\nBray,53.2,-6.1\nBray,53.3,-6.1\n",
        );

        let err = load_stations(&path, Mode::Rail, &mut StationDirectory::new()).unwrap_err();
        assert!(matches!(err, LoadError::DuplicateStation { line: 3, .. }));
    }

    #[test]
    fn invalid_coordinate_rejected() {
        let dir = tempdir().unwrap();
        let path = write(&dir, "stations.csv", "name,latitude,longitude\nBray,153.2,-6.1\n");

        let err = load_stations(&path, Mode::Rail, &mut StationDirectory::new()).unwrap_err();
        assert_eq!(
            err.to_string(),
            format!("{}:2: latitude 153.2 out of range [-90, 90]", path.display())
        );
    }

    #[test]
    fn od_pairs_accept_value_column() {
        let dir = tempdir().unwrap();
        let path = write(
            &dir,
            "od.csv",
            "Origin,Destination,Value\nGreystones,Bray,D1\nGreystones,Howth,D11\nGreystones,Bray,D1\n",
        );

        let mut zones = ZoneMap::new();
        let stats = load_od_pairs(&path, Mode::Rail, &mut zones).unwrap();
        assert_eq!(stats, LoadStats { added: 2, duplicates: 1 });
        assert_eq!(
            zones.zone_of(Mode::Rail, &station("Greystones"), &station("Bray"), None),
            Ok(zone("D1"))
        );
    }

    #[test]
    fn bus_od_pairs_with_routes() {
        let dir = tempdir().unwrap();
        let path = write(
            &dir,
            "bus_od.csv",
            "Origin,Destination,Route,Fare Band\nBray,Dublin,145,3\nBray,Dublin,84X,4\n",
        );

        let mut zones = ZoneMap::new();
        load_od_pairs(&path, Mode::Bus, &mut zones).unwrap();
        let pairs = zones.lookup(Mode::Bus, &station("Bray"), &station("Dublin"), None);
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0].route, Some(RouteId::parse("145").unwrap()));
    }

    #[test]
    fn conflicting_od_pair_aborts() {
        let dir = tempdir().unwrap();
        let path = write(
            &dir,
            "od.csv",
            "Origin,Destination,FareZone\nGreystones,Bray,D1\nGreystones,Bray,D2\n",
        );

        let err = load_od_pairs(&path, Mode::Rail, &mut ZoneMap::new()).unwrap_err();
        assert!(matches!(err, LoadError::DuplicateOdPair { line: 3, .. }));
    }

    #[test]
    fn invalid_zone_rejected() {
        let dir = tempdir().unwrap();
        let path = write(&dir, "od.csv", "Origin,Destination,FareZone\nGreystones,Bray,d1\n");

        let err = load_od_pairs(&path, Mode::Rail, &mut ZoneMap::new()).unwrap_err();
        assert!(matches!(err, LoadError::InvalidRow { line: 2, .. }));
    }

    #[test]
    fn standard_fares_loaded_exactly() {
        let dir = tempdir().unwrap();
        let path = write(
            &dir,
            "fares.csv",
            "PaymentMeans,TicketType,FareZone,Fare\nLeap,Adult Single,D1,3.85\nCash,Adult Single,D1,4.50\n",
        );

        let mut fares = FareTable::new();
        load_standard_fares(&path, Mode::Rail, &mut fares).unwrap();
        assert_eq!(
            fares.standard_price(
                Mode::Rail,
                &PaymentMeans::parse("Leap").unwrap(),
                &TicketType::parse("Adult Single").unwrap(),
                &zone("D1"),
            ),
            Ok(Price::parse("3.85").unwrap())
        );
    }

    #[test]
    fn conflicting_fare_aborts_with_key() {
        let dir = tempdir().unwrap();
        let path = write(
            &dir,
            "fares.csv",
            "PaymentMeans,TicketType,FareZone,Fare\nLeap,Adult Single,D1,3.85\nLeap,Adult Single,D1,3.95\n",
        );

        let err = load_standard_fares(&path, Mode::Rail, &mut FareTable::new()).unwrap_err();
        assert_eq!(
            err.to_string(),
            format!(
                "{}:3: duplicate fare definition for rail/Leap/Adult Single/D1: 3.85 vs 3.95",
                path.display()
            )
        );
    }

    #[test]
    fn invalid_price_rejected() {
        let dir = tempdir().unwrap();
        let path = write(
            &dir,
            "fares.csv",
            "PaymentMeans,TicketType,FareZone,Fare\nLeap,Adult Single,D1,free\n",
        );

        let err = load_standard_fares(&path, Mode::Rail, &mut FareTable::new()).unwrap_err();
        assert!(matches!(err, LoadError::InvalidRow { line: 2, .. }));
    }

    #[test]
    fn line_numbers_follow_physical_lines() {
        let dir = tempdir().unwrap();
        let path = write(
            &dir,
            "fares.csv",
            "PaymentMeans,TicketType,FareZone,Fare\n\
             \"Leap\nCard\",Adult Single,D1,3.85\n\
             \n\
             Leap,Adult Single,D2,free\n",
        );

        let err = load_standard_fares(&path, Mode::Rail, &mut FareTable::new()).unwrap_err();
        assert!(matches!(err, LoadError::InvalidRow { line: 5, .. }), "{err}");
    }

    #[test]
    fn period_fares_use_zone_column() {
        let dir = tempdir().unwrap();
        let path = write(&dir, "period.csv", "TicketType,Zone,Fare\nAnnual,D1,1140\n");

        let mut fares = FareTable::new();
        load_period_fares(&path, &mut fares).unwrap();
        assert_eq!(
            fares.period_price(&TicketType::parse("Annual").unwrap(), &zone("D1")),
            Ok(Price::parse("1140").unwrap())
        );
    }

    #[test]
    fn fare_bands_with_optional_payment_means() {
        let dir = tempdir().unwrap();
        let path = write(
            &dir,
            "bands.csv",
            "TicketType,Fare Band,Fare,PaymentMeans\nAdult,2,2.00,Leap\nChild,2,0.80,\n",
        );

        let mut fares = FareTable::new();
        let stats = load_fare_bands(&path, &mut fares).unwrap();
        assert_eq!(stats.added, 2);

        let eligible = [TicketType::parse("Child").unwrap()].into_iter().collect();
        let options = fares.band_options(&zone("2"), &eligible);
        assert_eq!(options.len(), 1);
        assert_eq!(options[0].payment_means, None);
    }

    #[test]
    fn fare_bands_without_payment_column() {
        let dir = tempdir().unwrap();
        let path = write(&dir, "bands.csv", "TicketType,Fare Band,Fare\nAdult,1,1.70\n");

        let mut fares = FareTable::new();
        load_fare_bands(&path, &mut fares).unwrap();
        assert_eq!(fares.len(), 1);
    }

    #[test]
    fn categories_replace_defaults() {
        let dir = tempdir().unwrap();
        let path = write(
            &dir,
            "categories.csv",
            "Category,TicketType\nStudent,Student\nStudent,Adult\n",
        );

        let categories = load_categories(&path).unwrap();
        assert_eq!(categories.len(), 1);
        assert_eq!(
            categories
                .eligible(&PassengerCategory::parse("Student").unwrap())
                .map(|s| s.len()),
            Some(2)
        );
    }

    #[test]
    fn missing_file_is_csv_error() {
        let err = load_period_fares(Path::new("/nonexistent/period.csv"), &mut FareTable::new())
            .unwrap_err();
        assert!(matches!(err, LoadError::Csv { .. }));
    }

    #[test]
    fn missing_column_is_csv_error() {
        let dir = tempdir().unwrap();
        let path = write(&dir, "fares.csv", "PaymentMeans,TicketType,Fare\nLeap,Adult Single,3.85\n");

        let err = load_standard_fares(&path, Mode::Rail, &mut FareTable::new()).unwrap_err();
        assert!(matches!(err, LoadError::Csv { .. }));
    }
}
