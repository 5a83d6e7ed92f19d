//! Server and data configuration.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

/// Default listen address.
const DEFAULT_BIND_ADDR: ([u8; 4], u16) = ([127, 0, 0, 1], 3000);

/// Default data directory.
const DEFAULT_DATA_DIR: &str = "data";

/// Conventional table file names inside the data directory.
pub const RAIL_STATIONS_FILE: &str = "rail_stations.csv";
pub const RAIL_OD_PAIRS_FILE: &str = "rail_od_pairs.csv";
pub const RAIL_FARES_FILE: &str = "rail_fares.csv";
pub const RAIL_PERIOD_FARES_FILE: &str = "rail_period_fares.csv";
pub const BUS_STATIONS_FILE: &str = "bus_stations.csv";
pub const BUS_OD_PAIRS_FILE: &str = "bus_od_pairs.csv";
pub const BUS_FARES_FILE: &str = "bus_fares.csv";
pub const BUS_FARE_BANDS_FILE: &str = "bus_fare_bands.csv";
pub const PASSENGER_CATEGORIES_FILE: &str = "passenger_categories.csv";

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid bind address {0:?}")]
    InvalidBindAddr(String),

    #[error("invalid zone policy {0:?}: expected \"strict\" or \"lenient\"")]
    InvalidZonePolicy(String),
}

/// What to do when an OD pair uses a zone that no fare table prices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ZonePolicy {
    /// Refuse to start.
    #[default]
    Strict,
    /// Log a warning; such journeys resolve to pricing gaps.
    Lenient,
}

impl ZonePolicy {
    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        if s.eq_ignore_ascii_case("strict") {
            Ok(ZonePolicy::Strict)
        } else if s.eq_ignore_ascii_case("lenient") {
            Ok(ZonePolicy::Lenient)
        } else {
            Err(ConfigError::InvalidZonePolicy(s.to_string()))
        }
    }
}

/// Locations of the fare tables.
///
/// The rail tables are required. Every other table is optional: without bus
/// tables the bus network is empty, and without a categories table the
/// built-in passenger categories apply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FareDataConfig {
    pub rail_stations: PathBuf,
    pub rail_od_pairs: PathBuf,
    pub rail_fares: PathBuf,
    pub rail_period_fares: Option<PathBuf>,
    pub bus_stations: Option<PathBuf>,
    pub bus_od_pairs: Option<PathBuf>,
    pub bus_fares: Option<PathBuf>,
    pub bus_fare_bands: Option<PathBuf>,
    pub passenger_categories: Option<PathBuf>,
    pub zone_policy: ZonePolicy,
}

impl FareDataConfig {
    /// Use the conventional file names in a directory.
    ///
    /// Optional tables are only configured if their file exists.
    pub fn from_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        let optional = |name: &str| {
            let path = dir.join(name);
            path.exists().then_some(path)
        };

        Self {
            rail_stations: dir.join(RAIL_STATIONS_FILE),
            rail_od_pairs: dir.join(RAIL_OD_PAIRS_FILE),
            rail_fares: dir.join(RAIL_FARES_FILE),
            rail_period_fares: optional(RAIL_PERIOD_FARES_FILE),
            bus_stations: optional(BUS_STATIONS_FILE),
            bus_od_pairs: optional(BUS_OD_PAIRS_FILE),
            bus_fares: optional(BUS_FARES_FILE),
            bus_fare_bands: optional(BUS_FARE_BANDS_FILE),
            passenger_categories: optional(PASSENGER_CATEGORIES_FILE),
            zone_policy: ZonePolicy::default(),
        }
    }

    /// Set the unknown-zone policy.
    pub fn with_zone_policy(mut self, policy: ZonePolicy) -> Self {
        self.zone_policy = policy;
        self
    }
}

impl Default for FareDataConfig {
    fn default() -> Self {
        Self::from_dir(DEFAULT_DATA_DIR)
    }
}

/// Top-level server configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub data: FareDataConfig,
}

impl ServerConfig {
    pub fn new(bind_addr: SocketAddr, data: FareDataConfig) -> Self {
        Self { bind_addr, data }
    }

    /// Read configuration from the environment.
    ///
    /// - `FARE_DATA_DIR`: table directory (default `data`)
    /// - `FARE_BIND_ADDR`: listen address (default `127.0.0.1:3000`)
    /// - `FARE_ZONE_POLICY`: `strict` or `lenient` (default `strict`)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from any key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let data_dir = lookup("FARE_DATA_DIR").unwrap_or_else(|| DEFAULT_DATA_DIR.to_string());

        let bind_addr = match lookup("FARE_BIND_ADDR") {
            Some(addr) => addr
                .parse()
                .map_err(|_| ConfigError::InvalidBindAddr(addr))?,
            None => SocketAddr::from(DEFAULT_BIND_ADDR),
        };

        let zone_policy = match lookup("FARE_ZONE_POLICY") {
            Some(policy) => ZonePolicy::parse(&policy)?,
            None => ZonePolicy::default(),
        };

        let data = FareDataConfig::from_dir(data_dir).with_zone_policy(zone_policy);
        Ok(Self::new(bind_addr, data))
    }

    /// Set the listen address.
    pub fn with_bind_addr(mut self, addr: SocketAddr) -> Self {
        self.bind_addr = addr;
        self
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::new(SocketAddr::from(DEFAULT_BIND_ADDR), FareDataConfig::default())
    }
}
