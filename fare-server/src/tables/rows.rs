//! CSV row shapes.
//!
//! Column names follow the source spreadsheets. The zone column is called
//! `FareZone` in standard fare and OD tables (`Value` in older OD exports),
//! `Zone` in period tables and `Fare Band` in bus tables; aliases accept
//! each spelling.

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub(super) struct StationRow {
    #[serde(alias = "stop_name")]
    pub name: String,
    #[serde(alias = "stop_lat")]
    pub latitude: f64,
    #[serde(alias = "stop_lon")]
    pub longitude: f64,
}

#[derive(Debug, Deserialize)]
pub(super) struct OdPairRow {
    #[serde(rename = "Origin")]
    pub origin: String,
    #[serde(rename = "Destination")]
    pub destination: String,
    #[serde(rename = "Route", default)]
    pub route: Option<String>,
    #[serde(rename = "FareZone", alias = "Value", alias = "Fare Band")]
    pub zone: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct StandardFareRow {
    #[serde(rename = "PaymentMeans")]
    pub payment_means: String,
    #[serde(rename = "TicketType")]
    pub ticket_type: String,
    #[serde(rename = "FareZone", alias = "Zone")]
    pub zone: String,
    #[serde(rename = "Fare")]
    pub fare: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct PeriodFareRow {
    #[serde(rename = "TicketType")]
    pub ticket_type: String,
    #[serde(rename = "Zone", alias = "FareZone")]
    pub zone: String,
    #[serde(rename = "Fare")]
    pub fare: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct FareBandRow {
    #[serde(rename = "PaymentMeans", default)]
    pub payment_means: Option<String>,
    #[serde(rename = "TicketType")]
    pub ticket_type: String,
    #[serde(rename = "Fare Band", alias = "FareBand", alias = "FareZone")]
    pub band: String,
    #[serde(rename = "Fare")]
    pub fare: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct CategoryRow {
    #[serde(rename = "Category")]
    pub category: String,
    #[serde(rename = "TicketType")]
    pub ticket_type: String,
}
