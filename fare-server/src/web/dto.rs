//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::Coordinate;
use crate::fares::FareOption;
use crate::resolver::{FareResult, ScheduleRow};

/// Fare class selection shared by the fare and schedule endpoints.
///
/// `category` selects a bus passenger category, `period` a rail period
/// pass; otherwise `payment_means` and `ticket_type` select a standard
/// fare. Empty values count as absent.
#[derive(Debug, Default, Deserialize)]
pub struct FareClassParams {
    pub payment_means: Option<String>,
    pub ticket_type: Option<String>,
    pub period: Option<String>,
    pub category: Option<String>,
}

/// Request for fares from an origin.
#[derive(Debug, Deserialize)]
pub struct FareRequest {
    /// Origin station name
    pub origin: String,

    /// Destination station name, or `Any`
    pub destination: String,

    /// Optional bus route restriction
    pub route: Option<String>,

    #[serde(flatten)]
    pub class: FareClassParams,
}

/// Request for a fare legend.
#[derive(Debug, Deserialize)]
pub struct ScheduleRequest {
    #[serde(flatten)]
    pub class: FareClassParams,
}

/// Station selector contents.
#[derive(Debug, Serialize)]
pub struct StationsResponse {
    pub mode: String,

    /// Stations with outgoing OD pairs, sorted
    pub origins: Vec<String>,

    /// `Any` followed by every OD destination, sorted
    pub destinations: Vec<String>,
}

/// Ticket types sold through one payment means.
#[derive(Debug, Serialize)]
pub struct PaymentMeansOptions {
    pub payment_means: String,
    pub ticket_types: Vec<String>,
}

/// Ticket types one passenger category may buy.
#[derive(Debug, Serialize)]
pub struct CategoryOptions {
    pub category: String,
    pub ticket_types: Vec<String>,
}

/// Every fare class selectable for a mode.
#[derive(Debug, Serialize)]
pub struct FareOptionsResponse {
    pub mode: String,
    pub payment_means: Vec<PaymentMeansOptions>,

    /// Rail only
    pub period_ticket_types: Vec<String>,

    /// Bus only
    pub passenger_categories: Vec<CategoryOptions>,
}

/// A legend row.
#[derive(Debug, Serialize)]
pub struct ScheduleRowResult {
    pub zone: String,
    pub price: String,
}

impl ScheduleRowResult {
    pub fn from_row(row: &ScheduleRow) -> Self {
        Self {
            zone: row.zone.to_string(),
            price: row.price.to_string(),
        }
    }
}

/// A fare legend.
#[derive(Debug, Serialize)]
pub struct ScheduleResponse {
    pub mode: String,
    pub rows: Vec<ScheduleRowResult>,
}

/// A map position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CoordinateResult {
    pub latitude: f64,
    pub longitude: f64,
}

impl From<Coordinate> for CoordinateResult {
    fn from(c: Coordinate) -> Self {
        Self {
            latitude: c.latitude(),
            longitude: c.longitude(),
        }
    }
}

/// One way to pay for a bus fare band.
#[derive(Debug, Serialize)]
pub struct FareOptionResult {
    pub payment_means: Option<String>,
    pub ticket_type: String,
    pub price: String,
}

impl FareOptionResult {
    pub fn from_option(option: &FareOption) -> Self {
        Self {
            payment_means: option.payment_means.as_ref().map(|p| p.to_string()),
            ticket_type: option.ticket_type.to_string(),
            price: option.price.to_string(),
        }
    }
}

/// One fare result row.
#[derive(Debug, Serialize)]
pub struct FareRowResult {
    pub destination: String,

    /// `priced`, `unreachable` or `pricing_gap`
    pub status: String,

    pub zone: Option<String>,

    /// Decimal price with two places, e.g. "3.85"
    pub price: Option<String>,

    pub routes: Vec<String>,
    pub alternatives: Vec<FareOptionResult>,

    /// Human-readable explanation
    pub summary: String,

    /// Destination position, if known
    pub coordinate: Option<CoordinateResult>,
}

impl FareRowResult {
    pub fn from_result(result: &FareResult, coordinate: Option<Coordinate>) -> Self {
        Self {
            destination: result.destination.to_string(),
            status: result.status().to_string(),
            zone: result.zone().map(|z| z.to_string()),
            price: result.price().map(|p| p.to_string()),
            routes: result.routes.iter().map(|r| r.to_string()).collect(),
            alternatives: result
                .alternatives()
                .iter()
                .map(FareOptionResult::from_option)
                .collect(),
            summary: result.summary(),
            coordinate: coordinate.map(CoordinateResult::from),
        }
    }
}

/// Response to a fare request.
#[derive(Debug, Serialize)]
pub struct FaresResponse {
    pub mode: String,
    pub origin: String,
    pub origin_coordinate: Option<CoordinateResult>,

    /// The query named its origin as the destination
    pub same_station: bool,

    pub results: Vec<FareRowResult>,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Price, RouteId, StationId, TicketType, ZoneCode};
    use crate::resolver::FareOutcome;

    fn make_result(outcome: FareOutcome) -> FareResult {
        FareResult {
            origin: StationId::parse("Bray").unwrap(),
            destination: StationId::parse("Dublin").unwrap(),
            routes: vec![RouteId::parse("145").unwrap()],
            same_station: false,
            outcome,
        }
    }

    #[test]
    fn fare_row_from_priced_result() {
        let result = make_result(FareOutcome::Priced {
            zone: ZoneCode::parse("3").unwrap(),
            price: Price::parse("1").unwrap(),
            alternatives: vec![FareOption {
                payment_means: None,
                ticket_type: TicketType::parse("Child").unwrap(),
                price: Price::parse("1").unwrap(),
            }],
        });
        let coordinate = Coordinate::new(53.3498, -6.2603).unwrap();
        let row = FareRowResult::from_result(&result, Some(coordinate));

        assert_eq!(row.destination, "Dublin");
        assert_eq!(row.status, "priced");
        assert_eq!(row.zone, Some("3".to_string()));
        assert_eq!(row.price, Some("1.00".to_string()));
        assert_eq!(row.routes, vec!["145".to_string()]);
        assert_eq!(row.alternatives.len(), 1);
        assert_eq!(row.alternatives[0].payment_means, None);
        assert_eq!(row.alternatives[0].price, "1.00");
        assert_eq!(
            row.coordinate,
            Some(CoordinateResult {
                latitude: 53.3498,
                longitude: -6.2603
            })
        );
        assert!(row.summary.starts_with("Route 145: "));
    }

    #[test]
    fn fare_row_from_unreachable_result() {
        let row = FareRowResult::from_result(&make_result(FareOutcome::Unreachable), None);
        assert_eq!(row.status, "unreachable");
        assert_eq!(row.zone, None);
        assert_eq!(row.price, None);
        assert!(row.alternatives.is_empty());
        assert_eq!(row.coordinate, None);
    }

    #[test]
    fn fare_row_serializes_price_as_string() {
        let result = make_result(FareOutcome::PricingGap {
            zone: ZoneCode::parse("4").unwrap(),
        });
        let json = serde_json::to_value(FareRowResult::from_result(&result, None)).unwrap();
        assert_eq!(json["status"], "pricing_gap");
        assert_eq!(json["zone"], "4");
        assert!(json["price"].is_null());
    }

    #[test]
    fn schedule_row_from_row() {
        let row = ScheduleRowResult::from_row(&ScheduleRow {
            zone: ZoneCode::parse("D1").unwrap(),
            price: Price::parse("3.85").unwrap(),
        });
        assert_eq!(row.zone, "D1");
        assert_eq!(row.price, "3.85");
    }
}
