//! HTTP route handlers.

use std::fmt::Display;
use std::iter;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::domain::{Mode, PassengerCategory, PaymentMeans, RouteId, StationId, TicketType};
use crate::fares::FareClass;
use crate::resolver::{Destination, FareQuery, QueryError};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/:mode/stations", get(list_stations))
        .route("/api/:mode/fare-options", get(fare_options))
        .route("/api/:mode/schedule", get(fare_schedule))
        .route("/api/:mode/fares", get(lookup_fares))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Origin and destination selector contents.
async fn list_stations(
    State(state): State<AppState>,
    Path(mode): Path<String>,
) -> Result<Json<StationsResponse>, AppError> {
    let mode = parse_mode(&mode)?;
    let zones = state.resolver.zones();

    let origins = zones
        .origins(mode)
        .into_iter()
        .map(ToString::to_string)
        .collect();
    let destinations = iter::once(Destination::ANY.to_string())
        .chain(zones.destinations(mode).into_iter().map(ToString::to_string))
        .collect();

    Ok(Json(StationsResponse {
        mode: mode.to_string(),
        origins,
        destinations,
    }))
}

/// Fare classes selectable for a mode.
async fn fare_options(
    State(state): State<AppState>,
    Path(mode): Path<String>,
) -> Result<Json<FareOptionsResponse>, AppError> {
    let mode = parse_mode(&mode)?;
    let fares = state.resolver.fares();
    let categories = state.resolver.categories();

    let payment_means = fares
        .payment_means(mode)
        .into_iter()
        .map(|pm| PaymentMeansOptions {
            payment_means: pm.to_string(),
            ticket_types: fares
                .ticket_types(mode, pm)
                .into_iter()
                .map(ToString::to_string)
                .collect(),
        })
        .collect();

    let (period_ticket_types, passenger_categories) = match mode {
        Mode::Rail => (
            fares
                .period_ticket_types()
                .into_iter()
                .map(ToString::to_string)
                .collect(),
            Vec::new(),
        ),
        Mode::Bus => (
            Vec::new(),
            categories
                .categories()
                .map(|category| CategoryOptions {
                    category: category.to_string(),
                    ticket_types: categories
                        .eligible(category)
                        .into_iter()
                        .flatten()
                        .map(ToString::to_string)
                        .collect(),
                })
                .collect(),
        ),
    };

    Ok(Json(FareOptionsResponse {
        mode: mode.to_string(),
        payment_means,
        period_ticket_types,
        passenger_categories,
    }))
}

/// Fare legend for one fare class.
async fn fare_schedule(
    State(state): State<AppState>,
    Path(mode): Path<String>,
    Query(req): Query<ScheduleRequest>,
) -> Result<Json<ScheduleResponse>, AppError> {
    let mode = parse_mode(&mode)?;
    let fare_class = parse_fare_class(&req.class)?;

    let rows = state
        .resolver
        .schedule(mode, &fare_class)?
        .iter()
        .map(ScheduleRowResult::from_row)
        .collect();

    Ok(Json(ScheduleResponse {
        mode: mode.to_string(),
        rows,
    }))
}

/// Look up fares from an origin to one destination or to all of them.
async fn lookup_fares(
    State(state): State<AppState>,
    Path(mode): Path<String>,
    Query(req): Query<FareRequest>,
) -> Result<Json<FaresResponse>, AppError> {
    let mode = parse_mode(&mode)?;
    let origin = StationId::parse(&req.origin).map_err(bad_request)?;
    let destination = Destination::parse(&req.destination).ok_or_else(|| AppError::BadRequest {
        message: "destination must not be empty".to_string(),
    })?;
    let fare_class = parse_fare_class(&req.class)?;

    let mut query = FareQuery::new(mode, origin.clone(), destination.clone(), fare_class);
    if let Some(route) = non_empty(&req.route) {
        query = query.with_route(RouteId::parse(route).map_err(bad_request)?);
    }

    let results = state.resolver.resolve(&query)?;

    let directory = state.resolver.stations();
    let origin_coordinate = directory.coordinate_of(mode, &origin).ok();
    let rows = results
        .iter()
        .map(|result| {
            let coordinate = directory
                .coordinate_of(mode, &result.destination)
                .inspect_err(|e| warn!("no map position: {e}"))
                .ok();
            FareRowResult::from_result(result, coordinate)
        })
        .collect();

    Ok(Json(FaresResponse {
        mode: mode.to_string(),
        origin: origin.to_string(),
        origin_coordinate: origin_coordinate.map(CoordinateResult::from),
        same_station: destination == Destination::Station(origin),
        results: rows,
    }))
}

fn parse_mode(mode: &str) -> Result<Mode, AppError> {
    Mode::parse(mode).map_err(bad_request)
}

/// Treat missing and blank query values alike. Other values are matched
/// exactly, padding included.
fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

/// Pick the fare class from the query parameters.
///
/// A passenger category wins over a period pass, which wins over a
/// standard fare.
fn parse_fare_class(params: &FareClassParams) -> Result<FareClass, AppError> {
    if let Some(category) = non_empty(&params.category) {
        let category = PassengerCategory::parse(category).map_err(bad_request)?;
        return Ok(FareClass::passenger(category));
    }

    if let Some(period) = non_empty(&params.period) {
        let ticket_type = TicketType::parse(period).map_err(bad_request)?;
        return Ok(FareClass::period(ticket_type));
    }

    match (non_empty(&params.payment_means), non_empty(&params.ticket_type)) {
        (Some(payment_means), Some(ticket_type)) => Ok(FareClass::standard(
            PaymentMeans::parse(payment_means).map_err(bad_request)?,
            TicketType::parse(ticket_type).map_err(bad_request)?,
        )),
        _ => Err(AppError::BadRequest {
            message: "select a fare with payment_means and ticket_type, period, or category"
                .to_string(),
        }),
    }
}

fn bad_request(e: impl Display) -> AppError {
    AppError::BadRequest {
        message: e.to_string(),
    }
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
}

impl From<QueryError> for AppError {
    fn from(e: QueryError) -> Self {
        match e {
            QueryError::UnknownStation { .. } => AppError::NotFound {
                message: e.to_string(),
            },
            QueryError::UnsupportedFareClass { .. } | QueryError::UnknownPassengerCategory(_) => {
                bad_request(e)
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
        };

        warn!(%status, "{message}");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
