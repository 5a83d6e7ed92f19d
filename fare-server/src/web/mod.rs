//! Web layer for the fare lookup service.
//!
//! Provides JSON endpoints for station lists, fare options, fare legends
//! and fare lookups.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
