//! Application state for the web layer.

use std::sync::Arc;

use crate::resolver::FareResolver;

/// Shared application state.
///
/// The fare tables are immutable after loading, so handlers share one
/// resolver without locking.
#[derive(Clone)]
pub struct AppState {
    /// Fare resolver over the loaded tables
    pub resolver: Arc<FareResolver>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(resolver: FareResolver) -> Self {
        Self {
            resolver: Arc::new(resolver),
        }
    }
}
