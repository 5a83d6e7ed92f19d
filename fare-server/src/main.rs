use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use fare_server::config::ServerConfig;
use fare_server::tables;
use fare_server::web::{AppState, create_router};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("fare_server=info")),
        )
        .init();

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("configuration error: {e}");
            return ExitCode::FAILURE;
        }
    };

    // Load fare tables (fail fast on any bad row)
    let resolver = match tables::load(&config.data) {
        Ok(resolver) => resolver,
        Err(e) => {
            error!("failed to load fare tables: {e}");
            return ExitCode::FAILURE;
        }
    };

    let app = create_router(AppState::new(resolver));

    let listener = match tokio::net::TcpListener::bind(config.bind_addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("failed to bind {}: {e}", config.bind_addr);
            return ExitCode::FAILURE;
        }
    };

    info!("Fare lookup listening on http://{}", config.bind_addr);
    info!("API endpoints:");
    info!("  GET /health");
    info!("  GET /api/{{mode}}/stations");
    info!("  GET /api/{{mode}}/fare-options");
    info!("  GET /api/{{mode}}/schedule");
    info!("  GET /api/{{mode}}/fares");

    if let Err(e) = axum::serve(listener, app).await {
        error!("server error: {e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
