use std::process::ExitCode;

use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use wayfare_server::catalog::Catalog;
use wayfare_server::config::AppConfig;
use wayfare_server::web::{AppState, create_router};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let catalog = match Catalog::load(&config.catalog_path) {
        Ok(catalog) => catalog,
        Err(e) if e.is_not_found() => {
            error!(
                "Catalog {} not found, starting with no trips",
                config.catalog_path.display()
            );
            Catalog::empty()
        }
        Err(e) => {
            error!("Failed to load catalog {}: {e}", config.catalog_path.display());
            return ExitCode::FAILURE;
        }
    };
    if catalog.is_empty() {
        warn!("Catalog is empty; every search will come back empty");
    }

    let state = AppState::new(catalog);
    let app = create_router(state, &config.static_dir);

    let listener = match tokio::net::TcpListener::bind(config.addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind {}: {e}", config.addr);
            return ExitCode::FAILURE;
        }
    };

    info!("Wayfare listening on http://{}", config.addr);
    info!("API endpoints:");
    info!("  GET  /health        - Health check");
    info!("  GET  /api/search    - Search trips");
    info!("  POST /api/cheapest  - Narrow results to the cheapest trip");
    info!("  POST /api/fastest   - Narrow results to the fastest trip");
    info!("  GET  /api/places    - Origins, destinations and operators");

    if let Err(e) = axum::serve(listener, app).await {
        error!("Server error: {e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
