//! Climate API HTTP Server
//!
//! Main entry point for the HTTP API server.

use std::{env, sync::Arc, time::Duration};

use application::{ClimateService, DatasetHealthPort, ObservationStore};
use infrastructure::{
    AppConfig, CONFIG_PATH_ENV, ServerConfig, SqliteDatasetHealth, SqliteObservationStore,
    create_pool, init_tracing,
};
use presentation_http::{error::set_expose_internal_errors, routes, state::AppState};
use tokio::{net::TcpListener, signal};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let loaded = match env::var_os(CONFIG_PATH_ENV) {
        Some(path) => AppConfig::load_from(path),
        None => AppConfig::load(),
    };
    let (config, config_error) = match loaded {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    init_tracing(&config.telemetry)?;

    info!("Climate API v{} starting...", env!("CARGO_PKG_VERSION"));
    if let Some(e) = config_error {
        warn!(error = %e, "Failed to load config, using defaults");
    }

    info!(
        host = %config.server.host,
        port = %config.server.port,
        database = %config.database.path,
        preload = config.database.preload,
        "Configuration loaded"
    );

    set_expose_internal_errors(config.server.expose_internal_errors);

    let pool = Arc::new(
        create_pool(&config.database)
            .map_err(|e| anyhow::anyhow!("Failed to open dataset {}: {e}", config.database.path))?,
    );
    let sqlite = SqliteObservationStore::new(Arc::clone(&pool));

    let (store, dataset_health): (Arc<dyn ObservationStore>, Arc<dyn DatasetHealthPort>) =
        if config.database.preload {
            let snapshot = Arc::new(sqlite.snapshot().await?);
            info!(observations = snapshot.len(), "Dataset preloaded into memory");
            (Arc::clone(&snapshot) as Arc<dyn ObservationStore>, snapshot)
        } else {
            (
                Arc::new(sqlite),
                Arc::new(SqliteDatasetHealth::new(Arc::clone(&pool))),
            )
        };

    let state = AppState {
        climate_service: Arc::new(ClimateService::new(store)),
        dataset_health,
    };

    let app = routes::create_router(state)
        .layer(TimeoutLayer::with_status_code(
            axum::http::StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(config.server.request_timeout_secs),
        ))
        .layer(TraceLayer::new_for_http());

    let app = if config.server.cors_enabled {
        app.layer(cors_layer(&config.server))
    } else {
        app
    };

    let addr = config.bind_address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server listening on http://{}", addr);

    let shutdown_timeout = Duration::from_secs(config.server.shutdown_timeout_secs);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown_timeout))
        .await?;

    info!("Server shutdown complete");

    Ok(())
}

/// CORS policy from the server settings; an empty origin list allows any origin
fn cors_layer(server: &ServerConfig) -> CorsLayer {
    use axum::http::{HeaderValue, Method};

    let layer = CorsLayer::new()
        .allow_methods([Method::GET])
        .allow_headers(Any);

    if server.allowed_origins.is_empty() {
        layer.allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> = server
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        layer.allow_origin(origins)
    }
}

/// Wait for shutdown signals (SIGINT, SIGTERM) and handle graceful shutdown
async fn shutdown_signal(timeout: Duration) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        () = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown...");
        }
    }

    info!("Waiting up to {:?} for connections to close...", timeout);
}
