//! Server initialization and routing
//!
//! This module handles the Axum server setup including:
//! - Router configuration with all API endpoints
//! - Middleware stack (request ids, logging, compression, CORS, timeouts)
//! - Periodic taxonomy refresh
//! - Graceful shutdown handling

use crate::config::ServerConfig;
use crate::metrics;
use crate::middleware::{log_requests, request_id};
use crate::routes::{api_info, method_not_allowed, not_found};
use crate::routes::{availability, health, matching};
use crate::state::ServerState;
use axum::extract::DefaultBodyLimit;
use axum::http::StatusCode;
use axum::middleware::from_fn;
use axum::routing::{get, post};
use axum::Router;
use pantry_match::Engine;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

/// Build the Axum router with all routes and middleware
///
/// Matching routes accept POST only; any other method on those paths gets a
/// 405 in the standard error shape. Unknown paths get a 404.
///
/// Middleware, outermost first:
/// 1. Tracing spans
/// 2. Request ID tracking
/// 3. Request logging and HTTP metrics
/// 4. CORS
/// 5. Compression
/// 6. Timeout handling
/// 7. Body size limit
pub fn build_router(state: Arc<ServerState>) -> Router {
    let cors = if state.config.enable_cors {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        CorsLayer::new()
    };

    let public_routes = Router::new()
        .route("/", get(api_info))
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        .route("/metrics", get(health::metrics));

    let api_routes = Router::new()
        .route(
            "/api/v1/ingredients/match",
            post(matching::match_ingredients).fallback(method_not_allowed),
        )
        .route(
            "/api/v1/recipes/availability",
            post(availability::check_recipe).fallback(method_not_allowed),
        );

    Router::new()
        .merge(public_routes)
        .merge(api_routes)
        .fallback(not_found)
        .layer(DefaultBodyLimit::max(state.config.max_body_size()))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            state.config.timeout(),
        ))
        .layer(CompressionLayer::new())
        .layer(cors)
        .layer(from_fn(log_requests))
        .layer(from_fn(request_id))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the pantry matching HTTP server
///
/// Initializes logging, builds the engine, installs the Prometheus recorder
/// when `metrics_enabled` is set and serves until SIGTERM or Ctrl+C.
///
/// # Example
///
/// ```rust,no_run
/// use server::ServerConfig;
///
/// #[tokio::main]
/// async fn main() -> anyhow::Result<()> {
///     let config = ServerConfig::load()?;
///     server::start_server(config).await?;
///     Ok(())
/// }
/// ```
pub async fn start_server(config: ServerConfig) -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(&config.log_level)
        .with_target(false)
        .with_thread_ids(true)
        .with_thread_names(true)
        .json()
        .init();

    let mut state = ServerState::new(config.clone())?;
    if config.metrics_enabled {
        state = state.with_metrics(metrics::install()?);
    }
    let state = Arc::new(state);

    if let Some(period) = state.engine.refresh_interval() {
        tokio::spawn(refresh_taxonomy_periodically(state.engine.clone(), period));
    }

    let app = build_router(state.clone());
    let addr: SocketAddr = config.socket_addr()?;
    let stats = state.engine.taxonomy().stats();

    tracing::info!(
        "Starting pantry server on {} with taxonomy v{} ({} entries, {} households)",
        addr,
        stats.version,
        stats.entries,
        stats.households
    );
    tracing::info!(
        "Timeout: {}s, Max body: {}MB",
        config.timeout_secs,
        config.max_body_size_mb
    );
    tracing::info!(
        "CORS: {}, Metrics: {}",
        config.enable_cors,
        config.metrics_enabled
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Reload the taxonomy on a fixed period. A failed reload keeps the
/// previous snapshot serving.
async fn refresh_taxonomy_periodically(engine: Arc<Engine>, period: std::time::Duration) {
    let mut ticker = tokio::time::interval(period);
    // The first tick completes immediately and the startup load is fresh.
    ticker.tick().await;

    loop {
        ticker.tick().await;
        let engine = engine.clone();
        match tokio::task::spawn_blocking(move || engine.refresh_taxonomy()).await {
            Ok(Ok(stats)) => tracing::debug!(
                entries = stats.entries,
                households = stats.households,
                "taxonomy refreshed"
            ),
            // Already logged by the engine.
            Ok(Err(_)) => {}
            Err(err) => tracing::error!(error = %err, "taxonomy refresh task failed"),
        }
    }
}

/// Shutdown signal handler
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl+C, shutting down..."),
        _ = terminate => tracing::info!("Received SIGTERM, shutting down..."),
    }
}
