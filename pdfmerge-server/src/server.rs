//! Router assembly, middleware and graceful shutdown.

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::StatusCode;
use axum::routing::{get, post};
use tokio::signal;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::error::ServerResult;
use crate::routes::{health, merge, not_found, validate};

/// Build the Axum router with all routes and middleware
///
/// Browsers may call the API from the configured origins only. Credentials
/// rule out wildcard methods and headers, so requested ones are mirrored.
pub fn build_router(config: &ServerConfig) -> ServerResult<Router> {
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(config.cors_origins()?))
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request());

    Ok(Router::new()
        .route("/", get(health::root))
        .route("/health", get(health::health_check))
        .route("/validate-files", post(validate::validate_files))
        .route("/merge-pdfs", post(merge::merge_pdfs))
        .fallback(not_found)
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(config.body_limit()))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            config.timeout(),
        ))
        .layer(cors)
        .layer(TraceLayer::new_for_http()))
}

/// Start the HTTP server
///
/// Blocks until the server is shut down via SIGTERM or Ctrl+C.
pub async fn start_server(config: ServerConfig) -> anyhow::Result<()> {
    config.validate()?;

    let app = build_router(&config)?;
    let addr = config.socket_addr()?;

    tracing::info!("Starting pdfmerge server on {}", addr);
    tracing::info!(
        "Timeout: {}s, Max body: {}MB, CORS origins: {}",
        config.timeout_secs,
        config.max_upload_mb,
        config.allowed_origins.join(", ")
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!(%err, "failed to install Ctrl+C handler");
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
                tracing::error!(%err, "failed to install SIGTERM handler");
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
