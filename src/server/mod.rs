//! HTTP transport for the job service
//!
//! A thin axum layer: it decodes requests, calls `JobService`, and encodes
//! responses. No crawl logic lives here.

mod error;
mod handlers;

pub use error::ApiError;

use crate::config::ServerConfig;
use crate::jobs::JobService;
use axum::http::HeaderValue;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

/// Builds the application router
///
/// # Routes
///
/// | Method | Path | Handler |
/// |--------|------|---------|
/// | GET | `/health` | static ok |
/// | POST | `/crawler/jobs` | submit a crawl request |
/// | GET | `/crawler/jobs/{id}` | job status |
/// | GET | `/crawler/jobs/{id}/items` | job status with items |
pub fn router(service: JobService, config: &ServerConfig) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/crawler/jobs", post(handlers::create_job))
        .route("/crawler/jobs/{id}", get(handlers::get_job))
        .route("/crawler/jobs/{id}/items", get(handlers::get_job_items))
        .layer(cors_layer(&config.allowed_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(service)
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!("Ignoring CORS origin '{}': {}", origin, e);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

/// Binds `config.bind` and serves until Ctrl-C
pub async fn serve(service: JobService, config: &ServerConfig) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(&config.bind).await?;
    tracing::info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, router(service, config))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
