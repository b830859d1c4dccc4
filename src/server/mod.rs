/*!
 * HTTP interface for the translation pipeline.
 *
 * Endpoints:
 * - `POST /translate-pdf` - translate an inline (base64) or remote PDF
 * - `GET /health` - liveness check
 *
 * Every route answers CORS preflight requests from any origin.
 */

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderName},
    routing::{get, post},
    Router,
};
use log::info;
use tower_http::cors::{Any, CorsLayer};

use crate::app_config::ServerConfig;
use crate::app_controller::Controller;

pub mod api;
pub mod error;

pub use api::{TranslatePdfRequest, TranslatePdfResponse};
pub use error::ServerError;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub controller: Arc<Controller>,
}

impl AppState {
    pub fn new(controller: Controller) -> Self {
        Self {
            controller: Arc::new(controller),
        }
    }
}

/// CORS policy: any origin, the headers browser clients send
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers([
            header::AUTHORIZATION,
            HeaderName::from_static("x-client-info"),
            HeaderName::from_static("apikey"),
            header::CONTENT_TYPE,
        ])
}

/// Build the router
pub fn router(state: AppState, max_body_bytes: usize) -> Router {
    Router::new()
        .route("/health", get(api::handle_health))
        .route("/translate-pdf", post(api::handle_translate_pdf))
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(cors_layer())
        .with_state(state)
}

/// Bind and serve until Ctrl-C
pub async fn serve(controller: Controller, config: &ServerConfig) -> Result<()> {
    let app = router(AppState::new(controller), config.max_body_bytes);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown requested");
    }
}
