//! HTTP server assembly.
//!
//! [`router`] builds the full service as a plain `axum::Router`, which keeps
//! integration tests socket-free — they drive the router directly. [`serve`]
//! binds and runs it.

pub mod routes;
pub mod state;

use crate::config::ServiceConfig;
use crate::error::ConvertError;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use std::net::SocketAddr;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use state::AppState;

/// Build the service router.
///
/// The transport body limit sits above the validator's 15 MiB ceiling so an
/// oversized upload reaches [`crate::pipeline::validate`] and produces the
/// documented 400 JSON body instead of a bare 413 from the transport.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let body_limit = state.config.max_upload_bytes + 64 * 1024;

    Router::new()
        .route("/", get(routes::banner))
        .route("/health", get(routes::health))
        .route("/convert", post(routes::convert_pdf_to_word))
        .route("/word-to-pdf", post(routes::convert_word_to_pdf))
        .with_state(state)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Bind and serve until the process is stopped.
pub async fn serve(config: ServiceConfig) -> Result<(), ConvertError> {
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .map_err(|e| ConvertError::Internal(format!("invalid bind address: {e}")))?;

    let state = AppState::from_config(config);
    let app = router(state);

    tracing::info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| ConvertError::Internal(format!("failed to bind {addr}: {e}")))?;

    axum::serve(listener, app)
        .await
        .map_err(|e| ConvertError::Internal(format!("server error: {e}")))?;

    Ok(())
}
