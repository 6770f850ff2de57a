//! HTTP surface: router, handlers, DTOs, and error mapping

pub mod dto;
pub mod error;
pub mod handlers;

use axum::Router;
use axum::http::{HeaderValue, Method, header};
use axum::routing::{get, post};
use explainer_application::{ExplainCodeUseCase, VisualizeCodeUseCase};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

/// Shared state injected into every handler
#[derive(Clone)]
pub struct AppState {
    pub explain: Arc<ExplainCodeUseCase>,
    pub visualize: Arc<VisualizeCodeUseCase>,
    /// Keep an in-flight upstream call running when the client
    /// disconnects (see the server configuration flag of the same name).
    pub detach_on_disconnect: bool,
}

/// Build the axum router
pub fn build_router(state: AppState, frontend_origins: &[String]) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/explain", post(handlers::explain))
        .route("/visualize", post(handlers::visualize))
        .with_state(state)
        .layer(cors_layer(frontend_origins))
        .layer(TraceLayer::new_for_http())
}

/// CORS allow-list for the browser frontend: GET/POST with JSON bodies.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(%origin, "Skipping invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
        .allow_origin(AllowOrigin::list(origins))
}
