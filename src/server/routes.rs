use std::path::Path;

use axum::{routing::get, Router};
use tower_http::services::ServeDir;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tower_http::LatencyUnit;

use crate::server::api;
use crate::server::AppState;

/// API routes under `/api`; everything else is served from `static_dir`.
pub fn create_router(state: AppState, static_dir: &Path) -> Router {
    Router::new()
        .route("/api/health", get(api::health))
        .route("/api/types", get(api::types))
        .route("/api/effectiveness", get(api::effectiveness))
        .route("/api/defense", get(api::defense))
        .fallback_service(ServeDir::new(static_dir))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(tracing::Level::INFO))
                .on_response(
                    DefaultOnResponse::new()
                        .level(tracing::Level::INFO)
                        .latency_unit(LatencyUnit::Millis),
                ),
        )
        .with_state(state)
}
