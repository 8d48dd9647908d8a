pub mod services;

use axum::{
    routing::{get, put},
    Json, Router,
};
use service::registry::ServiceRegistry;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use common::types::Health;

use crate::openapi;

/// Shared handler state; the registry owns the injected store handle.
#[derive(Clone)]
pub struct ServerState {
    pub registry: ServiceRegistry,
}

impl ServerState {
    pub fn new(registry: ServiceRegistry) -> Self { Self { registry } }
}

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health::ok())
}

/// Build the full application router
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    let api = Router::new()
        .route("/services", get(services::list).post(services::create))
        .route("/services/:id", put(services::update).delete(services::delete));

    Router::new()
        .route("/health", get(health))
        .route("/api-docs/openapi.json", get(openapi::openapi_json))
        .merge(api)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                // 5xx are logged at ERROR
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
