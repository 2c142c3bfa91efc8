use crate::{
    handlers::{list_recipes, liveness_handler, readiness_handler, search_recipes},
    state::AppState,
};
use axum::{
    extract::Request,
    http::Method,
    response::Response,
    routing::get,
    Router,
};
use recipedb_core::config::ApiConfig;
use tower_http::{
    classify::ServerErrorsFailureClass,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info_span, Span};
use uuid::Uuid;

/// Builds the Axum router hosting the recipe REST API.
pub fn build_router(state: AppState, config: &ApiConfig) -> Router {
    // The browser frontend is served from a different origin
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers(Any)
        .max_age(config.cors_max_age());

    Router::new()
        // Health checks
        .route("/health", get(liveness_handler))
        .route("/health/ready", get(readiness_handler))
        // Recipes
        .route("/api/recipes", get(list_recipes))
        .route("/api/recipes/search", get(search_recipes))
        // Add state
        .with_state(state)
        .layer(cors)
        // Add logging layer
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request| {
                    let request_id = Uuid::new_v4();
                    info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = %request.method(),
                        uri = %request.uri(),
                        version = ?request.version(),
                    )
                })
                .on_request(|_request: &Request, _span: &Span| {
                    tracing::debug!("started processing request");
                })
                .on_response(|response: &Response, latency: std::time::Duration, _span: &Span| {
                    let status = response.status();
                    let latency_ms = latency.as_millis();

                    if status.is_server_error() {
                        tracing::error!(status = %status, latency_ms = latency_ms, "request failed with server error");
                    } else if status.is_client_error() {
                        tracing::warn!(status = %status, latency_ms = latency_ms, "request failed with client error");
                    } else {
                        tracing::info!(status = %status, latency_ms = latency_ms, "request completed");
                    }
                })
                .on_failure(|failure_class: ServerErrorsFailureClass, latency: std::time::Duration, _span: &Span| {
                    tracing::error!(failure_class = ?failure_class, latency_ms = latency.as_millis(), "request failed");
                }),
        )
}
