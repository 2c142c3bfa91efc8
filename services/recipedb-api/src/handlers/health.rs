//! Health check endpoints for liveness and readiness probes
//!
//! - `/health` - Liveness probe (returns "ok" while the process is serving)
//! - `/health/ready` - Readiness probe (checks the recipe store)

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use recipedb_core::StoreStatus;
use tracing::{debug, warn};

use crate::state::AppState;

/// Liveness probe handler
pub async fn liveness_handler() -> &'static str {
    "ok"
}

/// Readiness probe handler
///
/// Returns 200 OK only while the recipe store reports healthy.
pub async fn readiness_handler(State(state): State<AppState>) -> Response {
    debug!("Readiness check requested");

    let ready = match state.store.status().await {
        Ok(StoreStatus::Healthy) => true,
        Ok(StoreStatus::Degraded) => {
            warn!("Recipe store is degraded");
            false
        }
        Err(e) => {
            warn!("Recipe store check failed: {}", e);
            false
        }
    };

    if !ready {
        return (StatusCode::SERVICE_UNAVAILABLE, "Recipe store not ready").into_response();
    }

    StatusCode::OK.into_response()
}
