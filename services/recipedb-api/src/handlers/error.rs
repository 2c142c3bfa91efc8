use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use recipedb_core::CoreError;
use serde::Serialize;
use tracing::error;

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Request failures, mapped to status codes
#[derive(Debug)]
pub enum ApiError {
    /// The store could not serve the request
    Unavailable(CoreError),
    Internal(CoreError),
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        if err.is_storage_failure() {
            Self::Unavailable(err)
        } else {
            Self::Internal(err)
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Unavailable(err) => {
                error!("Store unavailable: {:?}", err);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    format!("Recipe store unavailable: {}", err),
                )
            }
            ApiError::Internal(err) => {
                error!("Internal error: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Internal error: {}", err),
                )
            }
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
