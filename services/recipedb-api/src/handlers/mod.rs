//! HTTP handlers for REST API endpoints

pub mod error;
pub mod health;
pub mod recipes;

pub use error::{ApiError, ErrorResponse};
pub use health::{liveness_handler, readiness_handler};
pub use recipes::{list_recipes, search_recipes};
