//! Recipe list and search handlers

use axum::{
    extract::{Query, State},
    Json,
};
use recipedb_query::{PageParams, Pagination, RecipePage, SearchCriteria, SearchResults};
use tracing::debug;

use super::ApiError;
use crate::state::AppState;

/// Query-string pairs in arrival order. Repeated keys are kept; the first
/// occurrence wins when a single value is needed.
type QueryPairs = Vec<(String, String)>;

fn first(pairs: &QueryPairs, key: &str) -> Option<String> {
    pairs
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.clone())
}

/// `GET /api/recipes?page=&limit=`
pub async fn list_recipes(
    State(state): State<AppState>,
    Query(pairs): Query<QueryPairs>,
) -> Result<Json<RecipePage>, ApiError> {
    let params = PageParams {
        page: first(&pairs, "page"),
        limit: first(&pairs, "limit"),
    };
    let pagination = Pagination::from_params(&params, state.queries.defaults());
    debug!(page = pagination.page, limit = pagination.limit, "Listing recipes");

    Ok(Json(state.queries.list(pagination).await?))
}

/// `GET /api/recipes/search?title=&cuisine=&rating=&total_time=&calories=`
pub async fn search_recipes(
    State(state): State<AppState>,
    Query(pairs): Query<QueryPairs>,
) -> Result<Json<SearchResults>, ApiError> {
    let criteria = SearchCriteria {
        title: first(&pairs, "title"),
        cuisine: first(&pairs, "cuisine"),
        rating: first(&pairs, "rating"),
        total_time: first(&pairs, "total_time"),
        calories: first(&pairs, "calories"),
    };
    debug!(?criteria, "Searching recipes");

    Ok(Json(state.queries.search(&criteria).await?))
}
