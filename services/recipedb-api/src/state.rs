//! Shared state for the API server.

use std::sync::Arc;

use recipedb_core::RecipeStore;
use recipedb_query::{PageDefaults, RecipeQueryService};

/// Shared application state for the API server
#[derive(Clone)]
pub struct AppState {
    /// Store handle, opened by the process bootstrap
    pub store: Arc<dyn RecipeStore>,
    /// List and search operations over `store`
    pub queries: RecipeQueryService,
}

impl AppState {
    pub fn new(store: Arc<dyn RecipeStore>, defaults: PageDefaults) -> Self {
        let queries = RecipeQueryService::new(Arc::clone(&store), defaults);
        Self { store, queries }
    }
}
