//! Read-side operations over a [`RecipeStore`].

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info};

use recipedb_core::{CoreResult, FindOptions, Predicate, RecipeStore, SortSpec, StoredRecipe};

use crate::pagination::{PageDefaults, Pagination};
use crate::query_builder::{SearchCriteria, RATING_FIELD};

/// One page of the rating-ordered catalogue.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecipePage {
    pub page: u64,
    pub limit: u64,
    pub total: u64,
    pub pages: u64,
    pub data: Vec<StoredRecipe>,
}

/// Unpaginated search matches.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResults {
    pub data: Vec<StoredRecipe>,
}

/// Stateless query service; cheap to clone and share across requests.
#[derive(Clone)]
pub struct RecipeQueryService {
    store: Arc<dyn RecipeStore>,
    defaults: PageDefaults,
}

impl RecipeQueryService {
    pub fn new(store: Arc<dyn RecipeStore>, defaults: PageDefaults) -> Self {
        Self { store, defaults }
    }

    pub fn defaults(&self) -> PageDefaults {
        self.defaults
    }

    pub fn store(&self) -> &Arc<dyn RecipeStore> {
        &self.store
    }

    /// Returns one page sorted by rating, highest first, unrated last.
    ///
    /// `total` counts the whole collection, not just this page.
    pub async fn list(&self, pagination: Pagination) -> CoreResult<RecipePage> {
        let all = Predicate::all();
        let options = FindOptions::default()
            .sorted(SortSpec::descending(RATING_FIELD))
            .window(pagination.offset(), pagination.limit);

        let (data, total) = tokio::try_join!(
            self.store.find(&all, &options),
            self.store.count(&all)
        )?;
        let pages = pagination.page_count(total);

        info!(
            page = pagination.page,
            limit = pagination.limit,
            total,
            returned = data.len(),
            "Listed recipes"
        );

        Ok(RecipePage {
            page: pagination.page,
            limit: pagination.limit,
            total,
            pages,
            data,
        })
    }

    /// Returns every record matching `criteria`, in store order.
    pub async fn search(&self, criteria: &SearchCriteria) -> CoreResult<SearchResults> {
        let predicate = criteria.to_predicate();
        debug!(clauses = predicate.clauses().len(), "Built search predicate");

        let data = self.store.find(&predicate, &FindOptions::default()).await?;
        info!(matches = data.len(), "Searched recipes");

        Ok(SearchResults { data })
    }
}

impl std::fmt::Debug for RecipeQueryService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecipeQueryService")
            .field("defaults", &self.defaults)
            .finish_non_exhaustive()
    }
}
