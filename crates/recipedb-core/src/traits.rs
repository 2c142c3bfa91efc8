use async_trait::async_trait;

use crate::error::CoreResult;
use crate::predicate::{FindOptions, Predicate};
use crate::recipe::{Recipe, StoredRecipe};

/// High level status reported by a recipe store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreStatus {
    Healthy,
    Degraded,
}

/// Document-store interface the query and ingest paths are written against.
///
/// Handles are opened explicitly by the process bootstrap and shared as
/// `Arc<dyn RecipeStore>`; implementations must tolerate concurrent readers.
#[async_trait]
pub trait RecipeStore: Send + Sync {
    /// Reports whether the store can serve requests.
    async fn status(&self) -> CoreResult<StoreStatus>;

    /// Returns records matching `predicate`, sorted and windowed by `options`.
    ///
    /// Without a sort, records come back in insertion order. Ties under a
    /// sort keep insertion order.
    async fn find(
        &self,
        predicate: &Predicate,
        options: &FindOptions,
    ) -> CoreResult<Vec<StoredRecipe>>;

    /// Counts records matching `predicate` (empty predicate counts all).
    async fn count(&self, predicate: &Predicate) -> CoreResult<u64>;

    /// Inserts all records in one batch, returning how many were written.
    async fn insert_many(&self, recipes: Vec<Recipe>) -> CoreResult<usize>;

    /// Inserts all records only if the store is empty.
    ///
    /// Returns `None` when the store already holds records. The default
    /// implementation is a plain count followed by an insert and is therefore
    /// racy; stores able to do better override it.
    async fn insert_if_empty(&self, recipes: Vec<Recipe>) -> CoreResult<Option<usize>> {
        if self.count(&Predicate::all()).await? > 0 {
            return Ok(None);
        }
        self.insert_many(recipes).await.map(Some)
    }

    /// Releases the handle. Further calls may fail.
    async fn close(&self) -> CoreResult<()> {
        Ok(())
    }
}
