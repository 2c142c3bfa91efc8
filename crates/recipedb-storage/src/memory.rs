//! In-memory recipe store for tests and development

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;
use tracing::debug;

use recipedb_core::{
    FindOptions, Predicate, Recipe, RecipeStore, StoreStatus, StoredRecipe,
};

use crate::error::{closed, Result};
use crate::scan;

/// In-memory recipe store.
///
/// Clones share the same underlying records.
#[derive(Clone, Default)]
pub struct MemoryRecipeStore {
    records: Arc<RwLock<Vec<StoredRecipe>>>,
    closed: Arc<AtomicBool>,
}

impl MemoryRecipeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records, bypassing the async interface.
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }

    fn ensure_open(&self) -> Result<()> {
        if self.closed.load(Ordering::Acquire) {
            return Err(closed());
        }
        Ok(())
    }
}

#[async_trait]
impl RecipeStore for MemoryRecipeStore {
    async fn status(&self) -> Result<StoreStatus> {
        if self.closed.load(Ordering::Acquire) {
            return Ok(StoreStatus::Degraded);
        }
        Ok(StoreStatus::Healthy)
    }

    async fn find(
        &self,
        predicate: &Predicate,
        options: &FindOptions,
    ) -> Result<Vec<StoredRecipe>> {
        self.ensure_open()?;
        let records = self.records.read();
        Ok(scan::select(&records, predicate, options))
    }

    async fn count(&self, predicate: &Predicate) -> Result<u64> {
        self.ensure_open()?;
        let records = self.records.read();
        Ok(scan::count(&records, predicate))
    }

    async fn insert_many(&self, recipes: Vec<Recipe>) -> Result<usize> {
        self.ensure_open()?;
        let inserted = recipes.len();
        self.records
            .write()
            .extend(recipes.into_iter().map(StoredRecipe::assign));

        debug!(inserted, "Inserted recipes into memory store");
        Ok(inserted)
    }

    async fn insert_if_empty(&self, recipes: Vec<Recipe>) -> Result<Option<usize>> {
        self.ensure_open()?;
        let mut records = self.records.write();
        if !records.is_empty() {
            return Ok(None);
        }

        let inserted = recipes.len();
        records.extend(recipes.into_iter().map(StoredRecipe::assign));
        Ok(Some(inserted))
    }

    async fn close(&self) -> Result<()> {
        self.closed.store(true, Ordering::Release);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use recipedb_core::{Clause, CoreError};

    fn recipe(title: &str) -> Recipe {
        Recipe {
            title: Some(title.to_string()),
            ..Recipe::default()
        }
    }

    #[tokio::test]
    async fn insert_then_find_preserves_insertion_order() {
        let store = MemoryRecipeStore::new();
        store
            .insert_many(vec![recipe("one"), recipe("two"), recipe("three")])
            .await
            .unwrap();

        let found = store
            .find(&Predicate::all(), &FindOptions::default())
            .await
            .unwrap();
        let titles: Vec<_> = found
            .iter()
            .map(|r| r.recipe.title.clone().unwrap())
            .collect();

        assert_eq!(titles, vec!["one", "two", "three"]);
        assert_eq!(store.count(&Predicate::all()).await.unwrap(), 3);
    }

    #[tokio::test]
    async fn insert_if_empty_refuses_populated_store() {
        let store = MemoryRecipeStore::new();
        assert_eq!(
            store.insert_if_empty(vec![recipe("a")]).await.unwrap(),
            Some(1)
        );
        assert_eq!(store.insert_if_empty(vec![recipe("b")]).await.unwrap(), None);
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn closed_store_fails_reads() {
        let store = MemoryRecipeStore::new();
        store.close().await.unwrap();

        assert_eq!(store.status().await.unwrap(), StoreStatus::Degraded);
        let err = store
            .find(
                &Predicate::all().and(Clause::contains("title", "x")),
                &FindOptions::default(),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::StorageError(_)));
    }
}
