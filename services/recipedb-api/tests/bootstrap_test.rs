//! Integration tests for startup seeding

use std::sync::Arc;

use recipedb_api::bootstrap;
use recipedb_core::config::{StoreBackend, StoreConfig};
use recipedb_core::{Predicate, RecipeStore};
use recipedb_ingest::LoadOutcome;
use recipedb_storage::{open_store, MemoryRecipeStore};
use tempfile::TempDir;

const SEED: &str = r#"{
    "0": {"title": "Pie", "cuisine": "american", "rating": 4.5},
    "1": {"title": "Soup", "cuisine": "french", "rating": NaN}
}"#;

fn store_config(temp_dir: &TempDir, seed: Option<&str>) -> StoreConfig {
    let seed_file = seed.map(|contents| {
        let path = temp_dir.path().join("seed.json");
        std::fs::write(&path, contents).unwrap();
        path
    });

    StoreConfig {
        backend: StoreBackend::File,
        path: temp_dir.path().join("data/recipes.json"),
        seed_file,
    }
}

#[tokio::test]
async fn test_seeds_empty_store_once() {
    let temp_dir = TempDir::new().unwrap();
    let config = store_config(&temp_dir, Some(SEED));

    let store = open_store(&config).await.unwrap();
    let outcome = bootstrap::seed_store(&store, &config).await.unwrap();
    assert_eq!(outcome, Some(LoadOutcome::Inserted { count: 2 }));
    store.close().await.unwrap();

    // Restart against the same document
    let store = open_store(&config).await.unwrap();
    let outcome = bootstrap::seed_store(&store, &config).await.unwrap();
    assert_eq!(outcome, Some(LoadOutcome::Skipped { existing: 2 }));
    assert_eq!(store.count(&Predicate::all()).await.unwrap(), 2);
}

#[tokio::test]
async fn test_no_seed_file_is_a_no_op() {
    let temp_dir = TempDir::new().unwrap();
    let config = store_config(&temp_dir, None);
    let store: Arc<dyn RecipeStore> = Arc::new(MemoryRecipeStore::new());

    let outcome = bootstrap::seed_store(&store, &config).await.unwrap();

    assert_eq!(outcome, None);
    assert_eq!(store.count(&Predicate::all()).await.unwrap(), 0);
}

#[tokio::test]
async fn test_unreadable_seed_file_fails_startup() {
    let temp_dir = TempDir::new().unwrap();
    let mut config = store_config(&temp_dir, None);
    config.seed_file = Some(temp_dir.path().join("missing.json"));
    let store: Arc<dyn RecipeStore> = Arc::new(MemoryRecipeStore::new());

    let err = bootstrap::seed_store(&store, &config).await.unwrap_err();

    assert!(err.to_string().contains("missing.json"));
}

#[tokio::test]
async fn test_malformed_seed_file_fails_startup() {
    let temp_dir = TempDir::new().unwrap();
    let config = store_config(&temp_dir, Some("[{\"title\": "));
    let store: Arc<dyn RecipeStore> = Arc::new(MemoryRecipeStore::new());

    let err = bootstrap::seed_store(&store, &config).await.unwrap_err();

    assert!(matches!(err, recipedb_core::CoreError::MalformedPayload(_)));
    assert_eq!(store.count(&Predicate::all()).await.unwrap(), 0);
}
