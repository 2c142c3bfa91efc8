//! Recipe store implementations.

pub mod error;
pub mod file;
pub mod memory;
mod scan;

use std::sync::Arc;

use recipedb_core::config::{StoreBackend, StoreConfig};
use recipedb_core::RecipeStore;
use tracing::info;

pub use error::Result;
pub use file::FileRecipeStore;
pub use memory::MemoryRecipeStore;

/// Opens the store selected by `config`.
pub async fn open_store(config: &StoreConfig) -> Result<Arc<dyn RecipeStore>> {
    match config.backend {
        StoreBackend::Memory => {
            info!("Using in-memory recipe store");
            Ok(Arc::new(MemoryRecipeStore::new()))
        }
        StoreBackend::File => Ok(Arc::new(FileRecipeStore::open(&config.path).await?)),
    }
}
