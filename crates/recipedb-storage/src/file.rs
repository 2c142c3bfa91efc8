//! File-backed recipe store
//!
//! Records live in memory and are mirrored to a single JSON document on disk.
//! Every write rewrites the document through a temporary sibling file that is
//! renamed into place, so readers of the file never observe a torn write.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, info};

use recipedb_core::{
    CoreError, FindOptions, Predicate, Recipe, RecipeStore, StoreStatus, StoredRecipe,
};

use crate::error::{closed, Result};
use crate::scan;

/// Recipe store persisted as a JSON array of stored records.
///
/// # Example
///
/// ```rust,no_run
/// use recipedb_core::{Predicate, RecipeStore};
/// use recipedb_storage::FileRecipeStore;
///
/// #[tokio::main]
/// async fn main() -> recipedb_core::CoreResult<()> {
///     let store = FileRecipeStore::open("./data/recipes.json").await?;
///     println!("{} recipes", store.count(&Predicate::all()).await?);
///     store.close().await
/// }
/// ```
pub struct FileRecipeStore {
    path: PathBuf,
    records: RwLock<Vec<StoredRecipe>>,
    closed: AtomicBool,
}

impl FileRecipeStore {
    /// Opens the store document, creating parent directories as needed.
    ///
    /// A missing document is treated as an empty store and is not created
    /// until the first write.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::IoError` when the document cannot be read and
    /// `CoreError::DeserializationError` when it does not hold stored records.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let records = match tokio::fs::read(&path).await {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Vec::new(),
            Ok(bytes) => serde_json::from_slice::<Vec<StoredRecipe>>(&bytes)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(CoreError::from(e)),
        };

        info!(
            path = %path.display(),
            records = records.len(),
            "Opened file recipe store"
        );

        Ok(Self {
            path,
            records: RwLock::new(records),
            closed: AtomicBool::new(false),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn ensure_open(&self) -> Result<()> {
        if self.closed.load(Ordering::Acquire) {
            return Err(closed());
        }
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    async fn persist(&self, records: &[StoredRecipe]) -> Result<()> {
        let data = serde_json::to_vec(records)?;
        let temp = self.temp_path();

        tokio::fs::write(&temp, &data).await?;
        tokio::fs::rename(&temp, &self.path).await?;

        debug!(
            path = %self.path.display(),
            bytes = data.len(),
            "Persisted recipe store"
        );
        Ok(())
    }

    /// Appends `recipes` to `current` and persists before committing, so a
    /// failed write leaves the in-memory view untouched.
    async fn append(&self, current: &mut Vec<StoredRecipe>, recipes: Vec<Recipe>) -> Result<usize> {
        let inserted = recipes.len();
        let mut next = current.clone();
        next.extend(recipes.into_iter().map(StoredRecipe::assign));

        self.persist(&next).await?;
        *current = next;
        Ok(inserted)
    }
}

#[async_trait]
impl RecipeStore for FileRecipeStore {
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
        let records = self.records.read().await;
        Ok(scan::select(&records, predicate, options))
    }

    async fn count(&self, predicate: &Predicate) -> Result<u64> {
        self.ensure_open()?;
        let records = self.records.read().await;
        Ok(scan::count(&records, predicate))
    }

    async fn insert_many(&self, recipes: Vec<Recipe>) -> Result<usize> {
        self.ensure_open()?;
        let mut records = self.records.write().await;
        self.append(&mut records, recipes).await
    }

    async fn insert_if_empty(&self, recipes: Vec<Recipe>) -> Result<Option<usize>> {
        self.ensure_open()?;
        let mut records = self.records.write().await;
        if !records.is_empty() {
            return Ok(None);
        }
        self.append(&mut records, recipes).await.map(Some)
    }

    async fn close(&self) -> Result<()> {
        // Wait for in-flight writes before refusing new calls.
        let _records = self.records.write().await;
        self.closed.store(true, Ordering::Release);
        info!(path = %self.path.display(), "Closed file recipe store");
        Ok(())
    }
}
