//! Idempotent bulk load.

use std::fmt;

use recipedb_core::{CoreResult, Predicate, Recipe, RecipeStore};
use tracing::{info, warn};

/// Result of a load attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The store already held records; nothing was written.
    Skipped { existing: u64 },
    /// The store was empty and every record was inserted.
    Inserted { count: usize },
}

impl fmt::Display for LoadOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Skipped { .. } => f.write_str("skipped"),
            Self::Inserted { count } => write!(f, "inserted {count}"),
        }
    }
}

/// Inserts `records` only when the store is empty.
///
/// This is not a merge: a store holding any record is left untouched. When
/// another loader wins the race between the count and the insert, the
/// outcome is reported as skipped.
pub async fn load(store: &dyn RecipeStore, records: Vec<Recipe>) -> CoreResult<LoadOutcome> {
    let everything = Predicate::all();

    let existing = store.count(&everything).await?;
    if existing > 0 {
        info!(existing, "Store already populated; skipping load");
        return Ok(LoadOutcome::Skipped { existing });
    }

    match store.insert_if_empty(records).await? {
        Some(count) => {
            info!(count, "Loaded recipes");
            Ok(LoadOutcome::Inserted { count })
        }
        None => {
            let existing = store.count(&everything).await?;
            warn!(existing, "Store was populated concurrently; skipping load");
            Ok(LoadOutcome::Skipped { existing })
        }
    }
}
