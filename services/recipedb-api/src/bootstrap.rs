//! Startup seeding of an empty store.

use std::sync::Arc;

use recipedb_core::config::StoreConfig;
use recipedb_core::{CoreError, CoreResult, RecipeStore};
use recipedb_ingest::{IngestError, IngestPipeline, LoadOutcome};
use tracing::{debug, info};

/// Loads `store.seed_file` into the store when one is configured.
///
/// Uses the same idempotent load as the ingest tool, so restarting against a
/// populated store writes nothing.
pub async fn seed_store(
    store: &Arc<dyn RecipeStore>,
    config: &StoreConfig,
) -> CoreResult<Option<LoadOutcome>> {
    let Some(seed_file) = &config.seed_file else {
        debug!("No seed file configured");
        return Ok(None);
    };

    info!("Seeding recipe store from {}", seed_file.display());
    let stats = IngestPipeline::new(Arc::clone(store))
        .ingest_file(seed_file, None)
        .await
        .map_err(|e| match e {
            IngestError::Core(err) => err,
            other => CoreError::internal(other.to_string()),
        })?;

    info!(
        parsed = stats.parsed,
        outcome = %stats.outcome,
        "Seeding finished"
    );
    Ok(Some(stats.outcome))
}
