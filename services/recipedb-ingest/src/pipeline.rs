use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use indicatif::ProgressBar;
use recipedb_core::{CoreError, RecipeStore};
use tracing::info;

use crate::loader::{load, LoadOutcome};
use crate::normalizer::parse_records;

/// Errors raised while ingesting a payload file
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Ingest statistics
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IngestStats {
    pub parsed: usize,
    pub outcome: LoadOutcome,
    pub duration_secs: f64,
}

/// Reads, normalizes and loads a payload file into a store
pub struct IngestPipeline {
    store: Arc<dyn RecipeStore>,
}

impl IngestPipeline {
    pub fn new(store: Arc<dyn RecipeStore>) -> Self {
        Self { store }
    }

    /// Ingests `path`, reporting progress on `pb` when given.
    ///
    /// Nothing is written when the payload is malformed.
    pub async fn ingest_file(
        &self,
        path: &Path,
        pb: Option<&ProgressBar>,
    ) -> Result<IngestStats, IngestError> {
        let start_time = Instant::now();
        let report = |msg: String| {
            if let Some(pb) = pb {
                pb.set_message(msg);
            }
        };

        report(format!("Reading {}...", path.display()));
        let raw = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| IngestError::Read {
                path: path.to_path_buf(),
                source,
            })?;

        report("Parsing payload...".to_string());
        let records = parse_records(&raw)?;
        let parsed = records.len();
        info!(parsed, file = %path.display(), "Parsed payload");

        report(format!("Loading {parsed} recipes..."));
        let outcome = load(self.store.as_ref(), records).await?;

        let duration_secs = start_time.elapsed().as_secs_f64();
        if let Some(pb) = pb {
            pb.finish_with_message(format!("{outcome} in {duration_secs:.2}s"));
        }

        Ok(IngestStats {
            parsed,
            outcome,
            duration_secs,
        })
    }
}
