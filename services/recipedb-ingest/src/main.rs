use std::path::PathBuf;

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use recipedb_core::config::StoreBackend;
use recipedb_core::{RecipeDbConfig, RecipeStore};
use recipedb_ingest::IngestPipeline;
use recipedb_storage::open_store;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "recipedb-ingest")]
#[command(about = "Load a recipe payload into an empty RecipeDB store", long_about = None)]
#[command(version)]
struct Cli {
    /// Payload file (JSON object or array of recipes)
    #[arg(long)]
    file: PathBuf,

    /// Store document path; overrides the configured store
    #[arg(long, env = "RECIPEDB_INGEST_STORE")]
    store: Option<PathBuf>,

    /// Configuration file (defaults to the standard search locations)
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    init_logging();

    let args = Cli::parse();

    let mut config = match &args.config {
        Some(path) => RecipeDbConfig::from_file(path)?,
        None => RecipeDbConfig::load()?,
    };
    if let Some(store) = args.store {
        config.store.backend = StoreBackend::File;
        config.store.path = store;
    }

    info!("Starting RecipeDB ingest");
    info!("File: {}", args.file.display());
    info!("Store: {}", config.store.path.display());

    let store = open_store(&config.store).await?;

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed_precise}] {msg}")?,
    );
    pb.set_message("Initializing...");

    let result = IngestPipeline::new(store.clone())
        .ingest_file(&args.file, Some(&pb))
        .await;
    store.close().await?;

    match result {
        Ok(stats) => {
            info!(
                parsed = stats.parsed,
                duration_secs = stats.duration_secs,
                "Ingest complete"
            );
            println!("{}", stats.outcome);
            Ok(())
        }
        Err(e) => {
            pb.abandon_with_message("Ingest failed");
            eprintln!("Ingest failed: {e}");
            Err(e.into())
        }
    }
}

/// Initialize logging on stderr; stdout carries only the outcome line
fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
