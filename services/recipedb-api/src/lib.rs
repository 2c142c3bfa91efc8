pub mod bootstrap;
pub mod handlers;
pub mod rest;
pub mod state;
pub mod telemetry;

pub use rest::build_router;
pub use state::AppState;

use recipedb_core::{CoreError, CoreResult, RecipeDbConfig, RecipeStore};
use recipedb_query::PageDefaults;
use recipedb_storage::open_store;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::{info, warn};

/// Boots the RecipeDB API server and serves until a shutdown signal.
pub async fn run_server(config: RecipeDbConfig) -> CoreResult<()> {
    let addr: SocketAddr = config.api.bind_address.parse().map_err(|e| {
        CoreError::ValidationError(format!(
            "Invalid bind address '{}': {}",
            config.api.bind_address, e
        ))
    })?;

    // Open the store explicitly; it is closed again on shutdown
    let store = open_store(&config.store).await?;

    bootstrap::seed_store(&store, &config.store).await?;

    let state = AppState::new(store.clone(), PageDefaults::from(&config.query));
    let app = rest::build_router(state, &config.api);

    info!("Starting RecipeDB API server on {}", addr);

    // Bind TCP listener
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| CoreError::internal(format!("Failed to bind to {}: {}", addr, e)))?;

    info!("Server successfully bound to {}", addr);

    // Serve with graceful shutdown
    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| CoreError::internal(format!("Server error: {}", e)));

    if let Err(e) = store.close().await {
        warn!("Failed to close recipe store: {}", e);
    }

    served?;
    info!("RecipeDB API server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to install CTRL+C signal handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received CTRL+C signal, initiating graceful shutdown");
        }
        _ = terminate => {
            info!("Received SIGTERM signal, initiating graceful shutdown");
        }
    }
}
