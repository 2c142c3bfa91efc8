use recipedb_api::{run_server, telemetry};
use recipedb_core::RecipeDbConfig;

#[tokio::main]
async fn main() {
    telemetry::init_logging();

    let config = match RecipeDbConfig::load() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Failed to load configuration");
            std::process::exit(1);
        }
    };

    // Run server
    if let Err(err) = run_server(config).await {
        tracing::error!(error = %err, "Server terminated with error");
        std::process::exit(1);
    }
}
