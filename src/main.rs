//! Prompthash - chat, prompt improvement, and model listing services
//!
#![doc = "Prompthash - chat, prompt improvement, and model listing services"]
#![doc = "Main entry point for the Prompthash API server and CLI."]

use anyhow::Result;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use prompthash::cli::{Cli, Commands};
use prompthash::commands;
use prompthash::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Pick up ASICLOUD_API_KEY and friends from a local .env
    let dotenv_path = dotenvy::dotenv().ok();

    // Parse command line arguments
    let cli = Cli::parse_args();

    // Initialize tracing
    init_tracing(cli.verbose, cli.json_logs);

    if let Some(path) = dotenv_path {
        tracing::debug!("Loaded environment from {}", path.display());
    }

    // Load configuration
    let config_path = cli.config.as_deref().unwrap_or("config/config.yaml");
    let config = Config::load(config_path, &cli)?;

    // Validate configuration
    config.validate()?;

    // Execute command
    match cli.command {
        Commands::Serve { service, .. } => {
            tracing::info!("Starting API server on {}", config.server.bind);
            commands::serve::run_serve(config, service).await?;
            Ok(())
        }
        Commands::Models { json } => {
            tracing::info!("Listing upstream models");
            commands::models::list_models(&config, json).await?;
            Ok(())
        }
    }
}

/// Initialize tracing subscriber with environment filter
fn init_tracing(verbose: bool, json: bool) {
    let default_directives = if verbose {
        "prompthash=debug,tower_http=debug"
    } else {
        "prompthash=info,tower_http=info"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives));

    let registry = tracing_subscriber::registry().with(env_filter);
    if json {
        registry.with(fmt::layer().json()).init();
    } else {
        registry.with(fmt::layer()).init();
    }
}
