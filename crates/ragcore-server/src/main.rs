//! RAGCore server entry point.
//!
//! Loads configuration, wires the application services, and launches the
//! Rocket HTTP surface of §6.

use clap::Parser;
use ragcore_infrastructure::config::ConfigLoader;
use ragcore_infrastructure::{bootstrap_services, logging};

/// Command line interface for the RAGCore server.
#[derive(Parser, Debug)]
#[command(name = "ragcore")]
#[command(about = "RAGCore - hybrid retrieval-augmented generation service")]
#[command(version)]
struct Cli {
    /// Path to a `ragcore.toml` configuration file.
    #[arg(short, long)]
    config: Option<std::path::PathBuf>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[rocket::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    logging::init_logging(&cli.log_level, logging::LogFormat::Pretty, None)?;

    let mut loader = ConfigLoader::new();
    if let Some(path) = &cli.config {
        loader = loader.with_config_path(path);
    }
    let config = loader.load()?;

    tracing::info!(app = %config.app_name, version = %config.app_version, "starting ragcore");

    let services = bootstrap_services(&config).await?;
    ragcore_server::build_rocket(services)
        .launch()
        .await
        .map_err(|e| format!("rocket launch failed: {e}"))?;

    Ok(())
}
