//! Shopcart Core server binary
//!
//! ```bash
//! # Serve the API (default)
//! shopcart-core serve
//!
//! # Create the database if needed and apply migrations
//! shopcart-core migrate
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use shopcart_core::{config::Config, migration, server, telemetry};
use tracing::info;

#[derive(Parser)]
#[command(name = "shopcart-core")]
#[command(author, version, about = "Shopcart commerce backend")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP API server
    Serve,
    /// Apply database migrations and exit
    Migrate,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    let prometheus_handle = telemetry::init(&config.telemetry)?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => {
            info!("Starting Shopcart Core Service");
            info!("HTTP server listening on {}", config.http_addr());
            server::run(config, prometheus_handle).await
        }
        Command::Migrate => migration::run_migrations(&config).await,
    }
}
