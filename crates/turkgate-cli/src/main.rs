use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod cli;

use cli::Cli;
use turkgate_core::Credentials;
use turkgate_manager::TurkGateManager;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "turkgate=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment variables
    dotenv::dotenv().ok();

    // Parse CLI arguments
    let cli = Cli::parse();

    run(cli).await
}

async fn run(cli: Cli) -> Result<()> {
    let credentials = Credentials::load(Some(&cli.credentials))?;

    let manager = TurkGateManager::connect(&credentials).await?;

    let result = commands::execute(cli.command, &manager).await;

    // Release the pool on every exit path before surfacing the outcome.
    manager.close().await;

    result
}
