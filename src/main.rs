//! Strictly Duel - server and line client.

#![warn(missing_docs)]

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use strictly_duel::{Acceptor, ServerConfig};
use tracing::{info, instrument};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    initialize_tracing();

    match cli.command {
        Command::Serve { config, host, port } => run_server(config, host, port).await,
        Command::Client { name, host, port } => strictly_duel::run_client(&host, port, &name).await,
    }
}

/// Run the game server
#[instrument(skip_all, fields(config_path = %config.display()))]
async fn run_server(
    config: std::path::PathBuf,
    host: Option<String>,
    port: Option<u16>,
) -> Result<()> {
    let config = ServerConfig::load_or_default(&config)?.with_overrides(host, port);
    info!(?config, "Starting Strictly Duel server");

    let acceptor = Acceptor::bind(&config).await?;
    acceptor.run().await?;

    Ok(())
}

fn initialize_tracing() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,strictly_duel=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
