//! Docfields server binary
//!
//! Starts the HTTP extraction service.

use anyhow::Context;
use clap::Parser;
use docfields_server::{config::ServerConfig, init_tracing, start_server};
use std::path::PathBuf;
use std::process;
use tracing::warn;

/// Field extraction and PDF chunking service
#[derive(Debug, Parser)]
#[command(name = "docfields-server", version, about)]
struct Cli {
    /// Load configuration from a TOML file
    #[arg(long, env = "DOCFIELDS_CONFIG")]
    config: Option<PathBuf>,

    /// Override the bind address
    #[arg(long)]
    bind_address: Option<String>,

    /// Override the bind port
    #[arg(long)]
    bind_port: Option<u16>,
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    // A missing .env file is fine; the environment may already be set
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => ServerConfig::from_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => {
            warn!("No config file specified, using defaults");
            ServerConfig::default()
        }
    };

    if let Some(address) = cli.bind_address {
        config.bind_address = address;
    }
    if let Some(port) = cli.bind_port {
        config.bind_port = port;
    }

    start_server(config).await?;

    Ok(())
}
