mod config;
mod error;
mod logging;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use rentcast::{RentcastTools, SERVER_NAME};
use rmcp::ServiceExt;
use tracing::{error, info};

use config::Config;
use error::{Error, Result};

#[derive(Parser)]
#[command(name = "rentcast-mcp")]
#[command(about = "MCP server for the RentCast property data API", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to a TOML config file (default: ./rentcast-mcp.toml if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Override the RentCast API base URL
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve MCP over stdin/stdout
    Serve,
    /// Print the tool catalog as JSON
    Tools,
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // A missing .env file is fine.
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    let config = load_config(&cli, |key| std::env::var(key).ok())?;
    logging::init(&config.log.level);

    match cli.command {
        Some(Commands::Serve) | None => cmd_serve(&config).await,
        Some(Commands::Tools) => cmd_tools(),
    }
}

/// File, then environment, then command-line overrides.
fn load_config(cli: &Cli, lookup: impl Fn(&str) -> Option<String>) -> Result<Config> {
    let mut config = Config::discover(cli.config.as_deref())?;
    config.apply_env(lookup)?;
    if let Some(base_url) = &cli.base_url {
        config.api.base_url = base_url.clone();
    }
    if let Some(level) = &cli.log_level {
        config.log.level = level.clone();
    }
    Ok(config)
}

async fn cmd_serve(config: &Config) -> Result<()> {
    info!("starting {SERVER_NAME} v{}", env!("CARGO_PKG_VERSION"));

    // Credential problems stop us here, before any input is read.
    let client = config.client()?;
    info!(base_url = %client.base_url(), "API key loaded");

    let service = RentcastTools::new(client)
        .serve(rmcp::transport::stdio())
        .await
        .map_err(|e| {
            error!(error = %e, "MCP initialization failed");
            Error::Serve(e.to_string())
        })?;
    let reason = service.waiting().await.map_err(|e| {
        error!(error = %e, "MCP service task failed");
        Error::Serve(e.to_string())
    })?;

    info!(?reason, "server stopped");
    Ok(())
}

fn cmd_tools() -> Result<()> {
    let tools: Vec<_> = rentcast::catalog::all()
        .iter()
        .map(|def| def.to_tool())
        .collect();
    let catalog = serde_json::json!({ "tools": tools });
    println!("{}", serde_json::to_string_pretty(&catalog)?);
    Ok(())
}
