//! CLI Command Handlers
//!
//! Implementation of all CLI commands for the token proxy.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::adapters::http::{run_server, AppState};
use crate::application::TokenService;
use crate::config::Config;

/// token-proxy - cached DexScreener token data over HTTP
#[derive(Parser, Debug)]
#[command(
    name = "token-proxy",
    version = env!("CARGO_PKG_VERSION"),
    author = env!("CARGO_PKG_AUTHORS"),
    about = "Cached DexScreener token data proxy",
    long_about = "token-proxy serves normalized price, volume, liquidity and market cap data \
                  for allow-listed chains, backed by DexScreener with a short time-window cache."
)]
pub struct CliApp {
    /// The command to execute
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP server
    Serve(ServeCmd),

    /// Fetch one token through the proxy pipeline and print the payload
    Lookup(LookupCmd),
}

impl Command {
    /// Config file given to the command, if any
    pub fn config_path(&self) -> Option<&PathBuf> {
        match self {
            Command::Serve(cmd) => cmd.config.as_ref(),
            Command::Lookup(cmd) => cmd.config.as_ref(),
        }
    }
}

/// Run the HTTP server
#[derive(Parser, Debug)]
pub struct ServeCmd {
    /// Path to configuration file (defaults are used when omitted)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Override bind host
    #[arg(long, value_name = "HOST")]
    pub host: Option<String>,

    /// Override listen port
    #[arg(short, long, value_name = "PORT")]
    pub port: Option<u16>,

    /// Override upstream base URL
    #[arg(long, value_name = "URL")]
    pub upstream_url: Option<String>,
}

/// One-shot token lookup
#[derive(Parser, Debug)]
pub struct LookupCmd {
    /// Chain identifier (e.g., ethereum)
    #[arg(value_name = "CHAIN")]
    pub chain: String,

    /// Token contract address (0x + 40 hex characters)
    #[arg(value_name = "ADDRESS")]
    pub contract_address: String,

    /// Path to configuration file (defaults are used when omitted)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Override upstream base URL
    #[arg(long, value_name = "URL")]
    pub upstream_url: Option<String>,

    /// Print compact JSON instead of pretty-printed
    #[arg(long)]
    pub compact: bool,
}

/// Execute a parsed command against a resolved configuration
pub async fn execute(command: Command, config: Config) -> Result<()> {
    match command {
        Command::Serve(cmd) => serve_command(cmd, config).await,
        Command::Lookup(cmd) => lookup_command(cmd, config).await,
    }
}

async fn serve_command(cmd: ServeCmd, mut config: Config) -> Result<()> {
    if let Some(host) = cmd.host {
        config.server.host = host;
    }
    if let Some(port) = cmd.port {
        config.server.port = port;
    }
    if let Some(url) = cmd.upstream_url {
        config.upstream.base_url = url;
    }
    config.validate().context("Invalid configuration")?;

    tracing::info!(
        upstream = %config.upstream.base_url,
        timeout_secs = config.upstream.timeout_secs,
        cache_ms = config.cache.duration_ms,
        freshness = %config.cache.freshness,
        "Starting token proxy"
    );

    let service = TokenService::from_config(&config).context("Failed to create upstream client")?;
    run_server(&config.server.host, config.server.port, AppState::new(service)).await
}

async fn lookup_command(cmd: LookupCmd, mut config: Config) -> Result<()> {
    if let Some(url) = cmd.upstream_url {
        config.upstream.base_url = url;
    }
    config.validate().context("Invalid configuration")?;

    let service = TokenService::from_config(&config).context("Failed to create upstream client")?;
    let snapshot = service
        .handle_token_request(&cmd.chain, &cmd.contract_address)
        .await
        .map_err(|e| anyhow::anyhow!("{} ({})", e.public_message(), e))?;

    let output = if cmd.compact {
        serde_json::to_string(&snapshot)?
    } else {
        serde_json::to_string_pretty(&snapshot)?
    };
    println!("{}", output);
    Ok(())
}
