//! token-proxy - Cached DexScreener token data proxy

use anyhow::{Context, Result};
use tracing_subscriber::{fmt, EnvFilter};

use token_proxy::adapters::cli::{self, CliApp};
use token_proxy::config::{load_config_or_default, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (PORT, DEXSCREENER_BASE_URL, RUST_LOG)
    dotenvy::dotenv().ok();

    let app = cli::init();
    let config = load_configuration(&app)?;
    init_logging(app.verbose, app.debug, &config.logging.level)?;

    cli::execute(app.command, config).await
}

fn load_configuration(app: &CliApp) -> Result<Config> {
    let path = app
        .command
        .config_path()
        .map(|p| shellexpand::tilde(&p.to_string_lossy()).to_string());

    let config = load_config_or_default(path.as_deref())
        .with_context(|| match &path {
            Some(p) => format!("Failed to load configuration from {}", p),
            None => "Failed to build default configuration".to_string(),
        })?;

    Ok(config.with_env_overrides())
}

/// Flags win over RUST_LOG, which wins over the config file level
fn init_logging(verbose: bool, debug: bool, config_level: &str) -> Result<()> {
    let filter = if debug {
        EnvFilter::new("debug")
    } else if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config_level))
    };

    fmt().with_env_filter(filter).init();
    Ok(())
}
