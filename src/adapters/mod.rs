//! Adapters Layer - External System Implementations
//!
//! This module contains implementations of the port traits and the outer
//! surfaces of the service:
//! - DexScreener: market data fetcher over reqwest
//! - HTTP: axum router and server lifecycle
//! - CLI: Command-line interface handlers

pub mod cli;
pub mod dexscreener;
pub mod http;

pub use cli::CliApp;
pub use dexscreener::{DexScreenerClient, DexScreenerConfig};
pub use http::{create_router, run_server, AppState};
