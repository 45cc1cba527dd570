//! Ports Layer - Trait definitions for external dependencies
//!
//! This module defines the interfaces (ports) that adapters must implement.
//! Following hexagonal architecture, these traits abstract:
//! - Market data lookups (DexScreener pairs)

pub mod market_data;
pub mod mocks;
pub mod models;

pub use market_data::{FetchError, MarketDataFetcher};
pub use models::{Liquidity, PairRecord, PairsResponse, WindowStats};
