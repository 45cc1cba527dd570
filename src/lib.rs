//! token-proxy - Cached DexScreener token data proxy
//!
//! Serves normalized trading data (price, volume, liquidity, market cap) for
//! allow-listed chains, with a short time-window cache in front of the
//! upstream provider.
//!
//! # Modules
//!
//! - `domain`: Core logic (validation, normalized payload, cache)
//! - `ports`: Trait abstractions (MarketDataFetcher) and test doubles
//! - `adapters`: External implementations (DexScreener, HTTP, CLI)
//! - `config`: Configuration loading and validation
//! - `application`: Token request service

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
