//! DexScreener Adapter
//!
//! reqwest-backed implementation of the market data port.

mod client;

pub use client::{DexScreenerClient, DexScreenerConfig, DEFAULT_TIMEOUT, DEXSCREENER_BASE_URL};
