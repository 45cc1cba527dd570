//! Market data fetcher port
//!
//! The only suspending dependency of the request path. Adapters issue one
//! upstream call per invocation: no caching, no retries.

use async_trait::async_trait;
use thiserror::Error;

use super::models::PairsResponse;

/// Upstream fetch errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Upstream answered with a non-2xx status
    #[error("Upstream returned HTTP {0}")]
    Status(u16),

    /// Upstream did not answer within the configured timeout
    #[error("Upstream request timed out")]
    Timeout,

    /// Connection, DNS or TLS failure
    #[error("Transport error: {0}")]
    Transport(String),

    /// 2xx response whose body is not the expected JSON
    #[error("Failed to decode upstream body: {0}")]
    Decode(String),
}

/// Source of trading-pair data for a chain / contract address
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MarketDataFetcher: Send + Sync {
    /// Fetch `/latest/dex/pairs/{chain}/{contract_address}`
    async fn fetch_pairs(
        &self,
        chain: &str,
        contract_address: &str,
    ) -> Result<PairsResponse, FetchError>;
}
