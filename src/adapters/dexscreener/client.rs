//! DexScreener Pairs Client
//!
//! Implements `MarketDataFetcher` over `GET {base}/latest/dex/pairs/{chain}/{address}`.
//! One request per call, bounded by the configured timeout, no retries.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::ports::{FetchError, MarketDataFetcher, PairsResponse};

/// Public DexScreener API
pub const DEXSCREENER_BASE_URL: &str = "https://api.dexscreener.com";

/// Request timeout - DexScreener normally answers well under a second
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration for the DexScreenerClient
#[derive(Debug, Clone)]
pub struct DexScreenerConfig {
    /// API base URL, without trailing slash
    pub base_url: String,
    /// Request timeout (connect + body)
    pub timeout: Duration,
}

impl Default for DexScreenerConfig {
    fn default() -> Self {
        Self {
            base_url: DEXSCREENER_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl DexScreenerConfig {
    /// Create config with a custom base URL
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }
}

/// Client for the DexScreener pairs endpoint
#[derive(Debug, Clone)]
pub struct DexScreenerClient {
    config: DexScreenerConfig,
    http: Client,
}

impl DexScreenerClient {
    /// Create a new client against the public API
    pub fn new() -> Result<Self, FetchError> {
        Self::with_config(DexScreenerConfig::default())
    }

    /// Create a new client with custom configuration
    pub fn with_config(mut config: DexScreenerConfig) -> Result<Self, FetchError> {
        config.base_url = config.base_url.trim_end_matches('/').to_string();

        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| FetchError::Transport(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { config, http })
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// URL for a chain / contract lookup; both segments are passed verbatim
    pub fn pairs_url(&self, chain: &str, contract_address: &str) -> String {
        format!(
            "{}/latest/dex/pairs/{}/{}",
            self.config.base_url, chain, contract_address
        )
    }
}

fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        FetchError::Timeout
    } else {
        FetchError::Transport(err.to_string())
    }
}

#[async_trait]
impl MarketDataFetcher for DexScreenerClient {
    async fn fetch_pairs(
        &self,
        chain: &str,
        contract_address: &str,
    ) -> Result<PairsResponse, FetchError> {
        let url = self.pairs_url(chain, contract_address);
        tracing::debug!(url = %url, "Fetching DexScreener pairs");

        let response = self.http.get(&url).send().await.map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!(url = %url, status = status.as_u16(), "DexScreener returned error status");
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response.bytes().await.map_err(map_reqwest_error)?;
        serde_json::from_slice(&body).map_err(|e| FetchError::Decode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = DexScreenerClient::new();
        assert!(client.is_ok());
        assert_eq!(client.unwrap().base_url(), "https://api.dexscreener.com");
    }

    #[test]
    fn test_pairs_url_template() {
        let client =
            DexScreenerClient::with_config(DexScreenerConfig::with_base_url("http://localhost:9000/"))
                .unwrap();
        assert_eq!(
            client.pairs_url("ethereum", "0xabc"),
            "http://localhost:9000/latest/dex/pairs/ethereum/0xabc"
        );
    }

    #[tokio::test]
    async fn test_unreachable_upstream_is_transport_error() {
        // Port 9 (discard) on localhost is expected to refuse connections
        let client = DexScreenerClient::with_config(DexScreenerConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            timeout: Duration::from_secs(2),
        })
        .unwrap();

        let result = client.fetch_pairs("ethereum", "0xabc").await;
        assert!(matches!(
            result,
            Err(FetchError::Transport(_)) | Err(FetchError::Timeout)
        ));
    }
}
