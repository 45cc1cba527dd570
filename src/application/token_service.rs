//! Token Service
//!
//! Fetch-and-normalize flow behind `GET /api/token/{chain}/{contractAddress}`:
//! validate -> cache lookup -> upstream fetch -> normalize -> cache write.
//!
//! Every failure is returned as a `TokenRequestError`; the HTTP adapter maps
//! it to a status code and a stable public message.

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::RwLock;

use crate::adapters::dexscreener::{DexScreenerClient, DexScreenerConfig};
use crate::config::Config;
use crate::domain::{
    cache_key, is_valid_contract_address, ChainAllowList, ShapeError, TokenCache, TokenSnapshot,
};
use crate::ports::{FetchError, MarketDataFetcher};

pub const MSG_INVALID_CHAIN: &str = "Invalid blockchain chain";
pub const MSG_INVALID_ADDRESS: &str = "Invalid contract address format";
pub const MSG_UPSTREAM_UNAVAILABLE: &str = "Failed to fetch data from Dexscreener API";
pub const MSG_INTERNAL: &str = "Internal server error";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenRequestError {
    #[error("Invalid blockchain chain: {0}")]
    InvalidChain(String),

    #[error("Invalid contract address format: {0}")]
    InvalidContractAddress(String),

    /// Non-2xx answer or timeout (`status` is `None` for timeouts)
    #[error("Upstream unavailable (status {status:?})")]
    UpstreamUnavailable { status: Option<u16> },

    #[error("Unexpected upstream shape: {0}")]
    UpstreamShape(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl TokenRequestError {
    /// HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            TokenRequestError::InvalidChain(_) | TokenRequestError::InvalidContractAddress(_) => {
                400
            }
            TokenRequestError::UpstreamUnavailable { .. } => 502,
            TokenRequestError::UpstreamShape(_) | TokenRequestError::Internal(_) => 500,
        }
    }

    /// Message exposed to clients; never carries internal detail
    pub fn public_message(&self) -> &'static str {
        match self {
            TokenRequestError::InvalidChain(_) => MSG_INVALID_CHAIN,
            TokenRequestError::InvalidContractAddress(_) => MSG_INVALID_ADDRESS,
            TokenRequestError::UpstreamUnavailable { .. } => MSG_UPSTREAM_UNAVAILABLE,
            TokenRequestError::UpstreamShape(_) | TokenRequestError::Internal(_) => MSG_INTERNAL,
        }
    }

    pub fn is_client_error(&self) -> bool {
        self.status_code() == 400
    }
}

impl From<FetchError> for TokenRequestError {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::Status(status) => TokenRequestError::UpstreamUnavailable {
                status: Some(status),
            },
            FetchError::Timeout => TokenRequestError::UpstreamUnavailable { status: None },
            FetchError::Transport(msg) => TokenRequestError::Internal(msg),
            FetchError::Decode(msg) => TokenRequestError::Internal(msg),
        }
    }
}

impl From<ShapeError> for TokenRequestError {
    fn from(err: ShapeError) -> Self {
        TokenRequestError::UpstreamShape(err.to_string())
    }
}

/// Orchestrates token requests against a fetcher and an owned cache
pub struct TokenService {
    fetcher: Arc<dyn MarketDataFetcher>,
    cache: RwLock<TokenCache>,
    chains: ChainAllowList,
}

impl TokenService {
    /// Create a service with the default allow-list and a fresh default cache
    pub fn new(fetcher: Arc<dyn MarketDataFetcher>) -> Self {
        Self::with_parts(fetcher, TokenCache::new(), ChainAllowList::default())
    }

    /// Create a service from explicit collaborators
    pub fn with_parts(
        fetcher: Arc<dyn MarketDataFetcher>,
        cache: TokenCache,
        chains: ChainAllowList,
    ) -> Self {
        tracing::debug!(
            window_ms = cache.duration().as_millis() as u64,
            freshness = %cache.mode(),
            chains = ?chains.sorted(),
            "Token service configured"
        );
        Self {
            fetcher,
            cache: RwLock::new(cache),
            chains,
        }
    }

    /// Wire a DexScreener-backed service from resolved configuration
    pub fn from_config(config: &Config) -> Result<Self, FetchError> {
        let client = DexScreenerClient::with_config(DexScreenerConfig {
            base_url: config.upstream.base_url.clone(),
            timeout: config.upstream.timeout(),
        })?;

        Ok(Self::with_parts(
            Arc::new(client),
            TokenCache::with_config(config.cache.duration(), config.cache.freshness),
            config.chains.allow_list(),
        ))
    }

    pub fn allowed_chains(&self) -> &ChainAllowList {
        &self.chains
    }

    /// Serve one token request.
    ///
    /// Nothing is written to the cache unless the whole fetch + normalize
    /// path succeeds. The cache lock is never held across the upstream call.
    pub async fn handle_token_request(
        &self,
        chain: &str,
        contract_address: &str,
    ) -> Result<TokenSnapshot, TokenRequestError> {
        tracing::info!(chain = %chain, contract_address = %contract_address, "Request received");

        let result = self.resolve(chain, contract_address).await;
        if let Err(e) = &result {
            match e {
                e if e.is_client_error() => {
                    tracing::info!(chain = %chain, contract_address = %contract_address, error = %e, "Request rejected");
                }
                TokenRequestError::UpstreamUnavailable { status } => {
                    tracing::warn!(chain = %chain, contract_address = %contract_address, status = ?status, "Upstream fetch failed");
                }
                other => {
                    tracing::error!(chain = %chain, contract_address = %contract_address, error = %other, "Token request failed");
                }
            }
        }
        result
    }

    async fn resolve(
        &self,
        chain: &str,
        contract_address: &str,
    ) -> Result<TokenSnapshot, TokenRequestError> {
        if !self.chains.is_allowed(chain) {
            return Err(TokenRequestError::InvalidChain(chain.to_string()));
        }
        if !is_valid_contract_address(contract_address) {
            return Err(TokenRequestError::InvalidContractAddress(
                contract_address.to_string(),
            ));
        }

        let key = cache_key(chain, contract_address);

        // Freshness check and key lookup under a single guard
        if let Some(hit) = self.cache.read().await.lookup(&key).cloned() {
            tracing::debug!(cache_key = %key, "Cache hit");
            return Ok(hit);
        }

        let snapshot = self.fetch_snapshot(chain, contract_address).await?;

        let stats = {
            let mut cache = self.cache.write().await;
            cache.set(key.clone(), snapshot.clone());
            cache.stats()
        };

        tracing::info!(
            cache_key = %key,
            symbol = snapshot.base_symbol().unwrap_or("?"),
            entries = stats.entries,
            freshness = %stats.mode,
            payload = %serde_json::to_string(&snapshot).unwrap_or_default(),
            "Response data"
        );
        Ok(snapshot)
    }

    async fn fetch_snapshot(
        &self,
        chain: &str,
        contract_address: &str,
    ) -> Result<TokenSnapshot, TokenRequestError> {
        let response = self.fetcher.fetch_pairs(chain, contract_address).await?;
        Ok(TokenSnapshot::from_response(&response)?)
    }
}
