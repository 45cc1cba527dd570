//! Test doubles for the market data port
//!
//! `ScriptedFetcher` records every call and replays configured responses, so
//! integration tests can count upstream hits without any network.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::market_data::{FetchError, MarketDataFetcher};
use super::models::{Liquidity, PairRecord, PairsResponse, WindowStats};

/// Response replayed by [`ScriptedFetcher`]
pub type ScriptedResponse = Result<PairsResponse, FetchError>;

/// Mock fetcher that records calls and allows controlled responses
///
/// Lookup order per call: queued one-shot responses for the cache key, then
/// the sticky per-key response, then the default response.
#[derive(Debug, Clone, Default)]
pub struct ScriptedFetcher {
    calls: Arc<Mutex<Vec<(String, String)>>>,
    queued: Arc<Mutex<HashMap<String, VecDeque<ScriptedResponse>>>>,
    sticky: Arc<Mutex<HashMap<String, ScriptedResponse>>>,
    default: Arc<Mutex<Option<ScriptedResponse>>>,
}

impl ScriptedFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Respond with `response` for any chain/address not otherwise scripted
    pub fn with_default(self, response: ScriptedResponse) -> Self {
        *self.default.lock().unwrap() = Some(response);
        self
    }

    /// Respond with `response` every time this chain/address is requested
    pub fn with_response(self, chain: &str, address: &str, response: ScriptedResponse) -> Self {
        self.sticky
            .lock()
            .unwrap()
            .insert(Self::key(chain, address), response);
        self
    }

    /// Respond with `response` once for this chain/address, ahead of sticky ones
    pub fn push_response(&self, chain: &str, address: &str, response: ScriptedResponse) {
        self.queued
            .lock()
            .unwrap()
            .entry(Self::key(chain, address))
            .or_default()
            .push_back(response);
    }

    /// All recorded calls as (chain, address)
    pub fn get_calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    fn key(chain: &str, address: &str) -> String {
        format!("{}-{}", chain, address)
    }
}

#[async_trait]
impl MarketDataFetcher for ScriptedFetcher {
    async fn fetch_pairs(
        &self,
        chain: &str,
        contract_address: &str,
    ) -> Result<PairsResponse, FetchError> {
        self.calls
            .lock()
            .unwrap()
            .push((chain.to_string(), contract_address.to_string()));

        let key = Self::key(chain, contract_address);
        if let Some(next) = self
            .queued
            .lock()
            .unwrap()
            .get_mut(&key)
            .and_then(|q| q.pop_front())
        {
            return next;
        }
        if let Some(sticky) = self.sticky.lock().unwrap().get(&key) {
            return sticky.clone();
        }
        self.default
            .lock()
            .unwrap()
            .clone()
            .unwrap_or_else(|| Err(FetchError::Transport("No response configured".to_string())))
    }
}

/// Pair record shaped like the DexScreener sample used across tests
pub fn sample_pair() -> PairRecord {
    PairRecord {
        url: Some("https://x".to_string()),
        price_usd: Some(serde_json::json!("1.23")),
        price_change: Some(WindowStats::h24(5)),
        volume: Some(WindowStats::h24(1000)),
        liquidity: Some(Liquidity {
            usd: Some(500.into()),
            ..Default::default()
        }),
        market_cap: Some(10000.into()),
        base_token: Some(serde_json::json!({"symbol": "A"})),
        quote_token: Some(serde_json::json!({"symbol": "B"})),
        ..Default::default()
    }
}

/// Response wrapping [`sample_pair`]
pub fn sample_response() -> PairsResponse {
    PairsResponse::with_pairs(vec![sample_pair()])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_scripted_fetcher_records_calls() {
        let mock = ScriptedFetcher::new().with_default(Ok(sample_response()));

        let result = mock.fetch_pairs("ethereum", "0xabc").await;
        assert_eq!(result, Ok(sample_response()));
        assert_eq!(
            mock.get_calls(),
            vec![("ethereum".to_string(), "0xabc".to_string())]
        );
    }

    #[tokio::test]
    async fn test_queued_response_wins_once() {
        let mock = ScriptedFetcher::new().with_response("ethereum", "0xabc", Ok(sample_response()));
        mock.push_response("ethereum", "0xabc", Err(FetchError::Status(503)));

        assert_eq!(
            mock.fetch_pairs("ethereum", "0xabc").await,
            Err(FetchError::Status(503))
        );
        assert!(mock.fetch_pairs("ethereum", "0xabc").await.is_ok());
        assert_eq!(mock.call_count(), 2);
    }

    #[tokio::test]
    async fn test_unconfigured_is_transport_error() {
        let mock = ScriptedFetcher::new();
        let result = mock.fetch_pairs("ethereum", "0xabc").await;
        assert!(matches!(result, Err(FetchError::Transport(_))));
    }
}
