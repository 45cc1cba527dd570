//! Upstream market data models
//!
//! Mirrors the subset of the DexScreener `/latest/dex/pairs` response the
//! proxy relies on. Everything is optional at this layer: presence rules are
//! enforced when a pair is normalized, so a sparse record decodes cleanly and
//! fails later with a precise shape error instead of a generic parse error.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Response body of `GET /latest/dex/pairs/{chain}/{address}`
///
/// Pairs are kept as raw JSON. Only the first one is ever read, so a
/// malformed record further down the list cannot fail the request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PairsResponse {
    #[serde(rename = "schemaVersion", default, skip_serializing_if = "Option::is_none")]
    pub schema_version: Option<String>,
    /// DexScreener returns `null` when nothing matches
    #[serde(default)]
    pub pairs: Option<Vec<Value>>,
}

impl PairsResponse {
    /// Wrap a list of typed pairs
    pub fn with_pairs(pairs: Vec<PairRecord>) -> Self {
        Self {
            schema_version: None,
            pairs: Some(
                pairs
                    .iter()
                    .map(|p| serde_json::to_value(p).unwrap_or_default())
                    .collect(),
            ),
        }
    }

    /// The authoritative pair (first element) as raw JSON, if any
    pub fn first_pair_raw(&self) -> Option<&Value> {
        self.pairs.as_ref().and_then(|p| p.first())
    }

    /// Decode the authoritative pair; `None` when the list is absent or empty
    pub fn first_pair(&self) -> Option<Result<PairRecord, serde_json::Error>> {
        self.first_pair_raw().map(PairRecord::deserialize)
    }
}

/// Single trading-pair record
///
/// Figures are carried as raw JSON values so they are served exactly as
/// received, whatever their type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PairRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Usually a decimal string, occasionally a number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_usd: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_change: Option<WindowStats>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<WindowStats>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub liquidity: Option<Liquidity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub market_cap: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_token: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quote_token: Option<Value>,
}

/// Rolling-window figures (`m5`, `h1`, `h6`, `h24`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WindowStats {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub m5: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub h1: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub h6: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub h24: Option<Value>,
}

impl WindowStats {
    /// Only the 24h figure set
    pub fn h24(value: impl Into<Value>) -> Self {
        Self {
            h24: Some(value.into()),
            ..Default::default()
        }
    }
}

/// Pool liquidity
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Liquidity {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usd: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quote: Option<Value>,
}
