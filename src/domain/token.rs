//! Normalized token payload
//!
//! The proxy never forwards the raw upstream pair. It copies a fixed subset
//! of fields verbatim (no unit conversion, no rounding) into `TokenSnapshot`.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::ports::models::{PairRecord, PairsResponse};

/// Upstream body did not have the shape the proxy relies on
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShapeError {
    #[error("Upstream response contains no pairs")]
    NoPairs,

    #[error("Upstream pair is missing `{0}`")]
    MissingField(&'static str),

    #[error("Upstream pair is malformed: {0}")]
    InvalidPair(String),
}

/// Payload served by `GET /api/token/{chain}/{contractAddress}`
///
/// Leaf values absent upstream are omitted from the JSON output rather than
/// serialized as `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenSnapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_usd: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_change_24h: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume_24h: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pair_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub liquidity_usd: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub market_cap: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_token: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quote_token: Option<Value>,
}

impl TokenSnapshot {
    /// Normalize the authoritative (first) pair of an upstream response
    pub fn from_response(response: &PairsResponse) -> Result<Self, ShapeError> {
        let pair = response
            .first_pair()
            .ok_or(ShapeError::NoPairs)?
            .map_err(|e| ShapeError::InvalidPair(e.to_string()))?;
        Self::from_pair(&pair)
    }

    /// Extract the served fields from a pair record.
    ///
    /// `priceChange`, `volume` and `liquidity` must be present as objects;
    /// their individual figures and every top-level field may be absent.
    pub fn from_pair(pair: &PairRecord) -> Result<Self, ShapeError> {
        let price_change = pair
            .price_change
            .as_ref()
            .ok_or(ShapeError::MissingField("priceChange"))?;
        let volume = pair
            .volume
            .as_ref()
            .ok_or(ShapeError::MissingField("volume"))?;
        let liquidity = pair
            .liquidity
            .as_ref()
            .ok_or(ShapeError::MissingField("liquidity"))?;

        Ok(Self {
            price_usd: pair.price_usd.clone(),
            price_change_24h: price_change.h24.clone(),
            volume_24h: volume.h24.clone(),
            pair_link: pair.url.clone(),
            liquidity_usd: liquidity.usd.clone(),
            market_cap: pair.market_cap.clone(),
            base_token: pair.base_token.clone(),
            quote_token: pair.quote_token.clone(),
        })
    }

    /// Symbol of the base token, when upstream provided one
    pub fn base_symbol(&self) -> Option<&str> {
        self.base_token
            .as_ref()
            .and_then(|t| t.get("symbol"))
            .and_then(Value::as_str)
    }
}
