//! Token Snapshot Cache
//!
//! Time-window cache keyed by `"{chain}-{contractAddress}"`.
//!
//! In the default `Global` mode there is ONE freshness timestamp for the whole
//! cache: every `set` refreshes it, and while it is younger than the window
//! every stored key is served, even keys written long before. `PerKey` mode
//! tracks an insertion instant per entry instead.
//!
//! Instants come from `tokio::time`, so a paused test runtime controls expiry.

use std::collections::HashMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::time::Instant;

use super::token::TokenSnapshot;

/// Default freshness window (30 000 ms)
pub const DEFAULT_CACHE_DURATION: Duration = Duration::from_millis(30_000);

/// How entry freshness is decided
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FreshnessMode {
    /// One shared timestamp, refreshed by any write
    #[default]
    Global,
    /// Each entry ages on its own
    PerKey,
}

impl std::fmt::Display for FreshnessMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FreshnessMode::Global => write!(f, "global"),
            FreshnessMode::PerKey => write!(f, "per_key"),
        }
    }
}

/// Stored snapshot with its insertion instant
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub snapshot: TokenSnapshot,
    pub inserted_at: Instant,
}

/// Cache statistics
#[derive(Debug, Clone, PartialEq)]
pub struct CacheStats {
    pub entries: usize,
    pub mode: FreshnessMode,
    /// Global clock freshness (always false in `PerKey` mode)
    pub globally_fresh: bool,
    /// Time since the last write, if any
    pub last_refresh_age: Option<Duration>,
}

/// Build the cache key for a chain / contract pair, both verbatim
pub fn cache_key(chain: &str, contract_address: &str) -> String {
    format!("{}-{}", chain, contract_address)
}

#[derive(Debug)]
pub struct TokenCache {
    entries: HashMap<String, CacheEntry>,
    /// Last write instant; `None` until the first write
    refreshed_at: Option<Instant>,
    duration: Duration,
    mode: FreshnessMode,
}

impl TokenCache {
    /// Create an empty, stale cache in global mode with the default window
    pub fn new() -> Self {
        Self::with_config(DEFAULT_CACHE_DURATION, FreshnessMode::Global)
    }

    pub fn with_config(duration: Duration, mode: FreshnessMode) -> Self {
        Self {
            entries: HashMap::new(),
            refreshed_at: None,
            duration,
            mode,
        }
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn mode(&self) -> FreshnessMode {
        self.mode
    }

    /// Stored snapshot for `key`, regardless of freshness
    pub fn get(&self, key: &str) -> Option<&TokenSnapshot> {
        self.entries.get(key).map(|e| &e.snapshot)
    }

    /// Store a snapshot and refresh the global timestamp.
    ///
    /// The timestamp moves on every write, which makes the whole cache fresh
    /// again in `Global` mode.
    pub fn set(&mut self, key: impl Into<String>, snapshot: TokenSnapshot) {
        let now = Instant::now();
        self.entries.insert(
            key.into(),
            CacheEntry {
                snapshot,
                inserted_at: now,
            },
        );
        self.refreshed_at = Some(now);
    }

    /// Global clock check: last write happened less than `duration` ago
    pub fn is_fresh(&self) -> bool {
        self.refreshed_at
            .map(|at| at.elapsed() < self.duration)
            .unwrap_or(false)
    }

    /// Snapshot for `key` if it may be served without an upstream call
    pub fn lookup(&self, key: &str) -> Option<&TokenSnapshot> {
        match self.mode {
            FreshnessMode::Global => {
                if self.is_fresh() {
                    self.get(key)
                } else {
                    None
                }
            }
            FreshnessMode::PerKey => self
                .entries
                .get(key)
                .filter(|e| e.inserted_at.elapsed() < self.duration)
                .map(|e| &e.snapshot),
        }
    }

    /// Number of stored entries (fresh or not)
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.entries.len(),
            mode: self.mode,
            globally_fresh: self.mode == FreshnessMode::Global && self.is_fresh(),
            last_refresh_age: self.refreshed_at.map(|at| at.elapsed()),
        }
    }
}

impl Default for TokenCache {
    fn default() -> Self {
        Self::new()
    }
}
