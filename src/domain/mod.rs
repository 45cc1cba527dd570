//! Domain Layer - Core logic for the token proxy
//!
//! Pure types and logic with no I/O. All external interactions happen
//! through the ports layer.
//!
//! - `validator`: chain allow-list and contract address checks
//! - `token`: normalized payload built from an upstream pair
//! - `cache`: time-window snapshot cache

pub mod cache;
pub mod token;
pub mod validator;

pub use cache::{cache_key, CacheStats, FreshnessMode, TokenCache, DEFAULT_CACHE_DURATION};
pub use token::{ShapeError, TokenSnapshot};
pub use validator::{
    is_allowed_chain, is_valid_contract_address, ChainAllowList, DEFAULT_ALLOWED_CHAINS,
};
