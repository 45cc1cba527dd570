//! Request Validation
//!
//! Pure predicates applied to every token request before the cache or the
//! upstream are touched:
//! - Chain eligibility against an allow-list (case-insensitive)
//! - Contract address syntax (`0x` + 40 hex characters, no checksum)

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

/// Chains served when no allow-list is configured
pub const DEFAULT_ALLOWED_CHAINS: &[&str] = &["ethereum"];

static CONTRACT_ADDRESS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^0x[a-fA-F0-9]{40}$").expect("contract address pattern is valid"));

/// Set of chain identifiers the proxy is willing to forward upstream.
///
/// Entries are stored lowercased; membership checks fold the candidate
/// the same way so `Ethereum` and `ETHEREUM` are both accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainAllowList {
    chains: HashSet<String>,
}

impl ChainAllowList {
    /// Build an allow-list from any iterator of chain names
    pub fn new<I, S>(chains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            chains: chains
                .into_iter()
                .map(|c| c.as_ref().trim().to_lowercase())
                .filter(|c| !c.is_empty())
                .collect(),
        }
    }

    /// Check whether a chain is allowed (case-insensitive)
    pub fn is_allowed(&self, chain: &str) -> bool {
        self.chains.contains(&chain.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.chains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chains.is_empty()
    }

    /// Allowed chains in sorted order (for logs and diagnostics)
    pub fn sorted(&self) -> Vec<String> {
        let mut chains: Vec<String> = self.chains.iter().cloned().collect();
        chains.sort();
        chains
    }
}

impl Default for ChainAllowList {
    fn default() -> Self {
        Self::new(DEFAULT_ALLOWED_CHAINS.iter().copied())
    }
}

/// Check a chain against the default allow-list
pub fn is_allowed_chain(chain: &str) -> bool {
    ChainAllowList::default().is_allowed(chain)
}

/// Check contract address syntax: `0x` followed by exactly 40 hex characters
pub fn is_valid_contract_address(address: &str) -> bool {
    CONTRACT_ADDRESS_RE.is_match(address)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_allows_only_ethereum() {
        assert!(is_allowed_chain("ethereum"));
        assert!(!is_allowed_chain("bsc"));
        assert!(!is_allowed_chain("solana"));
        assert!(!is_allowed_chain(""));
    }

    #[test]
    fn test_chain_check_is_case_insensitive() {
        assert!(is_allowed_chain("Ethereum"));
        assert!(is_allowed_chain("ETHEREUM"));
    }

    #[test]
    fn test_custom_allow_list() {
        let list = ChainAllowList::new(["ethereum", " Base ", ""]);
        assert_eq!(list.len(), 2);
        assert!(list.is_allowed("base"));
        assert!(list.is_allowed("BASE"));
        assert!(!list.is_allowed("bsc"));
        assert_eq!(list.sorted(), vec!["base".to_string(), "ethereum".to_string()]);
    }

    #[test]
    fn test_empty_allow_list_rejects_everything() {
        let list = ChainAllowList::new(Vec::<String>::new());
        assert!(list.is_empty());
        assert!(!list.is_allowed("ethereum"));
    }

    #[test]
    fn test_valid_addresses() {
        assert!(is_valid_contract_address(&format!("0x{}", "a".repeat(40))));
        assert!(is_valid_contract_address(&format!("0x{}", "A".repeat(40))));
        assert!(is_valid_contract_address(
            "0xC02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2"
        ));
    }

    #[test]
    fn test_invalid_addresses() {
        // Non-hex characters padded to the right length
        let zz = format!("{:0<42}", "0xZZ");
        assert_eq!(zz.len(), 42);
        assert!(!is_valid_contract_address(&zz));

        assert!(!is_valid_contract_address("0x123"));
        assert!(!is_valid_contract_address("123"));
        assert!(!is_valid_contract_address(""));
        // Missing prefix
        assert!(!is_valid_contract_address(&"a".repeat(42)));
        // Uppercase prefix is not accepted
        assert!(!is_valid_contract_address(&format!("0X{}", "a".repeat(40))));
        // 41 hex chars
        assert!(!is_valid_contract_address(&format!("0x{}", "a".repeat(41))));
        // Trailing whitespace / newline
        assert!(!is_valid_contract_address(&format!("0x{} ", "a".repeat(40))));
        assert!(!is_valid_contract_address(&format!("0x{}\n", "a".repeat(40))));
    }
}
