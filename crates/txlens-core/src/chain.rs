//! Chain descriptor types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Immutable description of one configured network.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChainInfo {
    /// EVM chain ID (1 = Ethereum mainnet, 42161 = Arbitrum One, ...)
    pub chain_id: u64,
    /// Human-readable network name
    pub name: String,
    /// Symbol of the native currency, e.g. "ETH"
    pub native_symbol: String,
}

impl ChainInfo {
    pub fn new(chain_id: u64, name: impl Into<String>, native_symbol: impl Into<String>) -> Self {
        Self {
            chain_id,
            name: name.into(),
            native_symbol: native_symbol.into(),
        }
    }
}

impl fmt::Display for ChainInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name, self.chain_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_network_label() {
        let c = ChainInfo::new(42161, "Arbitrum One", "ETH");
        assert_eq!(c.to_string(), "Arbitrum One(42161)");
    }
}
