//! Located transaction and log types.

use alloy_primitives::{Address, Bytes, B256, U256};
use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::chain::ChainInfo;

/// Execution outcome reported by the receipt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxStatus {
    Success,
    Reverted,
}

impl std::fmt::Display for TxStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TxStatus::Success => write!(f, "success"),
            TxStatus::Reverted => write!(f, "reverted"),
        }
    }
}

/// One event log emitted by a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Emitting contract
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    /// topics[0] is the event selector for non-anonymous events
    pub topics: Vec<B256>,
    /// ABI-encoded non-indexed parameters
    pub data: Bytes,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_index: Option<u64>,
}

impl LogEntry {
    pub fn new(topics: Vec<B256>, data: impl Into<Bytes>) -> Self {
        Self {
            address: None,
            topics,
            data: data.into(),
            log_index: None,
        }
    }

    /// The event selector candidate, if the log has any topic.
    pub fn topic0(&self) -> Option<&B256> {
        self.topics.first()
    }
}

/// A transaction found on exactly one configured chain, with its receipt
/// and block context folded in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocatedTransaction {
    pub hash: B256,
    /// The chain whose lookup answered first
    pub chain: ChainInfo,
    pub status: TxStatus,
    pub block_hash: B256,
    pub block_number: u64,
    /// Block timestamp (Unix seconds)
    pub timestamp: u64,
    pub from: Address,
    /// `None` for contract creation
    pub to: Option<Address>,
    /// Deployed contract, set by the receipt on creation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contract_address: Option<Address>,
    pub value: U256,
    pub nonce: u64,
    pub gas_used: U256,
    pub effective_gas_price: U256,
    /// Receipt type, with the transaction envelope type appended when the
    /// node reports one, e.g. "eip1559(0x2)"
    pub tx_type: String,
    pub transaction_index: u64,
    pub raw_input: Bytes,
    pub logs: Vec<LogEntry>,
}

impl LocatedTransaction {
    /// Absence of a recipient is authoritative for contract creation.
    pub fn is_contract_creation(&self) -> bool {
        self.to.is_none()
    }

    /// Total fee paid in wei: `gas_used * effective_gas_price`.
    pub fn fee(&self) -> U256 {
        self.gas_used.saturating_mul(self.effective_gas_price)
    }

    /// Block timestamp as a UTC datetime.
    pub fn datetime(&self) -> Option<DateTime<Utc>> {
        let secs = i64::try_from(self.timestamp).ok()?;
        Utc.timestamp_opt(secs, 0).single()
    }

    /// Raw input as a `0x`-prefixed hex string.
    pub fn raw_input_hex(&self) -> String {
        crate::hexutil::to_hex_prefixed(&self.raw_input)
    }
}
