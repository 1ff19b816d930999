//! Decoded event type.

use alloy_primitives::{Address, Bytes, B256};
use serde::{Deserialize, Serialize};

use crate::tx::LogEntry;
use crate::types::NamedParams;

/// Name given to logs no archive candidate could decode.
pub const UNKNOWN_EVENT: &str = "Unknown Event";

/// A log entry paired with its interpretation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecodedEvent {
    /// Event name, or [`UNKNOWN_EVENT`]
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
    /// Decoded fields in declaration order; empty when unresolved
    pub params: NamedParams,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    pub topics: Vec<B256>,
    pub raw_data: Bytes,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provenance_url: Option<String>,
}

impl DecodedEvent {
    /// The fallback record for a log that could not be resolved.
    pub fn unknown(log: &LogEntry) -> Self {
        Self {
            name: UNKNOWN_EVENT.to_string(),
            signature: None,
            params: NamedParams::new(),
            address: log.address,
            topics: log.topics.clone(),
            raw_data: log.data.clone(),
            provenance_url: None,
        }
    }

    pub fn is_unknown(&self) -> bool {
        self.signature.is_none() && self.name == UNKNOWN_EVENT
    }
}
