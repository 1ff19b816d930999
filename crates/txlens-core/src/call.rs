//! Types for decoded call data and revert data.
//!
//! Both records always carry the raw hex they were built from; the method
//! or error name is only present when an archive fragment was confirmed.

use serde::{Deserialize, Serialize};

use crate::types::{NamedParams, NormalizedValue};

/// Result of decoding a transaction's input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecodedCall {
    /// Function name; `None` means the call could not be resolved
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method_name: Option<String>,
    /// Canonical signature of the confirmed fragment
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
    /// First 4 bytes of the input, when present
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selector: Option<[u8; 4]>,
    /// Decoded inputs in declaration order
    #[serde(default, skip_serializing_if = "NamedParams::is_empty")]
    pub params: NamedParams,
    /// Archive URL the fragments were fetched from
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provenance_url: Option<String>,
    /// Input exactly as supplied
    pub raw_hex: String,
}

impl DecodedCall {
    /// An unresolved call carrying only its raw input.
    pub fn raw(raw_hex: impl Into<String>) -> Self {
        Self {
            method_name: None,
            signature: None,
            selector: None,
            params: NamedParams::new(),
            provenance_url: None,
            raw_hex: raw_hex.into(),
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.method_name.is_some()
    }

    /// Selector as a hex string ("0xaabbccdd")
    pub fn selector_hex(&self) -> Option<String> {
        self.selector.map(|s| format!("0x{}", hex::encode(s)))
    }

    /// Look up a decoded input by name
    pub fn param(&self, name: &str) -> Option<&NormalizedValue> {
        self.params.get(name)
    }
}

/// Result of decoding revert / custom-error data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecodedError {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
    #[serde(default, skip_serializing_if = "NamedParams::is_empty")]
    pub params: NamedParams,
    /// Human-readable meaning of built-in errors (panic codes)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provenance_url: Option<String>,
    pub raw_hex: String,
}

impl DecodedError {
    pub fn raw(raw_hex: impl Into<String>) -> Self {
        Self {
            error_name: None,
            signature: None,
            params: NamedParams::new(),
            detail: None,
            provenance_url: None,
            raw_hex: raw_hex.into(),
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.error_name.is_some()
    }
}
