//! Hex-string normalization and fixed-offset byte slicing.
//!
//! Everything that crosses the outward interface is a `0x`-prefixed hex
//! string; everything the decoders touch is bytes. These helpers are the
//! only place the two representations meet.

use alloy_primitives::B256;

use crate::error::InputError;

/// Strip a leading `0x` / `0X`, if present.
pub fn strip_0x(s: &str) -> &str {
    s.strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s)
}

/// Decode a hex string (with or without `0x`) into bytes.
pub fn parse_hex(s: &str) -> Result<Vec<u8>, InputError> {
    let body = strip_0x(s.trim());
    hex::decode(body).map_err(|e| InputError::InvalidHex {
        reason: format!("'{}': {e}", truncate(s, 18)),
    })
}

/// Encode bytes as a lowercase `0x`-prefixed hex string.
pub fn to_hex_prefixed(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

/// `true` if `s` is `0x` followed by exactly 64 hex characters.
pub fn is_tx_hash(s: &str) -> bool {
    match s.strip_prefix("0x") {
        Some(body) => body.len() == 64 && body.chars().all(|c| c.is_ascii_hexdigit()),
        None => false,
    }
}

/// Validate and parse a transaction hash.
pub fn parse_tx_hash(s: &str) -> Result<B256, InputError> {
    if !is_tx_hash(s) {
        return Err(InputError::InvalidHash {
            value: s.to_string(),
        });
    }
    s.parse::<B256>().map_err(|_| InputError::InvalidHash {
        value: s.to_string(),
    })
}

/// Slice a hex string by byte offsets, `[start, end)`.
///
/// `end = None` slices to the end. Offsets past the end are clamped, so
/// callers that need a minimum length must check it first.
pub fn hex_slice(hex_str: &str, start: usize, end: Option<usize>) -> &str {
    let body = strip_0x(hex_str);
    let from = (start * 2).min(body.len());
    let to = end.map_or(body.len(), |e| (e * 2).min(body.len())).max(from);
    &body[from..to]
}

fn truncate(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Serde adapter: `Vec<u8>` as a `0x`-prefixed hex string.
pub mod serde_prefixed {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&super::to_hex_prefixed(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<u8>, D::Error> {
        let s = String::deserialize(d)?;
        super::parse_hex(&s).map_err(serde::de::Error::custom)
    }
}
