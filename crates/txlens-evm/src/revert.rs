//! Built-in Solidity revert payloads.
//!
//! `Error(string)` (selector `0x08c379a0`) is what `require(cond, "msg")`
//! and `revert("msg")` produce; `Panic(uint256)` (selector `0x4e487b71`)
//! is emitted by compiler-inserted checks since Solidity 0.8.0. Neither
//! needs an archive lookup.

use alloy_core::dyn_abi::{DynSolType, DynSolValue};
use txlens_core::{DecodedError, NamedParams, NormalizedValue};

use crate::abi::decode_sequence;
use crate::call::split_selector;

pub const ERROR_STRING_SELECTOR: [u8; 4] = [0x08, 0xc3, 0x79, 0xa0];
pub const PANIC_SELECTOR: [u8; 4] = [0x4e, 0x48, 0x7b, 0x71];

/// Decode `data` if it is an `Error(string)` or `Panic(uint256)` payload.
pub fn decode_builtin(data: &[u8], raw_hex: &str) -> Option<DecodedError> {
    let (selector, body) = split_selector(data).ok()?;
    match selector {
        ERROR_STRING_SELECTOR => {
            let message = match decode_sequence(vec![DynSolType::String], body).ok()?.pop()? {
                DynSolValue::String(s) => s,
                _ => return None,
            };
            let mut params = NamedParams::new();
            params.insert("message".into(), NormalizedValue::Str(message));
            Some(DecodedError {
                error_name: Some("Error".into()),
                signature: Some("Error(string)".into()),
                params,
                detail: None,
                provenance_url: None,
                raw_hex: raw_hex.to_string(),
            })
        }
        PANIC_SELECTOR => {
            let code = match decode_sequence(vec![DynSolType::Uint(256)], body).ok()?.pop()? {
                DynSolValue::Uint(v, _) => v,
                _ => return None,
            };
            let meaning = u64::try_from(code).map_or("unknown panic code", panic_meaning);
            let mut params = NamedParams::new();
            params.insert(
                "code".into(),
                match u128::try_from(code) {
                    Ok(v) => NormalizedValue::Uint(v),
                    Err(_) => NormalizedValue::BigUint(code.to_string()),
                },
            );
            Some(DecodedError {
                error_name: Some("Panic".into()),
                signature: Some("Panic(uint256)".into()),
                params,
                detail: Some(meaning.to_string()),
                provenance_url: None,
                raw_hex: raw_hex.to_string(),
            })
        }
        _ => None,
    }
}

/// Map a Solidity panic code to a human-readable description.
pub fn panic_meaning(code: u64) -> &'static str {
    match code {
        0x00 => "generic compiler-inserted panic",
        0x01 => "assert() called with false condition",
        0x11 => "arithmetic overflow or underflow",
        0x12 => "division or modulo by zero",
        0x21 => "invalid enum value",
        0x22 => "corrupted storage byte array",
        0x31 => ".pop() on empty array",
        0x32 => "out-of-bounds array access",
        0x41 => "too much memory allocated",
        0x51 => "called zero-initialized internal function pointer",
        _ => "unknown panic code",
    }
}
