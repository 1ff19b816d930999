//! Converts alloy-core `DynSolValue` → txlens `NormalizedValue`.
//!
//! Struct members are named from the declaring parameter's `components`
//! when the archive supplied them; otherwise they get positional names.

use alloy_core::dyn_abi::DynSolValue;
use alloy_json_abi::Param;
use txlens_core::NormalizedValue;

/// Convert a decoded value without component names.
pub fn normalize(val: DynSolValue) -> NormalizedValue {
    normalize_with(val, &[])
}

/// Convert a decoded value, naming tuple fields after `components`.
pub fn normalize_with(val: DynSolValue, components: &[Param]) -> NormalizedValue {
    match val {
        DynSolValue::Bool(b) => NormalizedValue::Bool(b),

        DynSolValue::Int(i, _bits) => match i128::try_from(i) {
            Ok(v) => NormalizedValue::Int(v),
            Err(_) => NormalizedValue::BigInt(i.to_string()),
        },

        DynSolValue::Uint(u, _bits) => match u128::try_from(u) {
            Ok(v) => NormalizedValue::Uint(v),
            Err(_) => NormalizedValue::BigUint(u.to_string()),
        },

        DynSolValue::FixedBytes(word, size) => NormalizedValue::Bytes(word[..size].to_vec()),

        DynSolValue::Bytes(b) => NormalizedValue::Bytes(b),

        DynSolValue::String(s) => NormalizedValue::Str(s),

        DynSolValue::Address(a) => NormalizedValue::Address(a.to_checksum(None)),

        // Array elements share the element type, hence the same components
        DynSolValue::Array(vals) | DynSolValue::FixedArray(vals) => NormalizedValue::Array(
            vals.into_iter()
                .map(|v| normalize_with(v, components))
                .collect(),
        ),

        DynSolValue::Tuple(fields) => NormalizedValue::Tuple(
            fields
                .into_iter()
                .enumerate()
                .map(|(i, v)| match components.get(i) {
                    Some(p) if !p.name.is_empty() => {
                        (p.name.clone(), normalize_with(v, &p.components))
                    }
                    Some(p) => (i.to_string(), normalize_with(v, &p.components)),
                    None => (i.to_string(), normalize(v)),
                })
                .collect(),
        ),

        DynSolValue::Function(f) => NormalizedValue::Bytes(f.to_vec()),
    }
}
