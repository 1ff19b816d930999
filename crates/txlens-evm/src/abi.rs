//! Shared ABI helpers for the call, error and event decoders.

use alloy_core::dyn_abi::{DynSolType, DynSolValue, Specifier};
use alloy_json_abi::Param;
use txlens_core::NamedParams;

use crate::error::DecodeError;
use crate::normalizer::normalize_with;

/// Declared name, or `arg{i}` for unnamed parameters.
pub(crate) fn param_name(index: usize, name: &str) -> String {
    if name.is_empty() {
        format!("arg{index}")
    } else {
        name.to_string()
    }
}

pub(crate) fn resolve<S: Specifier<DynSolType>>(
    ty: &str,
    param: &S,
) -> Result<DynSolType, DecodeError> {
    param.resolve().map_err(|e| DecodeError::UnsupportedType {
        ty: ty.to_string(),
        reason: e.to_string(),
    })
}

/// Decode `data` as the ABI-encoded parameter sequence `types`.
pub(crate) fn decode_sequence(
    types: Vec<DynSolType>,
    data: &[u8],
) -> Result<Vec<DynSolValue>, DecodeError> {
    if types.is_empty() {
        return Ok(vec![]);
    }
    let decoded = DynSolType::Tuple(types)
        .abi_decode_sequence(data)
        .map_err(|e| DecodeError::AbiDecodeFailed {
            reason: e.to_string(),
        })?;
    match decoded {
        DynSolValue::Tuple(vals) => Ok(vals),
        other => Ok(vec![other]),
    }
}

/// Decode the values of `params` from `data` (selector already stripped).
pub(crate) fn decode_values(params: &[Param], data: &[u8]) -> Result<Vec<DynSolValue>, DecodeError> {
    let types = params
        .iter()
        .map(|p| resolve(&p.ty, p))
        .collect::<Result<Vec<_>, _>>()?;
    decode_sequence(types, data)
}

/// Pair decoded values with the declared parameter names.
pub(crate) fn name_values(params: &[Param], values: Vec<DynSolValue>) -> NamedParams {
    params
        .iter()
        .enumerate()
        .zip(values)
        .map(|((i, p), v)| (param_name(i, &p.name), normalize_with(v, &p.components)))
        .collect()
}
