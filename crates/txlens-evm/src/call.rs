//! Selector-prefixed payload decoding against archive candidates.
//!
//! Used for both transaction input (function fragments) and revert data
//! (error fragments): the first four bytes select, the rest is the
//! ABI-encoded argument sequence.
//!
//! A shard lists every fragment sharing the first two selector bytes, so
//! candidates are confirmed by full selector and by a successful decode,
//! in archive order.

use alloy_json_abi::{Error, Function, Param};
use txlens_core::NamedParams;

use crate::abi::{decode_values, name_values};
use crate::error::DecodeError;

/// Anything that is invoked through a 4-byte selector.
pub trait SelectorFragment {
    fn name(&self) -> &str;
    fn inputs(&self) -> &[Param];
    fn selector_bytes(&self) -> [u8; 4];
    fn signature_text(&self) -> String;
}

impl SelectorFragment for Function {
    fn name(&self) -> &str {
        &self.name
    }
    fn inputs(&self) -> &[Param] {
        &self.inputs
    }
    fn selector_bytes(&self) -> [u8; 4] {
        self.selector().0
    }
    fn signature_text(&self) -> String {
        self.signature()
    }
}

impl SelectorFragment for Error {
    fn name(&self) -> &str {
        &self.name
    }
    fn inputs(&self) -> &[Param] {
        &self.inputs
    }
    fn selector_bytes(&self) -> [u8; 4] {
        self.selector().0
    }
    fn signature_text(&self) -> String {
        self.signature()
    }
}

/// A candidate that matched the payload.
#[derive(Debug, Clone, PartialEq)]
pub struct Confirmed {
    pub name: String,
    pub signature: String,
    pub params: NamedParams,
}

/// Decode `payload` (selector included) against a single fragment.
pub fn decode_with<F: SelectorFragment>(
    fragment: &F,
    payload: &[u8],
) -> Result<NamedParams, DecodeError> {
    let (selector, body) = split_selector(payload)?;
    if fragment.selector_bytes() != selector {
        return Err(DecodeError::SelectorMismatch {
            expected: hex::encode(fragment.selector_bytes()),
            got: hex::encode(selector),
        });
    }
    let values = decode_values(fragment.inputs(), body)?;
    Ok(name_values(fragment.inputs(), values))
}

/// Confirm `payload` against candidates in order.
///
/// The confirming candidate fixes the name and the values. Parameter names
/// are then taken from the declared fragment of that name, preferring one
/// whose selector also matches.
pub fn confirm<'a, F, I>(candidates: I, payload: &[u8]) -> Option<Confirmed>
where
    F: SelectorFragment + 'a,
    I: IntoIterator<Item = &'a F>,
    I::IntoIter: Clone,
{
    let (selector, body) = split_selector(payload).ok()?;
    let candidates = candidates.into_iter();

    let (confirmed, values) = candidates.clone().find_map(|f| {
        if f.selector_bytes() != selector {
            return None;
        }
        match decode_values(f.inputs(), body) {
            Ok(values) => Some((f, values)),
            Err(e) => {
                tracing::trace!(candidate = %f.signature_text(), error = %e, "candidate rejected");
                None
            }
        }
    })?;

    let declared = candidates
        .filter(|f| f.name() == confirmed.name())
        .find(|f| f.selector_bytes() == selector)
        .unwrap_or(confirmed);

    Some(Confirmed {
        name: confirmed.name().to_string(),
        signature: declared.signature_text(),
        params: name_values(declared.inputs(), values),
    })
}

/// Split off the 4-byte selector.
pub fn split_selector(payload: &[u8]) -> Result<([u8; 4], &[u8]), DecodeError> {
    match payload {
        [a, b, c, d, rest @ ..] => Ok(([*a, *b, *c, *d], rest)),
        _ => Err(DecodeError::AbiDecodeFailed {
            reason: format!("payload too short: {} bytes, need 4 for selector", payload.len()),
        }),
    }
}
