//! Strict event-log decoding.
//!
//! A candidate only matches when the log's shape agrees with it exactly:
//! selector, topic count and data layout. The first candidate (archive
//! order) that decodes wins; shard collisions such as the ERC-20 and
//! ERC-721 `Transfer` events are therefore told apart by their indexed
//! field count rather than by selector.

use alloy_core::dyn_abi::{DynSolType, DynSolValue};
use alloy_json_abi::Event;
use alloy_primitives::B256;
use txlens_core::{DecodedEvent, FragmentSet, LogEntry, NamedParams, NormalizedValue};

use crate::abi::{decode_sequence, param_name, resolve};
use crate::error::DecodeError;
use crate::normalizer::normalize_with;

/// Decode `log` against one event fragment.
///
/// # EVM indexed-parameter encoding
/// - **Value types** (uint, int, bool, address, bytesN) sit in the topic
///   padded to 32 bytes and are decoded.
/// - **Reference types** (string, bytes, arrays, tuples) are stored as the
///   keccak256 of their encoding; the raw 32-byte topic is returned.
pub fn decode_log(event: &Event, log: &LogEntry) -> Result<NamedParams, DecodeError> {
    let indexed = event.inputs.iter().filter(|p| p.indexed).count();
    let offset = usize::from(!event.anonymous);

    if !event.anonymous {
        let selector = event.selector();
        match log.topic0() {
            Some(t0) if *t0 == selector => {}
            other => {
                return Err(DecodeError::SelectorMismatch {
                    expected: selector.to_string(),
                    got: other.map(|t| t.to_string()).unwrap_or_default(),
                })
            }
        }
    }
    if log.topics.len() != indexed + offset {
        return Err(DecodeError::TopicCount {
            expected: indexed + offset,
            got: log.topics.len(),
        });
    }

    let body_params: Vec<_> = event.inputs.iter().filter(|p| !p.indexed).collect();
    if !body_params.is_empty() && log.data.is_empty() {
        return Err(DecodeError::MissingData);
    }
    let body_types = body_params
        .iter()
        .map(|p| resolve(&p.ty, *p))
        .collect::<Result<Vec<_>, _>>()?;
    let mut body = decode_sequence(body_types, &log.data)?.into_iter();
    let mut topics = log.topics[offset..].iter();

    let mut params = NamedParams::new();
    for (i, p) in event.inputs.iter().enumerate() {
        let value = if p.indexed {
            let topic = topics.next().ok_or(DecodeError::TopicCount {
                expected: indexed + offset,
                got: log.topics.len(),
            })?;
            decode_topic(&resolve(&p.ty, p)?, topic)?
        } else {
            let v = body.next().ok_or_else(|| DecodeError::AbiDecodeFailed {
                reason: format!("missing value for '{}'", p.name),
            })?;
            normalize_with(v, &p.components)
        };
        params.insert(param_name(i, &p.name), value);
    }
    Ok(params)
}

fn decode_topic(ty: &DynSolType, topic: &B256) -> Result<NormalizedValue, DecodeError> {
    match ty {
        DynSolType::String
        | DynSolType::Bytes
        | DynSolType::Array(_)
        | DynSolType::FixedArray(..)
        | DynSolType::Tuple(_) => Ok(NormalizedValue::Bytes(topic.to_vec())),
        _ => ty
            .abi_decode(topic.as_slice())
            .map(|v: DynSolValue| normalize_with(v, &[]))
            .map_err(|e| DecodeError::AbiDecodeFailed {
                reason: format!("topic decode: {e}"),
            }),
    }
}

/// Try every event candidate in archive order; `None` if none fits.
pub fn decode_with_candidates(set: &FragmentSet, log: &LogEntry) -> Option<DecodedEvent> {
    set.events().find_map(|event| match decode_log(event, log) {
        Ok(params) => Some(DecodedEvent {
            name: event.name.clone(),
            signature: Some(event.signature()),
            params,
            address: log.address,
            topics: log.topics.clone(),
            raw_data: log.data.clone(),
            provenance_url: Some(set.provenance_url.clone()),
        }),
        Err(e) => {
            tracing::trace!(candidate = %event.signature(), error = %e, "event candidate rejected");
            None
        }
    })
}
