//! Rollup batch payloads and the fixed-layout DA certificate.
//!
//! Batches posted to the Arbitrum `SequencerInbox` carry either the
//! compressed rollup data itself or, on AnyTrust chains, a data
//! availability certificate pointing at data held by the committee.
//!
//! Certificate layout (byte offsets):
//!
//! | field                | bytes    |
//! |----------------------|----------|
//! | header               | 0        |
//! | keyset hash          | 1..33    |
//! | data hash            | 33..65   |
//! | timeout              | 65..73   |
//! | version              | 73       |
//! | signer mask          | 74..82   |
//! | aggregate signature  | 82..     |

use alloy_primitives::Bytes;
use serde::{Deserialize, Serialize};
use txlens_core::hexutil::hex_slice;
use txlens_core::{DecodedCall, PayloadError};

/// First byte of a payload that is a DA certificate.
pub const DA_CERT_HEADER: u8 = 0x88;

/// Bytes before the variable-length aggregate signature.
pub const DA_CERT_MIN_LEN: usize = 82;

/// Name of the batch argument in every batch-posting function.
pub const BATCH_DATA_PARAM: &str = "data";

/// `SequencerInbox` batch-posting selectors.
pub const BATCH_SELECTORS: [[u8; 4]; 4] = [
    // addSequencerL2BatchFromOrigin(uint256,bytes,uint256,address,uint256,uint256)
    [0x8f, 0x11, 0x1f, 0x3c],
    // addSequencerL2Batch(uint256,bytes,uint256,address,uint256,uint256)
    [0xe0, 0xbc, 0x97, 0x29],
    // addSequencerL2BatchFromOrigin(uint256,bytes,uint256,address)
    [0x6f, 0x12, 0xb0, 0xc9],
    // addSequencerL2BatchFromBlobs(uint256,uint256,address,uint256,uint256)
    [0x3e, 0x5a, 0xa0, 0x82],
];

/// DA certificate fields as lowercase hex without `0x`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DaCertificate {
    pub header: String,
    pub keyset_hash: String,
    pub data_hash: String,
    pub timeout: String,
    pub version: String,
    pub signer_mask: String,
    pub aggregate_signature: String,
}

/// The `data` argument of a batch-posting call, classified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "payload", rename_all = "camelCase")]
pub enum BatchPayload {
    /// Anything not starting with the certificate header; passed through
    RollupData(Bytes),
    DaCert(DaCertificate),
}

pub fn is_batch_selector(selector: &[u8]) -> bool {
    BATCH_SELECTORS.iter().any(|s| s.as_slice() == selector)
}

pub fn is_da_cert(payload: &[u8]) -> bool {
    payload.first() == Some(&DA_CERT_HEADER)
}

/// Slice a certificate into its fields.
pub fn decode_da_cert(payload: &[u8]) -> Result<DaCertificate, PayloadError> {
    if payload.len() < DA_CERT_MIN_LEN {
        return Err(PayloadError::Malformed {
            len: payload.len(),
            min: DA_CERT_MIN_LEN,
        });
    }
    let hex = hex::encode(payload);
    let field = |start, end| hex_slice(&hex, start, end).to_string();
    Ok(DaCertificate {
        header: field(0, Some(1)),
        keyset_hash: field(1, Some(33)),
        data_hash: field(33, Some(65)),
        timeout: field(65, Some(73)),
        version: field(73, Some(74)),
        signer_mask: field(74, Some(82)),
        aggregate_signature: field(82, None),
    })
}

/// Classify a batch payload by its first byte.
pub fn classify_payload(payload: &[u8]) -> Result<BatchPayload, PayloadError> {
    if is_da_cert(payload) {
        decode_da_cert(payload).map(BatchPayload::DaCert)
    } else {
        Ok(BatchPayload::RollupData(Bytes::copy_from_slice(payload)))
    }
}

/// Extract and classify the batch carried by a decoded call.
///
/// `Ok(None)` unless the call targets a batch-posting selector, decoded
/// with parameters, and has a `bytes` argument named `data`.
pub fn classify_and_decode_batch(call: &DecodedCall) -> Result<Option<BatchPayload>, PayloadError> {
    let Some(selector) = call.selector else {
        return Ok(None);
    };
    if !is_batch_selector(&selector) || call.params.is_empty() {
        return Ok(None);
    }
    match call.param(BATCH_DATA_PARAM).and_then(|v| v.as_bytes()) {
        Some(payload) => classify_payload(payload).map(Some),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use txlens_core::NormalizedValue;

    fn cert_bytes(total: usize) -> Vec<u8> {
        let mut b = vec![DA_CERT_HEADER];
        b.extend((1..total).map(|i| i as u8));
        b
    }

    fn batch_call(selector: [u8; 4], data: Vec<u8>) -> DecodedCall {
        let mut call = DecodedCall::raw("0x");
        call.method_name = Some("addSequencerL2BatchFromOrigin".into());
        call.selector = Some(selector);
        call.params
            .insert("sequenceNumber".into(), NormalizedValue::Uint(1));
        call.params.insert("data".into(), NormalizedValue::Bytes(data));
        call
    }

    #[test]
    fn ninety_byte_cert_has_eight_byte_signature() {
        let cert = decode_da_cert(&cert_bytes(90)).unwrap();
        assert_eq!(cert.header, "88");
        assert_eq!(cert.keyset_hash.len(), 64);
        assert_eq!(cert.data_hash.len(), 64);
        assert_eq!(cert.timeout.len(), 16);
        assert_eq!(cert.version.len(), 2);
        assert_eq!(cert.signer_mask.len(), 16);
        assert_eq!(cert.aggregate_signature.len(), 16);
    }

    #[test]
    fn fields_cover_the_whole_payload() {
        let bytes = cert_bytes(120);
        let cert = decode_da_cert(&bytes).unwrap();
        let joined = [
            &cert.header,
            &cert.keyset_hash,
            &cert.data_hash,
            &cert.timeout,
            &cert.version,
            &cert.signer_mask,
            &cert.aggregate_signature,
        ]
        .iter()
        .map(|s| s.as_str())
        .collect::<String>();
        assert_eq!(joined, hex::encode(&bytes));
        assert_eq!(cert.version, format!("{:02x}", bytes[73]));
    }

    #[test]
    fn short_cert_is_malformed() {
        let err = decode_da_cert(&cert_bytes(81)).unwrap_err();
        assert_eq!(err, PayloadError::Malformed { len: 81, min: 82 });
        assert!(decode_da_cert(&cert_bytes(82)).unwrap().aggregate_signature.is_empty());
    }

    #[test]
    fn other_first_byte_is_rollup_data_unchanged() {
        let data = vec![0x00, 0xde, 0xad];
        assert_eq!(
            classify_payload(&data).unwrap(),
            BatchPayload::RollupData(Bytes::from(data.clone()))
        );
    }

    #[test]
    fn batch_call_with_cert_is_classified() {
        let call = batch_call([0x8f, 0x11, 0x1f, 0x3c], cert_bytes(90));
        let out = classify_and_decode_batch(&call).unwrap();
        assert!(matches!(out, Some(BatchPayload::DaCert(_))));
    }

    #[test]
    fn batch_call_with_short_cert_is_an_error() {
        let call = batch_call([0xe0, 0xbc, 0x97, 0x29], cert_bytes(40));
        assert!(classify_and_decode_batch(&call).is_err());
    }

    #[test]
    fn non_batch_selector_is_ignored() {
        let call = batch_call([0xa9, 0x05, 0x9c, 0xbb], cert_bytes(90));
        assert_eq!(classify_and_decode_batch(&call).unwrap(), None);
    }

    #[test]
    fn unresolved_call_is_ignored() {
        let mut call = DecodedCall::raw("0x8f111f3c");
        call.selector = Some([0x8f, 0x11, 0x1f, 0x3c]);
        assert_eq!(classify_and_decode_batch(&call).unwrap(), None);
    }

    #[test]
    fn blob_batch_has_no_data_argument() {
        let mut call = batch_call([0x3e, 0x5a, 0xa0, 0x82], vec![]);
        call.params.shift_remove("data");
        assert_eq!(classify_and_decode_batch(&call).unwrap(), None);
    }
}
