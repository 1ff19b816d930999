//! Archive-driven decoding of call data, event logs and revert data.
//!
//! Nothing here fails because a schema is missing or does not fit: the
//! only error is malformed hex from the caller. Every other outcome is a
//! record, resolved or raw.

use futures::future::join_all;
use txlens_archive::SignatureArchive;
use txlens_core::hexutil::parse_hex;
use txlens_core::{DecodedCall, DecodedError, DecodedEvent, FragmentKind, InputError, LogEntry};

use crate::call::{confirm, split_selector};
use crate::event::decode_with_candidates;
use crate::revert::decode_builtin;

#[derive(Clone)]
pub struct Decoder {
    archive: SignatureArchive,
}

impl Decoder {
    pub fn new(archive: SignatureArchive) -> Self {
        Self { archive }
    }

    /// Decode transaction input.
    ///
    /// Input without a full selector is returned raw without a lookup.
    pub async fn decode_call(&self, raw_hex: &str) -> Result<DecodedCall, InputError> {
        let data = parse_hex(raw_hex)?;
        let mut call = DecodedCall::raw(raw_hex);
        let Ok((selector, _)) = split_selector(&data) else {
            return Ok(call);
        };
        call.selector = Some(selector);

        let Some(set) = self.archive.lookup(FragmentKind::Function, &selector).await else {
            tracing::debug!(selector = %hex::encode(selector), "no function fragments in archive");
            return Ok(call);
        };
        call.provenance_url = Some(set.provenance_url.clone());

        match confirm(set.functions(), &data) {
            Some(confirmed) => {
                call.method_name = Some(confirmed.name);
                call.signature = Some(confirmed.signature);
                call.params = confirmed.params;
            }
            None => {
                tracing::debug!(
                    selector = %hex::encode(selector),
                    candidates = set.len(),
                    "no function candidate matched"
                );
            }
        }
        Ok(call)
    }

    /// Decode every log independently; order is preserved.
    ///
    /// `None` for a transaction without logs, so callers can tell "no
    /// logs" apart from an empty decode result.
    pub async fn decode_events(&self, logs: &[LogEntry]) -> Option<Vec<DecodedEvent>> {
        if logs.is_empty() {
            return None;
        }
        Some(join_all(logs.iter().map(|log| self.decode_event(log))).await)
    }

    /// Decode one log, falling back to an "Unknown Event" record.
    pub async fn decode_event(&self, log: &LogEntry) -> DecodedEvent {
        let Some(topic0) = log.topic0() else {
            return DecodedEvent::unknown(log);
        };
        let Some(set) = self.archive.lookup(FragmentKind::Event, topic0.as_slice()).await else {
            tracing::debug!(topic0 = %topic0, "no event fragments in archive");
            return DecodedEvent::unknown(log);
        };
        decode_with_candidates(&set, log).unwrap_or_else(|| {
            tracing::debug!(topic0 = %topic0, candidates = set.len(), "no event candidate matched");
            DecodedEvent::unknown(log)
        })
    }

    /// Decode revert data.
    ///
    /// `Error(string)` and `Panic(uint256)` are decoded locally; custom
    /// errors are looked up like functions.
    pub async fn decode_error(&self, raw_hex: &str) -> Result<DecodedError, InputError> {
        let data = parse_hex(raw_hex)?;
        if let Some(builtin) = decode_builtin(&data, raw_hex) {
            return Ok(builtin);
        }

        let mut decoded = DecodedError::raw(raw_hex);
        let Ok((selector, _)) = split_selector(&data) else {
            return Ok(decoded);
        };
        let Some(set) = self.archive.lookup(FragmentKind::Error, &selector).await else {
            tracing::debug!(selector = %hex::encode(selector), "no error fragments in archive");
            return Ok(decoded);
        };
        decoded.provenance_url = Some(set.provenance_url.clone());

        if let Some(confirmed) = confirm(set.errors(), &data) {
            decoded.error_name = Some(confirmed.name);
            decoded.signature = Some(confirmed.signature);
            decoded.params = confirmed.params;
        }
        Ok(decoded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_json_abi::Event;
    use alloy_primitives::{Address, B256, U256};
    use serde_json::json;
    use std::sync::Arc;
    use txlens_archive::MemoryArchive;
    use txlens_core::NormalizedValue;

    const TRANSFER_ZEROS: &str = concat!(
        "0xa9059cbb",
        "0000000000000000000000000000000000000000000000000000000000000000",
    );

    fn decoder(mem: MemoryArchive) -> Decoder {
        Decoder::new(SignatureArchive::new(Arc::new(mem)))
    }

    fn transfer_entry() -> serde_json::Value {
        json!({
            "type": "function",
            "name": "transfer",
            "inputs": [
                {"name": "to", "type": "address"},
                {"name": "amount", "type": "uint256"}
            ],
            "outputs": [{"name": "", "type": "bool"}],
            "stateMutability": "nonpayable"
        })
    }

    fn transfer_event_entry(names: [&str; 3], value_indexed: bool) -> serde_json::Value {
        json!({
            "type": "event",
            "name": "Transfer",
            "anonymous": false,
            "inputs": [
                {"indexed": true, "name": names[0], "type": "address"},
                {"indexed": true, "name": names[1], "type": "address"},
                {"indexed": value_indexed, "name": names[2], "type": "uint256"}
            ]
        })
    }

    fn erc20_log() -> LogEntry {
        let sig = Event::parse("event Transfer(address indexed, address indexed, uint256)")
            .unwrap()
            .selector();
        let mut log = LogEntry::new(
            vec![
                sig,
                Address::repeat_byte(0x01).into_word(),
                Address::repeat_byte(0x02).into_word(),
            ],
            U256::from(10u64).to_be_bytes_vec(),
        );
        log.address = Some(Address::repeat_byte(0xee));
        log
    }

    #[tokio::test]
    async fn empty_input_is_raw() {
        let call = decoder(MemoryArchive::new()).decode_call("0x").await.unwrap();
        assert_eq!(call.raw_hex, "0x");
        assert!(call.method_name.is_none());
        assert!(call.params.is_empty());
    }

    #[tokio::test]
    async fn unknown_selector_is_raw_with_full_input() {
        let call = decoder(MemoryArchive::new())
            .decode_call(TRANSFER_ZEROS)
            .await
            .unwrap();
        assert_eq!(call.raw_hex, TRANSFER_ZEROS);
        assert!(call.method_name.is_none());
        assert!(call.params.is_empty());
        assert!(call.provenance_url.is_none());
    }

    #[tokio::test]
    async fn malformed_hex_is_input_error() {
        let err = decoder(MemoryArchive::new()).decode_call("0xzz").await.unwrap_err();
        assert!(matches!(err, InputError::InvalidHex { .. }));
    }

    #[tokio::test]
    async fn transfer_resolves_through_archive() {
        let mem = MemoryArchive::new().with(
            FragmentKind::Function,
            &[0xa9, 0x05],
            vec![json!({"type": "function", "name": "other", "inputs": []}), transfer_entry()],
        );
        let input = concat!(
            "0xa9059cbb",
            "000000000000000000000000d8da6bf26964af9d7eed9e03e53415d37aa96045",
            "00000000000000000000000000000000000000000000000000000000000f4240",
        );
        let call = decoder(mem).decode_call(input).await.unwrap();
        assert_eq!(call.method_name.as_deref(), Some("transfer"));
        assert_eq!(call.signature.as_deref(), Some("transfer(address,uint256)"));
        assert_eq!(call.selector_hex().as_deref(), Some("0xa9059cbb"));
        assert_eq!(call.provenance_url.as_deref(), Some("memory://function/a9/05"));
        let keys: Vec<_> = call.params.keys().map(String::as_str).collect();
        assert_eq!(keys, ["to", "amount"]);
        assert_eq!(call.params["amount"], NormalizedValue::Uint(1_000_000));
    }

    #[tokio::test]
    async fn shard_hit_without_match_keeps_provenance() {
        let mem = MemoryArchive::new().with(
            FragmentKind::Function,
            &[0xa9, 0x05],
            vec![json!({"type": "function", "name": "notTransfer", "inputs": [{"type": "bool"}]})],
        );
        let call = decoder(mem).decode_call(TRANSFER_ZEROS).await.unwrap();
        assert!(call.method_name.is_none());
        assert!(call.provenance_url.is_some());
    }

    #[tokio::test]
    async fn log_without_topics_is_unknown() {
        let log = LogEntry::new(vec![], vec![0xde, 0xad]);
        let ev = decoder(MemoryArchive::new()).decode_event(&log).await;
        assert_eq!(ev.name, "Unknown Event");
        assert!(ev.params.is_empty());
        assert_eq!(ev.raw_data.as_ref(), &[0xde, 0xad]);
    }

    #[tokio::test]
    async fn no_logs_is_absent() {
        assert!(decoder(MemoryArchive::new()).decode_events(&[]).await.is_none());
    }

    #[tokio::test]
    async fn events_keep_log_order_and_fail_independently() {
        let topic = erc20_log().topics[0];
        let mem = MemoryArchive::new().with(
            FragmentKind::Event,
            topic.as_slice(),
            vec![
                transfer_event_entry(["from", "to", "tokenId"], true),
                transfer_event_entry(["src", "dst", "wad"], false),
                transfer_event_entry(["from", "to", "value"], false),
            ],
        );
        let stray = LogEntry::new(vec![B256::repeat_byte(0x77)], Vec::<u8>::new());
        let logs = vec![erc20_log(), stray, erc20_log()];

        let events = decoder(mem).decode_events(&logs).await.unwrap();
        assert_eq!(events.len(), 3);
        assert_eq!(events[0].name, "Transfer");
        assert!(events[0].params.contains_key("src"));
        assert_eq!(events[0].address, Some(Address::repeat_byte(0xee)));
        assert!(events[1].is_unknown());
        assert_eq!(events[2].params["wad"], NormalizedValue::Uint(10));
    }

    #[tokio::test]
    async fn revert_string_needs_no_archive() {
        let data = concat!(
            "0x08c379a0",
            "0000000000000000000000000000000000000000000000000000000000000020",
            "0000000000000000000000000000000000000000000000000000000000000004",
            "6e6f706500000000000000000000000000000000000000000000000000000000",
        );
        let err = decoder(MemoryArchive::new()).decode_error(data).await.unwrap();
        assert_eq!(err.error_name.as_deref(), Some("Error"));
        assert_eq!(err.params["message"], NormalizedValue::Str("nope".into()));
    }

    #[tokio::test]
    async fn custom_error_resolves_through_archive() {
        let selector = alloy_json_abi::Error::parse("Unauthorized(address)")
            .unwrap()
            .selector();
        let mem = MemoryArchive::new().with(
            FragmentKind::Error,
            selector.as_slice(),
            vec![json!({"type": "error", "name": "Unauthorized", "inputs": [{"name": "caller", "type": "address"}]})],
        );
        let raw = format!(
            "0x{}{}",
            hex::encode(selector),
            hex::encode(Address::repeat_byte(0x42).into_word())
        );
        let err = decoder(mem).decode_error(&raw).await.unwrap();
        assert_eq!(err.error_name.as_deref(), Some("Unauthorized"));
        assert!(err.params.contains_key("caller"));
    }

    #[tokio::test]
    async fn unknown_error_is_raw() {
        let err = decoder(MemoryArchive::new())
            .decode_error("0xdeadbeef")
            .await
            .unwrap();
        assert!(!err.is_resolved());
        assert_eq!(err.raw_hex, "0xdeadbeef");
    }
}
