//! The outward-facing service.

use std::sync::Arc;

use serde::Serialize;
use txlens_archive::{ArchiveSource, HttpArchive, SignatureArchive};
use txlens_core::{
    DecodedCall, DecodedError, DecodedEvent, InputError, LocatedTransaction, LogEntry,
    PayloadError,
};
use txlens_evm::{BatchPayload, Decoder};
use txlens_rpc::{
    ChainEndpoint, EthClient, HttpRpcClient, LocateError, Networks, TransactionLocator,
};

use crate::config::TxLensConfig;
use crate::error::TxLensError;

/// Everything known about one transaction.
#[derive(Debug, Clone, Serialize)]
pub struct TransactionReport {
    pub transaction: LocatedTransaction,
    pub call: DecodedCall,
    /// `None` when the transaction emitted no logs
    pub events: Option<Vec<DecodedEvent>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub batch: Option<BatchPayload>,
}

/// Locates transactions across the configured networks and decodes them
/// against the signature archive.
pub struct TxLens {
    locator: TransactionLocator,
    decoder: Decoder,
}

impl TxLens {
    pub fn new(networks: Networks, archive: Arc<dyn ArchiveSource>) -> Self {
        Self {
            locator: TransactionLocator::new(networks),
            decoder: Decoder::new(SignatureArchive::new(archive)),
        }
    }

    /// Build HTTP clients for every configured network and the archive.
    pub fn from_config(config: &TxLensConfig) -> Result<Self, TxLensError> {
        config.validate()?;
        let http = config.rpc.http_config();

        let networks = config
            .networks
            .iter()
            .map(|n| {
                let transport = HttpRpcClient::new(n.rpc_url.clone(), http.clone()).map_err(
                    |source| TxLensError::Rpc {
                        network: n.name.clone(),
                        source,
                    },
                )?;
                Ok(ChainEndpoint::new(
                    n.chain_info(),
                    Arc::new(EthClient::new(Arc::new(transport))),
                ))
            })
            .collect::<Result<Networks, TxLensError>>()?;

        let archive = HttpArchive::new(config.archive.http_config())
            .map_err(|e| TxLensError::Archive(e.to_string()))?;

        tracing::debug!(
            networks = networks.len(),
            archive = %config.archive.base_url,
            "txlens configured"
        );
        Ok(Self::new(networks, Arc::new(archive)))
    }

    pub fn networks(&self) -> &Networks {
        self.locator.networks()
    }

    /// Find which configured chain holds `hash` and describe it.
    pub async fn locate_and_describe(
        &self,
        hash: &str,
    ) -> Result<Option<LocatedTransaction>, LocateError> {
        self.locator.locate(hash).await
    }

    pub async fn decode_call(&self, raw_hex: &str) -> Result<DecodedCall, InputError> {
        self.decoder.decode_call(raw_hex).await
    }

    pub async fn decode_events(&self, logs: &[LogEntry]) -> Option<Vec<DecodedEvent>> {
        self.decoder.decode_events(logs).await
    }

    pub async fn decode_error(&self, raw_hex: &str) -> Result<DecodedError, InputError> {
        self.decoder.decode_error(raw_hex).await
    }

    pub fn classify_and_decode_batch(
        &self,
        call: &DecodedCall,
    ) -> Result<Option<BatchPayload>, PayloadError> {
        txlens_evm::classify_and_decode_batch(call)
    }

    /// Locate `hash`, then decode its input, logs and batch payload.
    ///
    /// Decoding never aborts the report: an undecodable call or event is
    /// reported raw, and a malformed batch payload is logged and omitted.
    pub async fn inspect(&self, hash: &str) -> Result<Option<TransactionReport>, LocateError> {
        let Some(transaction) = self.locate_and_describe(hash).await? else {
            return Ok(None);
        };

        let raw_input = transaction.raw_input_hex();
        let (call, events) = tokio::join!(
            self.decode_call(&raw_input),
            self.decode_events(&transaction.logs)
        );
        let call = call.unwrap_or_else(|e| {
            tracing::warn!(error = %e, "transaction input rejected by decoder");
            DecodedCall::raw(raw_input.clone())
        });

        let batch = match self.classify_and_decode_batch(&call) {
            Ok(batch) => batch,
            Err(e) => {
                tracing::warn!(hash = %transaction.hash, error = %e, "batch payload not decodable");
                None
            }
        };

        Ok(Some(TransactionReport {
            transaction,
            call,
            events,
            batch,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{Address, Bytes, B256, U256, U64};
    use async_trait::async_trait;
    use serde_json::json;
    use txlens_archive::MemoryArchive;
    use txlens_core::{ChainInfo, FragmentKind, NormalizedValue};
    use txlens_rpc::{ChainRpc, RpcBlock, RpcLog, RpcReceipt, RpcTransaction, TransportError};

    const HASH: &str = "0x1111111111111111111111111111111111111111111111111111111111111111";

    /// addSequencerL2BatchFromOrigin(uint256,bytes,uint256,address)
    const BATCH_ENTRY: &str = r#"{
        "type": "function",
        "name": "addSequencerL2BatchFromOrigin",
        "inputs": [
            {"name": "sequenceNumber", "type": "uint256"},
            {"name": "data", "type": "bytes"},
            {"name": "afterDelayedMessagesRead", "type": "uint256"},
            {"name": "gasRefunder", "type": "address"}
        ]
    }"#;

    struct OneTx {
        input: Bytes,
        logs: Vec<RpcLog>,
    }

    #[async_trait]
    impl ChainRpc for OneTx {
        async fn get_transaction(
            &self,
            hash: B256,
        ) -> Result<Option<RpcTransaction>, TransportError> {
            Ok(Some(RpcTransaction {
                hash,
                block_hash: Some(B256::repeat_byte(0x0b)),
                block_number: Some(U64::from(9)),
                from: Address::repeat_byte(0x01),
                to: Some(Address::repeat_byte(0x02)),
                value: U256::ZERO,
                nonce: U64::from(0),
                input: self.input.clone(),
                gas_price: None,
                tx_type: Some(U64::from(2)),
                transaction_index: Some(U64::from(0)),
                chain_id: None,
            }))
        }

        async fn get_transaction_receipt(
            &self,
            hash: B256,
        ) -> Result<Option<RpcReceipt>, TransportError> {
            Ok(Some(RpcReceipt {
                transaction_hash: hash,
                block_hash: B256::repeat_byte(0x0b),
                block_number: U64::from(9),
                transaction_index: U64::from(0),
                from: Address::repeat_byte(0x01),
                to: Some(Address::repeat_byte(0x02)),
                contract_address: None,
                gas_used: U256::from(100u64),
                effective_gas_price: Some(U256::from(1u64)),
                status: Some(U64::from(1)),
                tx_type: Some(U64::from(2)),
                logs: self.logs.clone(),
            }))
        }

        async fn get_block(&self, _block_hash: B256) -> Result<Option<RpcBlock>, TransportError> {
            Ok(Some(RpcBlock {
                hash: None,
                number: None,
                timestamp: U64::from(1_700_000_000u64),
            }))
        }
    }

    fn batch_input(payload: &[u8]) -> Bytes {
        let mut data = vec![0x6f, 0x12, 0xb0, 0xc9];
        data.extend_from_slice(&U256::from(7u64).to_be_bytes::<32>());
        data.extend_from_slice(&U256::from(128u64).to_be_bytes::<32>());
        data.extend_from_slice(&U256::ZERO.to_be_bytes::<32>());
        data.extend_from_slice(&[0u8; 32]);
        data.extend_from_slice(&U256::from(payload.len()).to_be_bytes::<32>());
        let mut padded = payload.to_vec();
        padded.resize(payload.len().div_ceil(32) * 32, 0);
        data.extend_from_slice(&padded);
        Bytes::from(data)
    }

    fn lens(input: Bytes, logs: Vec<RpcLog>) -> TxLens {
        let archive = MemoryArchive::new().with(
            FragmentKind::Function,
            &[0x6f, 0x12],
            vec![serde_json::from_str(BATCH_ENTRY).unwrap()],
        );
        let networks = Networks::new(vec![ChainEndpoint::new(
            ChainInfo::new(42161, "Arbitrum One", "ETH"),
            Arc::new(OneTx { input, logs }),
        )]);
        TxLens::new(networks, Arc::new(archive))
    }

    fn cert(len: usize) -> Vec<u8> {
        let mut b = vec![0x88];
        b.resize(len, 0xab);
        b
    }

    #[tokio::test]
    async fn inspect_decodes_batch_with_da_certificate() {
        let report = lens(batch_input(&cert(90)), vec![])
            .inspect(HASH)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(report.transaction.chain.chain_id, 42161);
        assert_eq!(
            report.call.method_name.as_deref(),
            Some("addSequencerL2BatchFromOrigin")
        );
        assert_eq!(report.call.params["sequenceNumber"], NormalizedValue::Uint(7));
        assert!(report.events.is_none());
        match report.batch {
            Some(BatchPayload::DaCert(c)) => assert_eq!(c.aggregate_signature.len(), 16),
            other => panic!("expected DA certificate, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn rollup_data_is_passed_through() {
        let payload = vec![0x00, 0x01, 0x02];
        let report = lens(batch_input(&payload), vec![])
            .inspect(HASH)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(
            report.batch,
            Some(BatchPayload::RollupData(Bytes::from(payload)))
        );
    }

    #[tokio::test]
    async fn malformed_certificate_does_not_abort_report() {
        let report = lens(batch_input(&cert(40)), vec![])
            .inspect(HASH)
            .await
            .unwrap()
            .unwrap();
        assert!(report.call.is_resolved());
        assert!(report.batch.is_none());
    }

    #[tokio::test]
    async fn unknown_logs_are_reported_raw() {
        let logs = vec![RpcLog {
            address: Address::repeat_byte(0x09),
            topics: vec![B256::repeat_byte(0x44)],
            data: Bytes::from(vec![1, 2, 3]),
            log_index: Some(U64::from(0)),
        }];
        let report = lens(Bytes::new(), logs).inspect(HASH).await.unwrap().unwrap();
        assert!(!report.call.is_resolved());
        assert_eq!(report.call.raw_hex, "0x");
        let events = report.events.unwrap();
        assert_eq!(events.len(), 1);
        assert!(events[0].is_unknown());
        assert_eq!(events[0].address, Some(Address::repeat_byte(0x09)));
    }

    #[tokio::test]
    async fn invalid_hash_is_rejected() {
        let err = lens(Bytes::new(), vec![]).inspect("0xabc").await.unwrap_err();
        assert!(matches!(err, LocateError::InvalidInput(_)));
    }

    #[test]
    fn from_default_config_builds_every_network() {
        let lens = TxLens::from_config(&TxLensConfig::default()).unwrap();
        assert_eq!(lens.networks().len(), 8);
        assert!(lens.networks().get(61022448).is_some());
    }

    #[tokio::test]
    async fn decode_error_goes_through_archive() {
        let hash = alloy_primitives::keccak256("OwnableUnauthorizedAccount(address)");
        let selector = &hash[..4];
        let archive = MemoryArchive::new().with(
            FragmentKind::Error,
            selector,
            vec![json!({"type": "error", "name": "OwnableUnauthorizedAccount", "inputs": [{"name": "account", "type": "address"}]})],
        );
        let lens = TxLens::new(Networks::default(), Arc::new(archive));
        let raw = format!(
            "0x{}{}",
            alloy_primitives::hex::encode(selector),
            alloy_primitives::hex::encode(Address::repeat_byte(0x05).into_word())
        );
        let err = lens.decode_error(&raw).await.unwrap();
        assert_eq!(err.error_name.as_deref(), Some("OwnableUnauthorizedAccount"));
        assert_eq!(
            err.params["account"].as_address(),
            Some(Address::repeat_byte(0x05).to_checksum(None).as_str())
        );
    }
}
