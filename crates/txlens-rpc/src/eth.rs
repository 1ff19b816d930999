//! The chain RPC capability and the `eth_*` response shapes it returns.
//!
//! Only the fields the locator consumes are modelled; everything else in
//! the node's response is ignored. Quantities arrive as hex strings and are
//! parsed by alloy's serde impls.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use alloy_primitives::{Address, Bytes, B256, U256, U64};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::TransportError;
use crate::transport::{call, RpcTransport};

/// A transaction as returned by `eth_getTransactionByHash`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RpcTransaction {
    pub hash: B256,
    /// `None` while pending
    #[serde(default)]
    pub block_hash: Option<B256>,
    #[serde(default)]
    pub block_number: Option<U64>,
    pub from: Address,
    #[serde(default)]
    pub to: Option<Address>,
    pub value: U256,
    pub nonce: U64,
    pub input: Bytes,
    #[serde(default)]
    pub gas_price: Option<U256>,
    #[serde(rename = "type", default)]
    pub tx_type: Option<U64>,
    #[serde(default)]
    pub transaction_index: Option<U64>,
    #[serde(default)]
    pub chain_id: Option<U64>,
}

/// One log inside a receipt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RpcLog {
    pub address: Address,
    pub topics: Vec<B256>,
    pub data: Bytes,
    #[serde(default)]
    pub log_index: Option<U64>,
}

/// A receipt as returned by `eth_getTransactionReceipt`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RpcReceipt {
    pub transaction_hash: B256,
    pub block_hash: B256,
    pub block_number: U64,
    pub transaction_index: U64,
    pub from: Address,
    #[serde(default)]
    pub to: Option<Address>,
    #[serde(default)]
    pub contract_address: Option<Address>,
    pub gas_used: U256,
    /// Missing on some pre-London nodes
    #[serde(default)]
    pub effective_gas_price: Option<U256>,
    /// `0x1` success, `0x0` reverted; absent before Byzantium
    #[serde(default)]
    pub status: Option<U64>,
    #[serde(rename = "type", default)]
    pub tx_type: Option<U64>,
    #[serde(default)]
    pub logs: Vec<RpcLog>,
}

/// The block header fields the locator needs from `eth_getBlockByHash`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RpcBlock {
    #[serde(default)]
    pub hash: Option<B256>,
    #[serde(default)]
    pub number: Option<U64>,
    pub timestamp: U64,
}

/// Chain access scoped to one configured network.
///
/// `Ok(None)` means the node answered `null` (unknown hash / block).
#[async_trait]
pub trait ChainRpc: Send + Sync {
    async fn get_transaction(&self, hash: B256) -> Result<Option<RpcTransaction>, TransportError>;

    async fn get_transaction_receipt(
        &self,
        hash: B256,
    ) -> Result<Option<RpcReceipt>, TransportError>;

    async fn get_block(&self, block_hash: B256) -> Result<Option<RpcBlock>, TransportError>;
}

/// [`ChainRpc`] over any JSON-RPC transport.
pub struct EthClient {
    transport: Arc<dyn RpcTransport>,
    next_id: AtomicU64,
}

impl EthClient {
    pub fn new(transport: Arc<dyn RpcTransport>) -> Self {
        Self {
            transport,
            next_id: AtomicU64::new(1),
        }
    }

    pub fn url(&self) -> &str {
        self.transport.url()
    }

    async fn request<T: serde::de::DeserializeOwned>(
        &self,
        method: &str,
        params: Vec<Value>,
    ) -> Result<T, TransportError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        call(self.transport.as_ref(), id, method, params).await
    }
}

#[async_trait]
impl ChainRpc for EthClient {
    async fn get_transaction(&self, hash: B256) -> Result<Option<RpcTransaction>, TransportError> {
        self.request("eth_getTransactionByHash", vec![json!(hash)]).await
    }

    async fn get_transaction_receipt(
        &self,
        hash: B256,
    ) -> Result<Option<RpcReceipt>, TransportError> {
        self.request("eth_getTransactionReceipt", vec![json!(hash)]).await
    }

    async fn get_block(&self, block_hash: B256) -> Result<Option<RpcBlock>, TransportError> {
        self.request("eth_getBlockByHash", vec![json!(block_hash), json!(false)])
            .await
    }
}

/// Human label for an EIP-2718 transaction type.
pub fn tx_type_name(ty: u64) -> &'static str {
    match ty {
        0x00 => "legacy",
        0x01 => "eip2930",
        0x02 => "eip1559",
        0x03 => "eip4844",
        0x04 => "eip7702",
        0x64 => "arbitrum-deposit",
        0x65 => "arbitrum-unsigned",
        0x66 => "arbitrum-contract",
        0x68 => "arbitrum-retry",
        0x69 => "arbitrum-submit-retryable",
        0x6a => "arbitrum-internal",
        0x78 => "arbitrum-legacy",
        0x7e => "deposit",
        _ => "unknown",
    }
}

/// `"<receipt type name>(<tx type hex>)"`, or just the name when the
/// transaction did not report its envelope type.
pub fn tx_type_label(receipt_type: Option<u64>, tx_type: Option<u64>) -> String {
    let name = tx_type_name(receipt_type.or(tx_type).unwrap_or(0));
    match tx_type {
        Some(t) => format!("{name}(0x{t:x})"),
        None => name.to_string(),
    }
}
