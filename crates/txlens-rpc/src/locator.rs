//! Cross-chain transaction lookup.
//!
//! A hash is looked up on every configured network at once; the chain that
//! answers first with a transaction owns it. Receipt and block are then
//! fetched from that chain only.

use std::sync::Arc;

use alloy_primitives::{B256, U256};
use tracing::{debug, info, warn};
use txlens_core::hexutil::parse_tx_hash;
use txlens_core::{first_success, ChainInfo, LocatedTransaction, LogEntry, TxStatus};

use crate::error::LocateError;
use crate::eth::{tx_type_label, ChainRpc, RpcBlock, RpcLog, RpcReceipt, RpcTransaction};

/// One configured network together with its RPC capability.
#[derive(Clone)]
pub struct ChainEndpoint {
    pub info: ChainInfo,
    pub rpc: Arc<dyn ChainRpc>,
}

impl ChainEndpoint {
    pub fn new(info: ChainInfo, rpc: Arc<dyn ChainRpc>) -> Self {
        Self { info, rpc }
    }
}

impl std::fmt::Debug for ChainEndpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChainEndpoint")
            .field("info", &self.info)
            .finish_non_exhaustive()
    }
}

/// The immutable set of networks a hash is searched across.
#[derive(Debug, Clone, Default)]
pub struct Networks {
    endpoints: Vec<ChainEndpoint>,
}

impl Networks {
    pub fn new(endpoints: Vec<ChainEndpoint>) -> Self {
        Self { endpoints }
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChainEndpoint> {
        self.endpoints.iter()
    }

    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }

    pub fn get(&self, chain_id: u64) -> Option<&ChainEndpoint> {
        self.endpoints.iter().find(|e| e.info.chain_id == chain_id)
    }

    pub fn chains(&self) -> impl Iterator<Item = &ChainInfo> {
        self.endpoints.iter().map(|e| &e.info)
    }
}

impl FromIterator<ChainEndpoint> for Networks {
    fn from_iter<I: IntoIterator<Item = ChainEndpoint>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

pub struct TransactionLocator {
    networks: Networks,
}

impl TransactionLocator {
    pub fn new(networks: Networks) -> Self {
        Self { networks }
    }

    pub fn networks(&self) -> &Networks {
        &self.networks
    }

    /// Find `hash` on whichever configured chain answers first.
    ///
    /// Returns `Ok(None)` when no chain knows the hash. Failures of the
    /// per-chain lookups only remove that chain from the race; failures
    /// after a chain has won are returned as errors.
    pub async fn locate(&self, hash: &str) -> Result<Option<LocatedTransaction>, LocateError> {
        let hash = parse_tx_hash(hash)?;

        let lookups = self.networks.iter().cloned().map(move |endpoint| async move {
            match endpoint.rpc.get_transaction(hash).await {
                Ok(Some(tx)) => Some((endpoint, tx)),
                Ok(None) => {
                    debug!(chain = %endpoint.info, %hash, "transaction not on chain");
                    None
                }
                Err(e) => {
                    debug!(chain = %endpoint.info, %hash, error = %e, "lookup failed");
                    None
                }
            }
        });

        let Some((endpoint, tx)) = first_success(lookups).await else {
            debug!(%hash, chains = self.networks.len(), "transaction not found on any chain");
            return Ok(None);
        };
        info!(chain = %endpoint.info, %hash, "transaction located");

        let chain_id = endpoint.info.chain_id;
        if tx.block_hash.is_none() {
            return Err(LocateError::NotMined {
                chain_id,
                hash: hash.to_string(),
            });
        }

        let receipt = endpoint
            .rpc
            .get_transaction_receipt(hash)
            .await
            .map_err(|source| {
                warn!(chain = %endpoint.info, %hash, error = %source, "receipt fetch failed");
                LocateError::Transport {
                    chain_id,
                    method: "eth_getTransactionReceipt",
                    source,
                }
            })?
            .ok_or_else(|| LocateError::MissingReceipt {
                chain_id,
                hash: hash.to_string(),
            })?;

        let block = endpoint
            .rpc
            .get_block(receipt.block_hash)
            .await
            .map_err(|source| {
                warn!(chain = %endpoint.info, block = %receipt.block_hash, error = %source, "block fetch failed");
                LocateError::Transport {
                    chain_id,
                    method: "eth_getBlockByHash",
                    source,
                }
            })?
            .ok_or_else(|| LocateError::MissingBlock {
                chain_id,
                block_hash: receipt.block_hash.to_string(),
            })?;

        Ok(Some(assemble(hash, endpoint.info, tx, receipt, block)))
    }
}

fn assemble(
    hash: B256,
    chain: ChainInfo,
    tx: RpcTransaction,
    receipt: RpcReceipt,
    block: RpcBlock,
) -> LocatedTransaction {
    let status = match receipt.status.map(|s| s.to::<u64>()) {
        Some(0) => TxStatus::Reverted,
        _ => TxStatus::Success,
    };
    let effective_gas_price = receipt
        .effective_gas_price
        .or(tx.gas_price)
        .unwrap_or(U256::ZERO);
    let tx_type = tx_type_label(
        receipt.tx_type.map(|t| t.to::<u64>()),
        tx.tx_type.map(|t| t.to::<u64>()),
    );

    LocatedTransaction {
        hash,
        chain,
        status,
        block_hash: receipt.block_hash,
        block_number: receipt.block_number.to::<u64>(),
        timestamp: block.timestamp.to::<u64>(),
        from: tx.from,
        to: tx.to,
        contract_address: receipt.contract_address,
        value: tx.value,
        nonce: tx.nonce.to::<u64>(),
        gas_used: receipt.gas_used,
        effective_gas_price,
        tx_type,
        transaction_index: receipt.transaction_index.to::<u64>(),
        raw_input: tx.input,
        logs: receipt.logs.into_iter().map(into_log_entry).collect(),
    }
}

fn into_log_entry(log: RpcLog) -> LogEntry {
    LogEntry {
        address: Some(log.address),
        topics: log.topics,
        data: log.data,
        log_index: log.log_index.map(|i| i.to::<u64>()),
    }
}
