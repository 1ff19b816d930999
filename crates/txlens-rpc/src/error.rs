//! Transport-level and locate-level error types.

use thiserror::Error;
use txlens_core::InputError;

use crate::request::JsonRpcError;

/// Errors that can occur while talking to one chain endpoint.
#[derive(Debug, Error)]
pub enum TransportError {
    /// HTTP request failed (connection refused, timeout, non-2xx status).
    #[error("HTTP error: {0}")]
    Http(String),

    /// JSON-RPC protocol-level error returned by the node.
    #[error("RPC error {}: {}", .0.code, .0.message)]
    Rpc(JsonRpcError),

    /// Response could not be deserialized.
    #[error("Deserialization error: {0}")]
    Deserialization(#[from] serde_json::Error),
}

impl TransportError {
    /// Returns `true` if this error is transient and worth retrying.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Http(_))
    }
}

/// Errors surfaced by [`crate::TransactionLocator::locate`].
///
/// "Not found on any chain" is not an error; it is `Ok(None)`.
#[derive(Debug, Error)]
pub enum LocateError {
    #[error(transparent)]
    InvalidInput(#[from] InputError),

    /// A follow-up call on the winning chain failed.
    #[error("{method} on chain {chain_id} failed: {source}")]
    Transport {
        chain_id: u64,
        method: &'static str,
        #[source]
        source: TransportError,
    },

    #[error("Transaction {hash} is not mined yet on chain {chain_id}")]
    NotMined { chain_id: u64, hash: String },

    #[error("No receipt for {hash} on chain {chain_id}")]
    MissingReceipt { chain_id: u64, hash: String },

    #[error("Block {block_hash} not returned by chain {chain_id}")]
    MissingBlock { chain_id: u64, block_hash: String },
}
