//! txlens-rpc: chain access for txlens.
//!
//! # Overview
//!
//! - [`RpcTransport`]: async trait for sending JSON-RPC requests
//! - [`HttpRpcClient`]: `reqwest`-backed transport with retry/backoff
//! - [`ChainRpc`]: the typed capability the locator consumes
//!   (`getTransaction`, `getTransactionReceipt`, `getBlock`)
//! - [`TransactionLocator`]: finds which configured chain holds a hash

pub mod error;
pub mod eth;
pub mod http;
pub mod locator;
pub mod request;
pub mod retry;
pub mod transport;

pub use error::{LocateError, TransportError};
pub use eth::{ChainRpc, EthClient, RpcBlock, RpcLog, RpcReceipt, RpcTransaction};
pub use http::{HttpClientConfig, HttpRpcClient};
pub use locator::{ChainEndpoint, Networks, TransactionLocator};
pub use request::{JsonRpcRequest, JsonRpcResponse, RpcId};
pub use retry::{RetryConfig, RetryPolicy};
pub use transport::RpcTransport;
