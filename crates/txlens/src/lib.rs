//! # txlens
//!
//! Find a transaction on whichever configured EVM chain holds it, and
//! decode its call data, event logs and rollup batch payload against a
//! public selector-sharded signature archive.
//!
//! ```ignore
//! let config = TxLensConfig::from_file("txlens.yaml")?;
//! let lens = TxLens::from_config(&config)?;
//! if let Some(report) = lens.inspect("0x88df...944b").await? {
//!     println!("{} on {}", report.call.method_name.unwrap_or_default(), report.transaction.chain);
//! }
//! ```

pub mod config;
pub mod error;
pub mod service;
pub mod telemetry;

pub use config::{ArchiveConfig, NetworkConfig, RpcConfig, TxLensConfig};
pub use error::{ConfigError, TxLensError};
pub use service::{TransactionReport, TxLens};
pub use telemetry::{init_tracing, LogConfig};

pub use txlens_core::{
    ChainInfo, DecodedCall, DecodedError, DecodedEvent, InputError, LocatedTransaction, LogEntry,
    NormalizedValue, PayloadError, TxStatus,
};
pub use txlens_evm::{BatchPayload, DaCertificate};
pub use txlens_rpc::LocateError;
