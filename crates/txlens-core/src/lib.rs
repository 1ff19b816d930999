//! # txlens-core
//!
//! Data model, hex utilities and concurrency primitives shared across the
//! txlens crates. The RPC locator, the signature archive and the decode
//! pipeline are all built on the types defined here.

pub mod call;
pub mod chain;
pub mod error;
pub mod event;
pub mod fragment;
pub mod hexutil;
pub mod race;
pub mod tx;
pub mod types;

pub use call::{DecodedCall, DecodedError};
pub use chain::ChainInfo;
pub use error::{InputError, PayloadError};
pub use event::{DecodedEvent, UNKNOWN_EVENT};
pub use fragment::{FragmentKind, FragmentSet, SchemaFragment};
pub use race::first_success;
pub use tx::{LocatedTransaction, LogEntry, TxStatus};
pub use types::{NamedParams, NormalizedValue};
