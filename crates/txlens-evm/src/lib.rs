//! # txlens-evm
//!
//! EVM decoding for txlens.
//!
//! Fragments come from the signature archive rather than from a contract
//! ABI, so every decoder here works against a *candidate list* and picks
//! the first candidate that fits the bytes exactly.
//!
//! - [`Decoder`]: call data, event logs and revert data
//! - [`dacert`]: batch payload classification and DA certificate slicing
//! - [`normalizer`]: `DynSolValue` → [`txlens_core::NormalizedValue`]

mod abi;
pub mod call;
pub mod dacert;
pub mod error;
pub mod event;
pub mod normalizer;
pub mod pipeline;
pub mod revert;

pub use dacert::{
    classify_and_decode_batch, classify_payload, decode_da_cert, BatchPayload, DaCertificate,
    BATCH_SELECTORS, DA_CERT_HEADER, DA_CERT_MIN_LEN,
};
pub use error::DecodeError;
pub use pipeline::Decoder;
