//! Per-candidate decode failures.
//!
//! These never leave the crate's public decode entry points: a candidate
//! that fails is skipped, and a record with no matching candidate degrades
//! to its raw form.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("Selector mismatch: fragment {expected}, input {got}")]
    SelectorMismatch { expected: String, got: String },

    #[error("Topic count mismatch: expected {expected}, got {got}")]
    TopicCount { expected: usize, got: usize },

    #[error("Log data is empty but the event declares non-indexed fields")]
    MissingData,

    #[error("Unsupported parameter type '{ty}': {reason}")]
    UnsupportedType { ty: String, reason: String },

    #[error("ABI decode failed: {reason}")]
    AbiDecodeFailed { reason: String },
}
