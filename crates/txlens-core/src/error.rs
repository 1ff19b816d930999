//! Error types for malformed caller input and malformed payloads.

use thiserror::Error;

/// Input rejected before any I/O is attempted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("Invalid transaction hash '{value}': expected 0x followed by 64 hex characters")]
    InvalidHash { value: String },

    #[error("Invalid hex input: {reason}")]
    InvalidHex { reason: String },
}

/// A binary payload that does not fit its fixed layout.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PayloadError {
    #[error("Malformed payload: {len} bytes, need at least {min}")]
    Malformed { len: usize, min: usize },
}
