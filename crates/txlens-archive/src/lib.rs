//! # txlens-archive
//!
//! Selector-sharded signature archive.
//!
//! Interface fragments are stored in a public archive laid out as
//! `{base}/{kind}/{b0}/{b1}/abi.json`, where `b0` and `b1` are the first two
//! bytes of a selector or event topic. A lookup fetches exactly one shard
//! and returns every fragment of the requested kind found in it; the caller
//! decides which candidate actually matches.
//!
//! - [`ShardKey`] derives the directory path from a discriminator
//! - [`ArchiveSource`] fetches one shard ([`HttpArchive`], [`MemoryArchive`])
//! - [`SignatureArchive`] turns a shard document into a [`txlens_core::FragmentSet`]

pub mod memory;
pub mod remote;
pub mod shard;
pub mod signature;
pub mod source;
mod wire;

pub use memory::MemoryArchive;
pub use remote::{HttpArchive, HttpArchiveConfig, DEFAULT_ARCHIVE_BASE, DEFAULT_FILE_NAME};
pub use shard::ShardKey;
pub use signature::SignatureArchive;
pub use source::{ArchiveDocument, ArchiveSource};
