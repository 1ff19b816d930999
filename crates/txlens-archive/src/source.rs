//! The archive capability.

use async_trait::async_trait;
use serde_json::Value;
use txlens_core::FragmentKind;

use crate::shard::ShardKey;

/// Raw shard contents plus the location they came from.
#[derive(Debug, Clone, PartialEq)]
pub struct ArchiveDocument {
    pub url: String,
    pub entries: Vec<Value>,
}

/// Fetches one shard of the archive.
///
/// Every failure mode (transport error, bad status, unparsable body, empty
/// shard) is reported as `None`; callers cannot and need not tell them
/// apart.
#[async_trait]
pub trait ArchiveSource: Send + Sync {
    async fn fetch(&self, kind: FragmentKind, shard: &ShardKey) -> Option<ArchiveDocument>;
}
