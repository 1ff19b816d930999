//! In-memory archive.
//!
//! Suitable for tests and offline use. Thread-safe via `Arc<RwLock<_>>`.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use serde_json::Value;
use txlens_core::FragmentKind;

use crate::shard::ShardKey;
use crate::source::{ArchiveDocument, ArchiveSource};

#[derive(Clone, Default)]
pub struct MemoryArchive {
    shards: Arc<RwLock<HashMap<(FragmentKind, ShardKey), Vec<Value>>>>,
}

impl MemoryArchive {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append raw ABI entries to the shard of `discriminator`.
    ///
    /// Returns `false` if the discriminator is too short to shard.
    pub fn insert(&self, kind: FragmentKind, discriminator: &[u8], entries: Vec<Value>) -> bool {
        let Some(key) = ShardKey::from_discriminator(discriminator) else {
            return false;
        };
        let mut shards = match self.shards.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        shards.entry((kind, key)).or_default().extend(entries);
        true
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with(self, kind: FragmentKind, discriminator: &[u8], entries: Vec<Value>) -> Self {
        self.insert(kind, discriminator, entries);
        self
    }
}

#[async_trait]
impl ArchiveSource for MemoryArchive {
    async fn fetch(&self, kind: FragmentKind, shard: &ShardKey) -> Option<ArchiveDocument> {
        let shards = match self.shards.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let entries = shards.get(&(kind, shard.clone()))?;
        if entries.is_empty() {
            return None;
        }
        Some(ArchiveDocument {
            url: format!("memory://{}/{}", kind.as_str(), shard.path()),
            entries: entries.clone(),
        })
    }
}
