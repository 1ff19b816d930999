//! Archive lookup by selector or topic.

use std::sync::Arc;

use txlens_core::{FragmentKind, FragmentSet};

use crate::shard::ShardKey;
use crate::source::ArchiveSource;
use crate::wire::parse_entry;

/// Resolves a discriminator (4-byte selector or 32-byte topic) to the
/// fragments stored in its shard.
#[derive(Clone)]
pub struct SignatureArchive {
    source: Arc<dyn ArchiveSource>,
}

impl SignatureArchive {
    pub fn new(source: Arc<dyn ArchiveSource>) -> Self {
        Self { source }
    }

    /// All usable fragments of `kind` in the shard of `discriminator`, in
    /// archive order.
    ///
    /// The shard holds every entry whose discriminator shares the first two
    /// bytes, so the result is a candidate list, not a match.
    pub async fn lookup(&self, kind: FragmentKind, discriminator: &[u8]) -> Option<FragmentSet> {
        let shard = ShardKey::from_discriminator(discriminator)?;
        let doc = self.source.fetch(kind, &shard).await?;

        let total = doc.entries.len();
        let fragments: Vec<_> = doc
            .entries
            .iter()
            .filter_map(|raw| parse_entry(kind, raw))
            .collect();
        if fragments.len() < total {
            tracing::debug!(
                url = %doc.url,
                skipped = total - fragments.len(),
                "skipped unusable archive entries"
            );
        }
        if fragments.is_empty() {
            tracing::debug!(url = %doc.url, %kind, "no usable fragments in shard");
            return None;
        }

        Some(FragmentSet {
            kind,
            fragments,
            provenance_url: doc.url,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryArchive;
    use serde_json::json;

    const TRANSFER: [u8; 4] = [0xa9, 0x05, 0x9c, 0xbb];

    fn archive(mem: MemoryArchive) -> SignatureArchive {
        SignatureArchive::new(Arc::new(mem))
    }

    #[tokio::test]
    async fn candidates_keep_archive_order() {
        let mem = MemoryArchive::new().with(
            FragmentKind::Function,
            &TRANSFER,
            vec![
                json!({"type": "function", "name": "transfer", "inputs": [{"type": "address"}, {"type": "uint256"}]}),
                json!({"type": "function", "name": "zzz_collision", "inputs": []}),
                json!({"type": "function", "name": "allowance", "inputs": [{"type": "address"}, {"type": "address"}]}),
            ],
        );
        let set = archive(mem).lookup(FragmentKind::Function, &TRANSFER).await.unwrap();
        let names: Vec<_> = set.functions().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["transfer", "zzz_collision", "allowance"]);
        assert_eq!(set.provenance_url, "memory://function/a9/05");
    }

    #[tokio::test]
    async fn other_kinds_and_garbage_are_filtered() {
        let mem = MemoryArchive::new().with(
            FragmentKind::Event,
            &[0xdd, 0xf2],
            vec![
                json!({"type": "function", "name": "transfer", "inputs": []}),
                json!(42),
                json!({"type": "event", "name": "Transfer", "inputs": []}),
            ],
        );
        let set = archive(mem).lookup(FragmentKind::Event, &[0xdd, 0xf2, 0x52]).await.unwrap();
        assert_eq!(set.len(), 1);
        assert_eq!(set.fragments[0].name(), "Transfer");
    }

    #[tokio::test]
    async fn shard_with_nothing_usable_is_none() {
        let mem = MemoryArchive::new().with(
            FragmentKind::Error,
            &TRANSFER,
            vec![json!({"type": "function", "name": "transfer"})],
        );
        assert!(archive(mem).lookup(FragmentKind::Error, &TRANSFER).await.is_none());
    }

    #[tokio::test]
    async fn missing_shard_and_short_input_are_none() {
        let a = archive(MemoryArchive::new());
        assert!(a.lookup(FragmentKind::Function, &TRANSFER).await.is_none());
        assert!(a.lookup(FragmentKind::Function, &[0xa9]).await.is_none());
    }
}
