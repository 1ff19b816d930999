//! HTTP-backed archive.
//!
//! Fetches `{base_url}/{kind}/{b0}/{b1}/{file_name}` with a plain GET. The
//! archive is a static file tree, so there is no API key, pagination or
//! rate limiting to deal with.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use txlens_core::FragmentKind;

use crate::shard::ShardKey;
use crate::source::{ArchiveDocument, ArchiveSource};

pub const DEFAULT_ARCHIVE_BASE: &str =
    "https://raw.githubusercontent.com/imelon2/abi-archive/refs/heads/main/archive";
pub const DEFAULT_FILE_NAME: &str = "abi.json";

// ─── Config ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct HttpArchiveConfig {
    pub base_url: String,
    pub file_name: String,
    pub timeout: Duration,
}

impl Default for HttpArchiveConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_ARCHIVE_BASE.into(),
            file_name: DEFAULT_FILE_NAME.into(),
            timeout: Duration::from_secs(15),
        }
    }
}

// ─── Archive ─────────────────────────────────────────────────────────────────

pub struct HttpArchive {
    client: Client,
    base_url: String,
    file_name: String,
}

impl HttpArchive {
    pub fn new(config: HttpArchiveConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("txlens/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            file_name: config.file_name,
        })
    }

    /// Location of one shard document.
    pub fn url_for(&self, kind: FragmentKind, shard: &ShardKey) -> String {
        format!(
            "{}/{}/{}/{}/{}",
            self.base_url,
            kind.as_str(),
            shard.first(),
            shard.second(),
            self.file_name
        )
    }
}

#[async_trait]
impl ArchiveSource for HttpArchive {
    async fn fetch(&self, kind: FragmentKind, shard: &ShardKey) -> Option<ArchiveDocument> {
        let url = self.url_for(kind, shard);

        let resp = match self.client.get(&url).send().await {
            Ok(r) => r,
            Err(e) => {
                tracing::debug!(%url, error = %e, "archive request failed");
                return None;
            }
        };
        if !resp.status().is_success() {
            tracing::debug!(%url, status = resp.status().as_u16(), "archive shard unavailable");
            return None;
        }

        let entries = match resp.json::<Value>().await {
            Ok(Value::Array(entries)) => entries,
            Ok(_) => {
                tracing::debug!(%url, "archive shard is not a JSON array");
                return None;
            }
            Err(e) => {
                tracing::debug!(%url, error = %e, "archive shard is not valid JSON");
                return None;
            }
        };
        if entries.is_empty() {
            return None;
        }

        Some(ArchiveDocument { url, entries })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn archive(base: &str) -> HttpArchive {
        HttpArchive::new(HttpArchiveConfig {
            base_url: base.into(),
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn url_follows_archive_layout() {
        let a = archive(DEFAULT_ARCHIVE_BASE);
        let key = ShardKey::from_discriminator(&[0xa9, 0x05, 0x9c, 0xbb]).unwrap();
        assert_eq!(
            a.url_for(FragmentKind::Function, &key),
            "https://raw.githubusercontent.com/imelon2/abi-archive/refs/heads/main/archive/function/a9/05/abi.json"
        );
    }

    #[test]
    fn trailing_slash_on_base_is_ignored() {
        let a = archive("https://example.org/archive/");
        let key = ShardKey::from_discriminator(&[0xdd, 0xf2]).unwrap();
        assert_eq!(
            a.url_for(FragmentKind::Event, &key),
            "https://example.org/archive/event/dd/f2/abi.json"
        );
    }

    #[tokio::test]
    async fn unreachable_archive_is_none() {
        let a = HttpArchive::new(HttpArchiveConfig {
            base_url: "http://127.0.0.1:9".into(),
            timeout: Duration::from_secs(2),
            ..Default::default()
        })
        .unwrap();
        let key = ShardKey::from_discriminator(&[0xa9, 0x05]).unwrap();
        assert!(a.fetch(FragmentKind::Function, &key).await.is_none());
    }

    #[tokio::test]
    #[ignore = "requires network access"]
    async fn fetches_transfer_shard() {
        let a = HttpArchive::new(HttpArchiveConfig::default()).unwrap();
        let key = ShardKey::from_discriminator(&[0xa9, 0x05]).unwrap();
        let doc = a.fetch(FragmentKind::Function, &key).await.unwrap();
        assert!(!doc.entries.is_empty());
        assert!(doc.url.ends_with("/function/a9/05/abi.json"));
    }
}
