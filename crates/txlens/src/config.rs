//! YAML configuration.
//!
//! Every section is optional; an empty document yields the built-in
//! network list and the public signature archive.
//!
//! ```yaml
//! networks:
//!   - chain_id: 42161
//!     name: Arbitrum One
//!     native_symbol: ETH
//!     rpc_url: https://arb1.arbitrum.io/rpc
//! archive:
//!   timeout_secs: 10
//! rpc:
//!   max_retries: 1
//! log:
//!   level: info
//!   components:
//!     txlens-rpc: debug
//! ```

use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use txlens_archive::{HttpArchiveConfig, DEFAULT_ARCHIVE_BASE, DEFAULT_FILE_NAME};
use txlens_core::ChainInfo;
use txlens_rpc::{HttpClientConfig, RetryConfig};

use crate::error::ConfigError;
use crate::telemetry::LogConfig;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TxLensConfig {
    #[serde(default = "default_networks")]
    pub networks: Vec<NetworkConfig>,
    #[serde(default)]
    pub archive: ArchiveConfig,
    #[serde(default)]
    pub rpc: RpcConfig,
    #[serde(default)]
    pub log: LogConfig,
}

impl Default for TxLensConfig {
    fn default() -> Self {
        Self {
            networks: default_networks(),
            archive: ArchiveConfig::default(),
            rpc: RpcConfig::default(),
            log: LogConfig::default(),
        }
    }
}

impl TxLensConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = if yaml.trim().is_empty() {
            Self::default()
        } else {
            serde_yaml::from_str(yaml)?
        };
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml_str(&yaml)
    }

    /// Chain IDs must be unique and every network needs an RPC URL.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for n in &self.networks {
            if n.rpc_url.trim().is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "network '{}' ({}) has no rpc_url",
                    n.name, n.chain_id
                )));
            }
            if !seen.insert(n.chain_id) {
                return Err(ConfigError::Invalid(format!(
                    "chain_id {} is configured twice",
                    n.chain_id
                )));
            }
        }
        Ok(())
    }
}

/// One chain to search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkConfig {
    pub chain_id: u64,
    pub name: String,
    #[serde(default = "default_symbol")]
    pub native_symbol: String,
    pub rpc_url: String,
}

impl NetworkConfig {
    pub fn new(chain_id: u64, name: &str, native_symbol: &str, rpc_url: &str) -> Self {
        Self {
            chain_id,
            name: name.into(),
            native_symbol: native_symbol.into(),
            rpc_url: rpc_url.into(),
        }
    }

    pub fn chain_info(&self) -> ChainInfo {
        ChainInfo::new(self.chain_id, self.name.clone(), self.native_symbol.clone())
    }
}

fn default_symbol() -> String {
    "ETH".into()
}

/// Built-in network list.
pub fn default_networks() -> Vec<NetworkConfig> {
    vec![
        NetworkConfig::new(1, "Ethereum", "ETH", "https://eth.merkle.io"),
        NetworkConfig::new(11155111, "Sepolia", "ETH", "https://sepolia.drpc.org"),
        NetworkConfig::new(42161, "Arbitrum One", "ETH", "https://arb1.arbitrum.io/rpc"),
        NetworkConfig::new(421614, "Arbitrum Sepolia", "ETH", "https://sepolia-rollup.arbitrum.io/rpc"),
        NetworkConfig::new(8217, "Kaia", "KAIA", "https://public-en.node.kaia.io"),
        NetworkConfig::new(137, "Polygon", "POL", "https://polygon-rpc.com"),
        NetworkConfig::new(61022448, "Dkargo", "DKA", "https://rpc.warehouse.dkargo.io"),
        NetworkConfig::new(1337, "Localhost", "ETH", "http://127.0.0.1:8545"),
    ]
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArchiveConfig {
    pub base_url: String,
    pub file_name: String,
    pub timeout_secs: u64,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_ARCHIVE_BASE.into(),
            file_name: DEFAULT_FILE_NAME.into(),
            timeout_secs: 15,
        }
    }
}

impl ArchiveConfig {
    pub fn http_config(&self) -> HttpArchiveConfig {
        HttpArchiveConfig {
            base_url: self.base_url.clone(),
            file_name: self.file_name.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }
}

/// Per-endpoint HTTP behaviour, shared by every configured network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RpcConfig {
    pub timeout_secs: u64,
    pub max_retries: u32,
    pub initial_backoff_ms: u64,
}

impl Default for RpcConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 20,
            max_retries: 2,
            initial_backoff_ms: 200,
        }
    }
}

impl RpcConfig {
    pub fn http_config(&self) -> HttpClientConfig {
        HttpClientConfig {
            retry: RetryConfig {
                max_retries: self.max_retries,
                initial_backoff: Duration::from_millis(self.initial_backoff_ms),
                ..Default::default()
            },
            request_timeout: Duration::from_secs(self.timeout_secs),
        }
    }
}
