//! Facade-level errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Errors building a [`crate::TxLens`] from configuration.
#[derive(Debug, Error)]
pub enum TxLensError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Cannot create RPC client for {network}: {source}")]
    Rpc {
        network: String,
        #[source]
        source: txlens_rpc::TransportError,
    },

    #[error("Cannot create archive client: {0}")]
    Archive(String),

    #[error("Tracing already initialised: {0}")]
    Telemetry(String),
}
