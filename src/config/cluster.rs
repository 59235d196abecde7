//! Cluster configuration. Every field is required; there are no defaults.

use crate::error::{require_non_empty, ErrorCode, Result, ThreeiumError};
use crate::types::CommitmentConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ClusterName {
    MainnetBeta,
    Devnet,
    Testnet,
    Custom,
}

impl ClusterName {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClusterName::MainnetBeta => "mainnet-beta",
            ClusterName::Devnet => "devnet",
            ClusterName::Testnet => "testnet",
            ClusterName::Custom => "custom",
        }
    }
}

/// Read-freshness level requested from the cluster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Commitment {
    Processed,
    Confirmed,
    Finalized,
}

impl Commitment {
    pub fn to_commitment_config(self) -> CommitmentConfig {
        match self {
            Commitment::Processed => CommitmentConfig::processed(),
            Commitment::Confirmed => CommitmentConfig::confirmed(),
            Commitment::Finalized => CommitmentConfig::finalized(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ClusterConfig {
    pub cluster: ClusterName,
    pub rpc_url: String,
    pub commitment: Commitment,
}

impl ClusterConfig {
    /// Parse and validate a JSON configuration document.
    pub fn from_json_str(raw: &str) -> Result<Self> {
        let config: ClusterConfig = serde_json::from_str(raw).map_err(|e| {
            ThreeiumError::invalid_input(ErrorCode::ConfigParseFailed, "invalid cluster config")
                .with_detail("reason", e.to_string())
        })?;
        validate_cluster_config(&config)?;
        Ok(config)
    }

    /// Load a JSON configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            ThreeiumError::collaborator(
                ErrorCode::ConfigParseFailed,
                "failed to read cluster config",
                e,
            )
            .with_detail("path", path.display().to_string())
        })?;
        debug!("Loaded cluster config from {}", path.display());
        Self::from_json_str(&raw)
    }
}

/// Fail-fast validation of a [`ClusterConfig`].
pub fn validate_cluster_config(config: &ClusterConfig) -> Result<()> {
    require_non_empty(&config.rpc_url, ErrorCode::RpcUrlRequired, "rpcUrl is required")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let config = ClusterConfig::from_json_str(
            r#"{
                "cluster": "mainnet-beta",
                "rpcUrl": "https://api.mainnet-beta.solana.com",
                "commitment": "confirmed"
            }"#,
        )
        .unwrap();
        assert_eq!(config.cluster, ClusterName::MainnetBeta);
        assert_eq!(config.commitment.to_commitment_config(), CommitmentConfig::confirmed());
    }

    #[test]
    fn test_missing_field_is_rejected() {
        let raw = r#"{"cluster":"devnet","rpcUrl":"http://localhost:8899"}"#;
        let err = ClusterConfig::from_json_str(raw).unwrap_err();
        assert_eq!(err.code(), ErrorCode::ConfigParseFailed);
    }

    #[test]
    fn test_empty_rpc_url_is_rejected() {
        let raw = r#"{"cluster":"custom","rpcUrl":"","commitment":"processed"}"#;
        let err = ClusterConfig::from_json_str(raw).unwrap_err();
        assert_eq!(err.code(), ErrorCode::RpcUrlRequired);
    }

    #[test]
    fn test_unknown_commitment_is_rejected() {
        let raw = r#"{"cluster":"devnet","rpcUrl":"http://x","commitment":"recent"}"#;
        let err = ClusterConfig::from_json_str(raw).unwrap_err();
        assert_eq!(err.code(), ErrorCode::ConfigParseFailed);
    }
}
