//! Connection manager.
//!
//! Validates the RPC URL, enforces the configured commitment and builds the
//! read-only RPC client. Nothing here sends transactions.

use crate::config::{validate_cluster_config, ClusterConfig};
use crate::error::{ErrorCode, Result, ThreeiumError};
use crate::liquidity::RpcChainAccessor;
use reqwest::Url;
use solana_client::nonblocking::rpc_client::RpcClient;
use std::sync::Arc;
use tracing::info;

pub struct ConnectionManager {
    config: ClusterConfig,
    connection: Arc<RpcClient>,
}

impl ConnectionManager {
    pub fn new(config: ClusterConfig) -> Result<Self> {
        validate_cluster_config(&config)?;

        let url = Url::parse(&config.rpc_url).map_err(|e| {
            ThreeiumError::invalid_input(ErrorCode::RpcUrlInvalid, "rpcUrl must be a valid URL")
                .with_detail("rpcUrl", config.rpc_url.as_str())
                .with_detail("reason", e.to_string())
        })?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ThreeiumError::invalid_input(
                ErrorCode::RpcUrlInvalid,
                "rpcUrl must use http or https",
            )
            .with_detail("rpcUrl", config.rpc_url.as_str()));
        }

        let connection = Arc::new(RpcClient::new_with_commitment(
            config.rpc_url.clone(),
            config.commitment.to_commitment_config(),
        ));

        info!(
            "Connection configured for {} ({}) at {:?} commitment",
            config.cluster.as_str(),
            url.host_str().unwrap_or_default(),
            config.commitment
        );

        Ok(Self { config, connection })
    }

    pub fn connection(&self) -> Arc<RpcClient> {
        self.connection.clone()
    }

    pub fn config(&self) -> &ClusterConfig {
        &self.config
    }

    /// Chain accessor over this connection, for the liquidity engine.
    pub fn chain_accessor(&self) -> RpcChainAccessor {
        RpcChainAccessor::new(self.connection.clone())
    }
}
