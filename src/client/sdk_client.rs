//! Stateless client entry point built from injected dependencies only.

use crate::config::{ClusterConfig, ProgramRegistry};
use crate::error::{ErrorCode, Result, ThreeiumError};
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::signer::Signer;
use std::sync::Arc;

/// Signing capability. The SDK never holds key material of its own.
pub type Wallet = Arc<dyn Signer + Send + Sync>;

pub struct ThreeiumClientInit {
    pub connection: Arc<RpcClient>,
    /// Optional; required only for signing flows
    pub wallet: Option<Wallet>,
    pub cluster: ClusterConfig,
    pub programs: ProgramRegistry,
}

pub struct ThreeiumClient {
    pub connection: Arc<RpcClient>,
    pub wallet: Option<Wallet>,
    pub cluster: ClusterConfig,
    pub programs: ProgramRegistry,
}

impl ThreeiumClient {
    pub fn new(init: ThreeiumClientInit) -> Self {
        Self {
            connection: init.connection,
            wallet: init.wallet,
            cluster: init.cluster,
            programs: init.programs,
        }
    }

    /// True if a signer was injected.
    pub fn can_sign(&self) -> bool {
        self.wallet.is_some()
    }

    /// The injected signer, or `E_SIGNER_REQUIRED`.
    pub fn require_signer(&self) -> Result<Wallet> {
        self.wallet.clone().ok_or_else(|| {
            ThreeiumError::invalid_input(ErrorCode::SignerRequired, "Wallet signer is required")
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ClusterName, Commitment};
    use solana_sdk::signature::Keypair;

    fn init(wallet: Option<Wallet>) -> ThreeiumClientInit {
        ThreeiumClientInit {
            connection: Arc::new(RpcClient::new("http://127.0.0.1:8899".to_string())),
            wallet,
            cluster: ClusterConfig {
                cluster: ClusterName::Devnet,
                rpc_url: "http://127.0.0.1:8899".to_string(),
                commitment: Commitment::Confirmed,
            },
            programs: ProgramRegistry::default(),
        }
    }

    #[tokio::test]
    async fn test_read_only_client_cannot_sign() {
        let client = ThreeiumClient::new(init(None));
        assert!(!client.can_sign());
        assert_eq!(client.require_signer().err().unwrap().code(), ErrorCode::SignerRequired);
    }

    #[tokio::test]
    async fn test_client_with_signer() {
        let keypair = Keypair::new();
        let expected = keypair.pubkey();
        let client = ThreeiumClient::new(init(Some(Arc::new(keypair))));
        assert!(client.can_sign());
        assert_eq!(client.require_signer().unwrap().pubkey(), expected);
    }
}
