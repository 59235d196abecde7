//! `ChainAccessor` backed by the Solana JSON-RPC client.

use crate::liquidity::accessor::ChainAccessor;
use crate::liquidity::types::AccountState;
use crate::types::{CommitmentConfig, Pubkey, Slot};
use anyhow::{Context, Result};
use async_trait::async_trait;
use solana_client::nonblocking::rpc_client::RpcClient;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Reads accounts and slots through `getMultipleAccounts` / `getSlot`.
#[derive(Clone)]
pub struct RpcChainAccessor {
    rpc_client: Arc<RpcClient>,
}

impl RpcChainAccessor {
    pub fn new(rpc_client: Arc<RpcClient>) -> Self {
        Self { rpc_client }
    }
}

#[async_trait]
impl ChainAccessor for RpcChainAccessor {
    #[instrument(skip(self, addresses), fields(count = addresses.len()))]
    async fn get_account_batch(
        &self,
        addresses: &[Pubkey],
        commitment: CommitmentConfig,
    ) -> Result<Vec<Option<AccountState>>> {
        let response = self
            .rpc_client
            .get_multiple_accounts_with_commitment(addresses, commitment)
            .await
            .context("getMultipleAccounts request failed")?;

        debug!(
            "getMultipleAccounts returned {} entries at context slot {}",
            response.value.len(),
            response.context.slot
        );

        // getMultipleAccounts answers positionally, one entry per key.
        Ok(response
            .value
            .into_iter()
            .map(|maybe_account| {
                maybe_account.map(|account| AccountState {
                    lamports: account.lamports,
                    executable: account.executable,
                    owner: account.owner,
                    data_length: account.data.len(),
                })
            })
            .collect())
    }

    #[instrument(skip(self))]
    async fn get_current_slot(&self, commitment: CommitmentConfig) -> Result<Slot> {
        self.rpc_client
            .get_slot_with_commitment(commitment)
            .await
            .context("getSlot request failed")
    }
}
