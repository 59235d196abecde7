//! Read-only chain access contract used by the liquidity engine.

use crate::liquidity::types::AccountState;
use crate::types::{CommitmentConfig, Pubkey, Slot};
use anyhow::Result;
use async_trait::async_trait;

/// Read-only chain accessor.
///
/// Implementations own any timeout, retry or rate-limit policy; the engine
/// calls each method exactly once per route and propagates failures as-is.
#[async_trait]
pub trait ChainAccessor: Send + Sync {
    /// Fetches account state for every address.
    ///
    /// The returned vector MUST have one entry per requested address, in
    /// request order. `None` marks an account that does not exist.
    async fn get_account_batch(
        &self,
        addresses: &[Pubkey],
        commitment: CommitmentConfig,
    ) -> Result<Vec<Option<AccountState>>>;

    /// Returns the current slot at the given commitment.
    async fn get_current_slot(&self, commitment: CommitmentConfig) -> Result<Slot>;
}
