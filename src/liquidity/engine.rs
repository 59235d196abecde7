//! Liquidity engine - observes on-chain account state per route and turns it
//! into comparable metrics through a caller-supplied derivation function.
//!
//! The engine reads chain state only and never interprets it: the
//! derivation function owns all protocol semantics.

use crate::error::{require_non_empty, ErrorCode, Result, ThreeiumError};
use crate::liquidity::accessor::ChainAccessor;
use crate::liquidity::types::{AccountSnapshot, LiquidityObservation, LiquidityRoute, RouteMetrics};
use crate::types::CommitmentConfig;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Observes routes through a [`ChainAccessor`] at a fixed commitment.
pub struct LiquidityEngine {
    accessor: Arc<dyn ChainAccessor>,
    commitment: CommitmentConfig,
}

impl LiquidityEngine {
    /// Create a new engine. The commitment is mandatory and used for every read.
    pub fn new(accessor: Arc<dyn ChainAccessor>, commitment: CommitmentConfig) -> Self {
        Self {
            accessor,
            commitment,
        }
    }

    pub fn commitment(&self) -> CommitmentConfig {
        self.commitment
    }

    /// Observes each route in input order and derives its metrics.
    ///
    /// Routes are processed strictly one after another. The first failure
    /// aborts the call; no metrics are returned for any route.
    #[instrument(skip(self, routes, derive), fields(routes = routes.len()))]
    pub async fn observe_and_derive<F>(
        &self,
        routes: &[LiquidityRoute],
        derive: F,
    ) -> Result<Vec<RouteMetrics>>
    where
        F: Fn(&LiquidityObservation) -> RouteMetrics,
    {
        let mut results = Vec::with_capacity(routes.len());

        for route in routes {
            let observation = self.observe_route(route).await?;
            results.push(derive(&observation));
        }

        info!("Derived metrics for {} routes", results.len());
        Ok(results)
    }

    /// Takes a single observation: account batch first, then the slot.
    #[instrument(
        skip(self, route),
        fields(route_id = %route.route_id, accounts = route.observed_accounts.len())
    )]
    pub async fn observe_route(&self, route: &LiquidityRoute) -> Result<LiquidityObservation> {
        require_non_empty(&route.route_id, ErrorCode::RouteIdRequired, "routeId is required")?;

        let addresses: Vec<String> =
            route.observed_accounts.iter().map(|a| a.to_string()).collect();

        let infos = self
            .accessor
            .get_account_batch(&route.observed_accounts, self.commitment)
            .await
            .map_err(|e| {
                warn!("Account batch fetch failed for route {}: {}", route.route_id, e);
                ThreeiumError::collaborator(
                    ErrorCode::ChainAccessFailed,
                    "account batch fetch failed",
                    e,
                )
                .with_detail("routeId", route.route_id.as_str())
                .with_detail("operation", "getAccountBatch")
                .with_detail("addresses", addresses.clone())
            })?;

        let slot = self
            .accessor
            .get_current_slot(self.commitment)
            .await
            .map_err(|e| {
                warn!("Slot fetch failed for route {}: {}", route.route_id, e);
                ThreeiumError::collaborator(ErrorCode::ChainAccessFailed, "slot fetch failed", e)
                    .with_detail("routeId", route.route_id.as_str())
                    .with_detail("operation", "getCurrentSlot")
                    .with_detail("addresses", addresses)
            })?;

        if infos.len() != route.observed_accounts.len() {
            return Err(ThreeiumError::integrity(
                ErrorCode::AccountBatchMismatch,
                "account batch length does not match requested accounts",
            )
            .with_detail("routeId", route.route_id.as_str())
            .with_detail("requested", route.observed_accounts.len())
            .with_detail("returned", infos.len()));
        }

        let mut accounts = Vec::with_capacity(infos.len());
        for (index, (address, info)) in route.observed_accounts.iter().zip(infos).enumerate() {
            let info = info.ok_or_else(|| {
                ThreeiumError::integrity(
                    ErrorCode::AccountInfoMissing,
                    "account info missing from RPC response",
                )
                .with_detail("routeId", route.route_id.as_str())
                .with_detail("address", address.to_string())
                .with_detail("index", index)
            })?;

            accounts.push(AccountSnapshot {
                address: *address,
                lamports: info.lamports,
                executable: info.executable,
                owner: info.owner,
                data_length: info.data_length,
            });
        }

        debug!("Observed {} accounts at slot {}", accounts.len(), slot);

        Ok(LiquidityObservation {
            route_id: route.route_id.clone(),
            slot,
            accounts,
        })
    }
}
