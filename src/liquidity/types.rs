//! Route, observation and allocation types.

use crate::types::{Pubkey, Slot};
use serde::{Deserialize, Serialize};

/// A route to observe on-chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiquidityRoute {
    /// Route identifier (integrator-defined)
    pub route_id: String,
    /// Accounts to observe (read-only)
    pub observed_accounts: Vec<Pubkey>,
}

/// Account state as returned by a [`ChainAccessor`](super::ChainAccessor).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountState {
    pub lamports: u64,
    pub executable: bool,
    pub owner: Pubkey,
    pub data_length: usize,
}

/// Snapshot of a single observed account, bound to its address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountSnapshot {
    pub address: Pubkey,
    pub lamports: u64,
    pub executable: bool,
    pub owner: Pubkey,
    pub data_length: usize,
}

/// Immutable per-route observation. `accounts[i]` corresponds to
/// `observed_accounts[i]` of the route it was taken for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LiquidityObservation {
    /// Route identifier
    pub route_id: String,
    /// Slot at which the observation was sampled
    pub slot: Slot,
    /// Account snapshots, in route order
    pub accounts: Vec<AccountSnapshot>,
}

/// Comparable route metrics. Semantics are owned by the integrator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteMetrics {
    /// Route identifier (integrator-defined)
    pub route_id: String,
    /// Execution cost in micro-lamports; lower is better
    pub execution_cost_micro_lamports: f64,
    /// Fee efficiency in basis points; higher is better
    pub fee_efficiency_bps: f64,
    /// Liquidity depth score; higher is better
    pub liquidity_depth_score: f64,
}

/// Coefficients of the linear scoring model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationWeights {
    pub execution_cost: f64,
    pub fee_efficiency: f64,
    pub liquidity_depth: f64,
}

impl AllocationWeights {
    pub fn new(execution_cost: f64, fee_efficiency: f64, liquidity_depth: f64) -> Self {
        Self {
            execution_cost,
            fee_efficiency,
            liquidity_depth,
        }
    }

    pub fn sum(&self) -> f64 {
        self.execution_cost + self.fee_efficiency + self.liquidity_depth
    }
}

/// Normalized allocation for one route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteAllocation {
    /// Route identifier
    pub route_id: String,
    /// Weight in [0, 1]; weights of one call sum to 1
    pub weight: f64,
}
