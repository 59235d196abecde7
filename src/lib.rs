//! Threeium SDK - deterministic decision core for Solana integrators.
//!
//! The SDK orders and assembles instructions into reproducible plans,
//! turns on-chain observations into comparable route metrics, allocates
//! weights across routes with an explicit linear model, and aggregates
//! fee/revenue evidence into a net yield report. All configuration is
//! explicit; nothing is defaulted or cached between calls.

pub mod client;
pub mod config;
pub mod error;
pub mod execution;
pub mod idl;
pub mod ledger;
pub mod liquidity;
pub mod types;

// Re-export main types for convenience
pub use client::{ConnectionManager, ThreeiumClient, ThreeiumClientInit};
pub use config::{ClusterConfig, ProgramRegistry};
pub use error::{ErrorCode, Result, ThreeiumError};
pub use execution::{ExecutionPlan, ExecutionRouter, PriorityFeeInjection, TransactionComposer};
pub use idl::{load_idl_from_file, load_idl_from_url, AnchorIdl};
pub use ledger::{YieldCalculator, YieldInputs, YieldReport};
pub use liquidity::{
    allocate_routes, AllocationWeights, ChainAccessor, LiquidityEngine, RouteAllocation,
    RouteMetrics,
};
