//! Liquidity module - route observation and weighted route allocation.
//!
//! The [`LiquidityEngine`] turns raw account observations into
//! [`RouteMetrics`] through a caller-supplied derivation function, and
//! [`allocate_routes`] converts metrics into a normalized weight
//! distribution. The two never call each other.

pub mod accessor;
pub mod allocator;
pub mod engine;
pub mod rpc;
pub mod types;

pub use accessor::ChainAccessor;
pub use allocator::allocate_routes;
pub use engine::LiquidityEngine;
pub use rpc::RpcChainAccessor;
pub use types::{
    AccountSnapshot, AccountState, AllocationWeights, LiquidityObservation, LiquidityRoute,
    RouteAllocation, RouteMetrics,
};
