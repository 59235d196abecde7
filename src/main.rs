//! Demo entry point for the Threeium SDK decision core.
//!
//! Runs plan assembly, route allocation and yield aggregation on sample
//! data. When `SOLANA_RPC_URL` and `THREEIUM_OBSERVED_ACCOUNTS` (comma-separated
//! pubkeys) are set, routes are first observed on-chain.

use anyhow::{Context, Result};
use std::str::FromStr;
use std::sync::Arc;
use threeium_sdk::config::{ClusterName, Commitment};
use threeium_sdk::ledger::{SlotWindow, YieldEvent};
use threeium_sdk::liquidity::{LiquidityObservation, LiquidityRoute};
use threeium_sdk::types::{AccountMeta, Instruction, Pubkey};
use threeium_sdk::{
    allocate_routes, AllocationWeights, ClusterConfig, ConnectionManager, ExecutionPlan,
    ExecutionRouter, LiquidityEngine, PriorityFeeInjection, RouteMetrics, YieldCalculator,
    YieldInputs,
};
use tracing::{info, warn, Level};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .init();

    info!("Starting Threeium SDK demo");

    demo_plan();

    let metrics = match observed_metrics().await? {
        Some(metrics) => metrics,
        None => sample_metrics(),
    };
    demo_allocation(&metrics)?;

    demo_yield()?;

    info!("Demo completed.");
    Ok(())
}

fn demo_plan() {
    let program_b = Pubkey::new_unique();
    let program_a = Pubkey::new_unique();
    let payer = Pubkey::new_unique();

    let plan = ExecutionPlan {
        instructions: vec![
            Instruction {
                program_id: program_b,
                accounts: vec![AccountMeta::new(payer, true)],
                data: vec![2],
            },
            Instruction {
                program_id: program_a,
                accounts: vec![AccountMeta::new_readonly(payer, false)],
                data: vec![1],
            },
        ],
        priority_fee: Some(PriorityFeeInjection::compute_unit_price(10_000)),
    };

    let ordered = ExecutionRouter::new().build_plan(plan);
    for (i, ix) in ordered.iter().enumerate() {
        info!("plan[{}] program={} data_len={}", i, ix.program_id, ix.data.len());
    }
}

/// Illustrative derivation: folds total lamports into the three metrics.
fn lamports_deriver(obs: &LiquidityObservation) -> RouteMetrics {
    let total: u64 = obs.accounts.iter().map(|a| a.lamports).sum();
    RouteMetrics {
        route_id: obs.route_id.clone(),
        execution_cost_micro_lamports: (total % 1_000_000) as f64,
        fee_efficiency_bps: ((total / 1_000) % 10_000) as f64,
        liquidity_depth_score: ((total / 1_000_000) % 1_000_000) as f64,
    }
}

async fn observed_metrics() -> Result<Option<Vec<RouteMetrics>>> {
    let (Ok(rpc_url), Ok(accounts)) = (
        std::env::var("SOLANA_RPC_URL"),
        std::env::var("THREEIUM_OBSERVED_ACCOUNTS"),
    ) else {
        info!("SOLANA_RPC_URL / THREEIUM_OBSERVED_ACCOUNTS not set, using sample metrics");
        return Ok(None);
    };

    let observed = accounts
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| Pubkey::from_str(s).with_context(|| format!("invalid pubkey: {}", s)))
        .collect::<Result<Vec<_>>>()?;

    if observed.len() < 2 {
        warn!("THREEIUM_OBSERVED_ACCOUNTS needs at least 2 pubkeys, using sample metrics");
        return Ok(None);
    }

    let manager = ConnectionManager::new(ClusterConfig {
        cluster: ClusterName::Custom,
        rpc_url,
        commitment: Commitment::Confirmed,
    })?;
    let engine = LiquidityEngine::new(
        Arc::new(manager.chain_accessor()),
        manager.config().commitment.to_commitment_config(),
    );

    let routes = vec![
        LiquidityRoute {
            route_id: "route-a".to_string(),
            observed_accounts: vec![observed[0]],
        },
        LiquidityRoute {
            route_id: "route-b".to_string(),
            observed_accounts: vec![observed[1]],
        },
    ];

    let metrics = engine.observe_and_derive(&routes, lamports_deriver).await?;
    Ok(Some(metrics))
}

fn sample_metrics() -> Vec<RouteMetrics> {
    vec![
        RouteMetrics {
            route_id: "route-a".to_string(),
            execution_cost_micro_lamports: 0.0,
            fee_efficiency_bps: 100.0,
            liquidity_depth_score: 0.0,
        },
        RouteMetrics {
            route_id: "route-b".to_string(),
            execution_cost_micro_lamports: 0.0,
            fee_efficiency_bps: 50.0,
            liquidity_depth_score: 0.0,
        },
    ]
}

fn demo_allocation(metrics: &[RouteMetrics]) -> Result<()> {
    let allocations = allocate_routes(metrics, &AllocationWeights::new(1.0, 1.0, 1.0))?;
    for allocation in &allocations {
        info!("route {} weight {:.6}", allocation.route_id, allocation.weight);
    }
    Ok(())
}

fn demo_yield() -> Result<()> {
    let report = YieldCalculator::new().compute(&YieldInputs {
        window: SlotWindow {
            start_slot: 10,
            end_slot: 20,
        },
        execution_fees: vec![YieldEvent {
            slot: 12,
            signature: "DemoFeeSignature".to_string(),
            lamports: 500,
            description: "transaction fee".to_string(),
        }],
        protocol_revenue: vec![YieldEvent {
            slot: 15,
            signature: "DemoRevenueSignature".to_string(),
            lamports: 300,
            description: "protocol revenue share".to_string(),
        }],
        generated_at_unix_ms: chrono::Utc::now().timestamp_millis(),
    })?;

    info!("Yield report: {}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
