//! Route allocator - pure, deterministic weight allocation across routes.
//!
//! Each route is scored with an explicit linear model:
//!
//! ```text
//! cost  = 1 / (1 + max(0, execution_cost))
//! fee   = max(0, fee_efficiency)
//! depth = max(0, liquidity_depth)
//! score = (w_cost * cost + w_fee * fee + w_depth * depth) / (w_cost + w_fee + w_depth)
//! ```
//!
//! Weights are each route's share of the total score. Routes are returned by
//! descending score, ties broken by ascending route id.

use crate::error::{require_finite, require_non_empty, ErrorCode, Result, ThreeiumError};
use crate::liquidity::types::{AllocationWeights, RouteAllocation, RouteMetrics};
use std::cmp::Ordering;
use std::collections::HashSet;
use tracing::{debug, instrument};

#[derive(Debug, Clone)]
struct ScoredRoute<'a> {
    route_id: &'a str,
    score: f64,
}

/// Validates the weights (each finite and non-negative, at least one
/// positive) and returns coefficients scaled to add up to 1.
///
/// Scaling by the largest weight first keeps the sum finite for any finite
/// input, so `(1e308, 1e308, 0)` behaves exactly like `(1, 1, 0)`.
fn validate_weights(weights: &AllocationWeights) -> Result<[f64; 3]> {
    let fields = [
        ("weights.executionCost", weights.execution_cost),
        ("weights.feeEfficiency", weights.fee_efficiency),
        ("weights.liquidityDepth", weights.liquidity_depth),
    ];

    for (field, value) in fields {
        require_finite(value, ErrorCode::WeightsInvalid, field)?;
        if value < 0.0 {
            return Err(ThreeiumError::invalid_input(
                ErrorCode::WeightsInvalid,
                format!("{} must be non-negative", field),
            )
            .with_detail("field", field)
            .with_detail("value", value));
        }
    }

    let largest = fields.iter().map(|(_, w)| *w).fold(0.0, f64::max);
    if !(largest > 0.0) {
        return Err(
            ThreeiumError::infeasible(ErrorCode::WeightsInvalid, "weights must sum to > 0")
                .with_detail("sum", weights.sum()),
        );
    }

    let scaled = fields.map(|(_, w)| w / largest);
    let scaled_sum: f64 = scaled.iter().sum();
    Ok(scaled.map(|w| w / scaled_sum))
}

fn validate_metrics(route: &RouteMetrics) -> Result<()> {
    require_non_empty(&route.route_id, ErrorCode::RouteIdRequired, "routeId is required")?;
    for (field, value) in [
        ("executionCostMicroLamports", route.execution_cost_micro_lamports),
        ("feeEfficiencyBps", route.fee_efficiency_bps),
        ("liquidityDepthScore", route.liquidity_depth_score),
    ] {
        require_finite(value, ErrorCode::RouteMetricInvalid, field)
            .map_err(|e| e.with_detail("routeId", route.route_id.as_str()))?;
    }
    Ok(())
}

/// Model terms of one route: (cost, fee, depth).
fn model_terms(route: &RouteMetrics) -> [f64; 3] {
    [
        1.0 / (1.0 + route.execution_cost_micro_lamports.max(0.0)),
        route.fee_efficiency_bps.max(0.0),
        route.liquidity_depth_score.max(0.0),
    ]
}

/// Largest term across all routes among the components with a non-zero
/// coefficient.
fn term_magnitude(terms: &[[f64; 3]], coefficients: &[f64; 3]) -> f64 {
    terms
        .iter()
        .flat_map(|t| t.iter().zip(coefficients).filter(|(_, c)| **c > 0.0).map(|(t, _)| *t))
        .fold(0.0, f64::max)
}

/// Linear score of one route, divided by `magnitude`.
///
/// Every scaled term is at most 1 and the coefficients add up to 1, so the
/// result stays within [0, 1]. Dividing all scores by the same magnitude
/// leaves their ratios unchanged.
fn score_route(terms: &[f64; 3], coefficients: &[f64; 3], magnitude: f64) -> f64 {
    terms
        .iter()
        .zip(coefficients)
        .map(|(t, c)| c * (t / magnitude))
        .sum()
}

/// Descending score, then ascending route id.
fn rank(a: &ScoredRoute<'_>, b: &ScoredRoute<'_>) -> Ordering {
    b.score
        .partial_cmp(&a.score)
        .unwrap_or(Ordering::Equal)
        .then_with(|| a.route_id.cmp(b.route_id))
}

/// Allocates normalized weights across routes.
///
/// Fails on non-finite inputs, negative weight coefficients, a zero weight
/// sum, duplicate route ids, or when every route scores zero (including an
/// empty route list).
#[instrument(skip(routes, weights), fields(routes = routes.len()))]
pub fn allocate_routes(
    routes: &[RouteMetrics],
    weights: &AllocationWeights,
) -> Result<Vec<RouteAllocation>> {
    let coefficients = validate_weights(weights)?;

    let mut seen = HashSet::with_capacity(routes.len());
    for route in routes {
        validate_metrics(route)?;
        if !seen.insert(route.route_id.as_str()) {
            return Err(
                ThreeiumError::integrity(ErrorCode::RouteIdDuplicate, "duplicate routeId")
                    .with_detail("routeId", route.route_id.as_str()),
            );
        }
    }

    let terms: Vec<[f64; 3]> = routes.iter().map(model_terms).collect();
    let magnitude = term_magnitude(&terms, &coefficients);
    if !(magnitude > 0.0) {
        return Err(
            ThreeiumError::infeasible(ErrorCode::AllocationImpossible, "total score must be > 0")
                .with_detail("totalScore", 0.0)
                .with_detail("routes", routes.len()),
        );
    }

    let mut scored = Vec::with_capacity(routes.len());
    for (route, terms) in routes.iter().zip(&terms) {
        let score = score_route(terms, &coefficients, magnitude);
        if !score.is_finite() {
            return Err(ThreeiumError::infeasible(
                ErrorCode::RouteMetricInvalid,
                "route score is not a finite number",
            )
            .with_detail("routeId", route.route_id.as_str())
            .with_detail("score", score.to_string()));
        }
        debug!("Route {} scored {:.6} (scale {:e})", route.route_id, score, magnitude);
        scored.push(ScoredRoute {
            route_id: &route.route_id,
            score,
        });
    }

    scored.sort_by(rank);

    let total_score: f64 = scored.iter().map(|r| r.score).sum();
    if !(total_score > 0.0) {
        return Err(
            ThreeiumError::infeasible(ErrorCode::AllocationImpossible, "total score must be > 0")
                .with_detail("totalScore", total_score)
                .with_detail("routes", scored.len()),
        );
    }

    Ok(scored
        .into_iter()
        .map(|r| RouteAllocation {
            route_id: r.route_id.to_string(),
            weight: r.score / total_score,
        })
        .collect())
}
