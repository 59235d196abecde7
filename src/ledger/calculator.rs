//! Yield calculator.
//!
//! Computes net yield from execution fees (lamports paid) and protocol
//! revenue (lamports received) as exact signed sums over explicit evidence.
//! Rate metrics (APR/APY) are out of scope.

use crate::error::{ErrorCode, Result, ThreeiumError};
use crate::ledger::report::{
    lamports_decimal, EvidenceKind, EvidenceReference, SlotWindow, YieldReport, YieldTotals,
};
use crate::types::{Lamports, Slot};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// A signed lamport movement backed by a transaction signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YieldEvent {
    /// Slot of the referenced transaction
    pub slot: Slot,
    /// Verifiable transaction signature
    pub signature: String,
    /// Signed lamport amount, a decimal string on the wire
    #[serde(with = "lamports_decimal")]
    pub lamports: Lamports,
    /// Human-readable description of the source
    pub description: String,
}

/// Lamports paid in execution fees.
pub type ExecutionFeeEvent = YieldEvent;
/// Lamports received as protocol revenue.
pub type ProtocolRevenueEvent = YieldEvent;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YieldInputs {
    /// Slot window covered by the report
    pub window: SlotWindow,
    /// Execution fee evidence
    pub execution_fees: Vec<ExecutionFeeEvent>,
    /// Protocol revenue evidence
    pub protocol_revenue: Vec<ProtocolRevenueEvent>,
    /// Report generation timestamp (unix ms)
    pub generated_at_unix_ms: i64,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct YieldCalculator;

impl YieldCalculator {
    pub fn new() -> Self {
        Self
    }

    /// Computes a [`YieldReport`] from explicit inputs.
    #[instrument(skip(self, inputs), fields(
        start_slot = inputs.window.start_slot,
        end_slot = inputs.window.end_slot,
        fees = inputs.execution_fees.len(),
        revenue = inputs.protocol_revenue.len()
    ))]
    pub fn compute(&self, inputs: &YieldInputs) -> Result<YieldReport> {
        if inputs.window.end_slot < inputs.window.start_slot {
            return Err(
                ThreeiumError::invalid_input(ErrorCode::SlotInvalid, "endSlot must be >= startSlot")
                    .with_detail("startSlot", inputs.window.start_slot)
                    .with_detail("endSlot", inputs.window.end_slot),
            );
        }

        let execution_fees_lamports =
            sum_stream(&inputs.execution_fees, EvidenceKind::ExecutionFee)?;
        let protocol_revenue_lamports =
            sum_stream(&inputs.protocol_revenue, EvidenceKind::ProtocolRevenue)?;

        let net_lamports = protocol_revenue_lamports
            .checked_sub(execution_fees_lamports)
            .ok_or_else(|| {
                ThreeiumError::infeasible(ErrorCode::AmountOverflow, "net lamports overflow")
                    .with_detail("executionFeesLamports", execution_fees_lamports.to_string())
                    .with_detail("protocolRevenueLamports", protocol_revenue_lamports.to_string())
            })?;

        let references = inputs
            .execution_fees
            .iter()
            .map(|e| reference(EvidenceKind::ExecutionFee, e))
            .chain(
                inputs
                    .protocol_revenue
                    .iter()
                    .map(|e| reference(EvidenceKind::ProtocolRevenue, e)),
            )
            .collect();

        info!(
            "Yield over slots {}..={}: fees={} revenue={} net={}",
            inputs.window.start_slot,
            inputs.window.end_slot,
            execution_fees_lamports,
            protocol_revenue_lamports,
            net_lamports
        );

        Ok(YieldReport {
            generated_at_unix_ms: inputs.generated_at_unix_ms,
            window: inputs.window,
            totals: YieldTotals {
                execution_fees_lamports,
                protocol_revenue_lamports,
                net_lamports,
            },
            references,
        })
    }
}

fn stream_name(kind: EvidenceKind) -> &'static str {
    match kind {
        EvidenceKind::ExecutionFee => "execution fee",
        EvidenceKind::ProtocolRevenue => "protocol revenue",
    }
}

fn validate_event(event: &YieldEvent, kind: EvidenceKind, index: usize) -> Result<()> {
    let field = if event.signature.is_empty() {
        "signature"
    } else if event.description.is_empty() {
        "description"
    } else {
        return Ok(());
    };

    Err(ThreeiumError::invalid_input(
        ErrorCode::EventInvalid,
        format!("{} {} required", stream_name(kind), field),
    )
    .with_detail("stream", stream_name(kind))
    .with_detail("index", index)
    .with_detail("field", field))
}

/// Validates and sums one event stream with exact checked arithmetic.
fn sum_stream(events: &[YieldEvent], kind: EvidenceKind) -> Result<Lamports> {
    let mut total: Lamports = 0;
    for (index, event) in events.iter().enumerate() {
        validate_event(event, kind, index)?;
        total = total.checked_add(event.lamports).ok_or_else(|| {
            ThreeiumError::infeasible(
                ErrorCode::AmountOverflow,
                format!("{} total overflows", stream_name(kind)),
            )
            .with_detail("stream", stream_name(kind))
            .with_detail("index", index)
        })?;
    }
    debug!("Summed {} {} events: {}", events.len(), stream_name(kind), total);
    Ok(total)
}

fn reference(kind: EvidenceKind, event: &YieldEvent) -> EvidenceReference {
    EvidenceReference {
        kind,
        slot: event.slot,
        signature: event.signature.clone(),
        lamports: event.lamports,
        description: event.description.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(slot: Slot, signature: &str, lamports: Lamports) -> YieldEvent {
        YieldEvent {
            slot,
            signature: signature.to_string(),
            lamports,
            description: "transaction fee".to_string(),
        }
    }

    fn inputs(fees: Vec<YieldEvent>, revenue: Vec<YieldEvent>) -> YieldInputs {
        YieldInputs {
            window: SlotWindow { start_slot: 10, end_slot: 20 },
            execution_fees: fees,
            protocol_revenue: revenue,
            generated_at_unix_ms: 1_700_000_000_000,
        }
    }

    #[test]
    fn test_net_is_revenue_minus_fees() {
        let report = YieldCalculator::new()
            .compute(&inputs(
                vec![event(11, "f1", 200), event(12, "f2", 300)],
                vec![event(13, "r1", 300)],
            ))
            .unwrap();

        assert_eq!(report.totals.execution_fees_lamports, 500);
        assert_eq!(report.totals.protocol_revenue_lamports, 300);
        assert_eq!(report.totals.net_lamports, -200);
    }

    #[test]
    fn test_empty_streams_are_zero() {
        let report = YieldCalculator::new().compute(&inputs(vec![], vec![])).unwrap();
        assert_eq!(
            report.totals,
            YieldTotals {
                execution_fees_lamports: 0,
                protocol_revenue_lamports: 0,
                net_lamports: 0,
            }
        );
        assert!(report.references.is_empty());
    }

    #[test]
    fn test_references_fee_first_in_input_order() {
        let report = YieldCalculator::new()
            .compute(&inputs(
                vec![event(15, "f-b", 1), event(11, "f-a", 1)],
                vec![event(12, "r-a", 1)],
            ))
            .unwrap();

        let sigs: Vec<_> = report.references.iter().map(|r| r.signature.as_str()).collect();
        assert_eq!(sigs, vec!["f-b", "f-a", "r-a"]);
        assert_eq!(report.references[2].kind, EvidenceKind::ProtocolRevenue);
    }

    #[test]
    fn test_large_amounts_are_exact() {
        let big = i64::MAX as Lamports;
        let report = YieldCalculator::new()
            .compute(&inputs(
                vec![event(10, "f", big), event(10, "g", big)],
                vec![event(10, "r", 1)],
            ))
            .unwrap();
        assert_eq!(report.totals.execution_fees_lamports, 2 * big);
        assert_eq!(report.totals.net_lamports, 1 - 2 * big);
    }

    #[test]
    fn test_negative_amounts_allowed() {
        let report = YieldCalculator::new()
            .compute(&inputs(vec![event(10, "refund", -50)], vec![]))
            .unwrap();
        assert_eq!(report.totals.net_lamports, 50);
    }

    #[test]
    fn test_rejects_inverted_window() {
        let mut bad = inputs(vec![], vec![]);
        bad.window = SlotWindow { start_slot: 20, end_slot: 10 };
        let err = YieldCalculator::new().compute(&bad).unwrap_err();
        assert_eq!(err.code(), ErrorCode::SlotInvalid);
    }

    #[test]
    fn test_single_slot_window_ok() {
        let mut one = inputs(vec![], vec![]);
        one.window = SlotWindow { start_slot: 7, end_slot: 7 };
        assert!(YieldCalculator::new().compute(&one).is_ok());
    }

    #[test]
    fn test_rejects_empty_signature_and_description() {
        let err = YieldCalculator::new()
            .compute(&inputs(vec![event(10, "", 1)], vec![]))
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::EventInvalid);
        assert_eq!(err.details()["field"], "signature");

        let mut no_description = event(10, "sig", 1);
        no_description.description.clear();
        let err = YieldCalculator::new()
            .compute(&inputs(vec![], vec![event(10, "ok", 1), no_description]))
            .unwrap_err();
        assert_eq!(err.details()["stream"], "protocol revenue");
        assert_eq!(err.details()["index"], 1);
    }

    #[test]
    fn test_overflow_is_an_error() {
        let err = YieldCalculator::new()
            .compute(&inputs(vec![event(10, "a", Lamports::MAX), event(10, "b", 1)], vec![]))
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::AmountOverflow);
    }

    #[test]
    fn test_generated_at_and_serialization() {
        let report = YieldCalculator::new().compute(&inputs(vec![], vec![])).unwrap();
        assert_eq!(report.generated_at().unwrap().timestamp_millis(), 1_700_000_000_000);

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["window"]["startSlot"], 10);
        assert_eq!(json["totals"]["netLamports"], "0");
    }

    #[test]
    fn test_totals_beyond_u64_serialize_as_strings() {
        let report = YieldCalculator::new()
            .compute(&inputs(
                vec![event(11, "a", u64::MAX as Lamports), event(12, "b", u64::MAX as Lamports)],
                vec![],
            ))
            .unwrap();

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["totals"]["executionFeesLamports"], "36893488147419103230");
        assert_eq!(json["totals"]["netLamports"], "-36893488147419103230");
        assert_eq!(json["references"][0]["lamports"], "18446744073709551615");
    }

    #[test]
    fn test_event_amount_parsed_from_string() {
        let event: YieldEvent = serde_json::from_value(serde_json::json!({
            "slot": 7,
            "signature": "sig",
            "lamports": "-170141183460469231731687303715884105728",
            "description": "fee"
        }))
        .unwrap();
        assert_eq!(event.lamports, Lamports::MIN);

        let bad = serde_json::from_value::<YieldEvent>(serde_json::json!({
            "slot": 7,
            "signature": "sig",
            "lamports": "12x",
            "description": "fee"
        }));
        assert!(bad.is_err());
    }
}
