//! Ledger module - net yield aggregation over fee and revenue evidence.

pub mod calculator;
pub mod report;

pub use calculator::{
    ExecutionFeeEvent, ProtocolRevenueEvent, YieldCalculator, YieldEvent, YieldInputs,
};
pub use report::{EvidenceKind, EvidenceReference, SlotWindow, YieldReport, YieldTotals};
