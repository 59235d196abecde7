//! Serializable yield report.
//!
//! Timestamped, with references to verifiable on-chain evidence.

use crate::types::{Lamports, Slot};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Lamport amounts as decimal strings.
///
/// Sums can exceed the 64-bit range that JSON numbers carry, so amounts are
/// written as strings and parsed back from strings.
pub mod lamports_decimal {
    use crate::types::Lamports;
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Lamports, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(value)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Lamports, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse()
            .map_err(|e| D::Error::custom(format!("invalid lamport amount {:?}: {}", raw, e)))
    }
}

/// Inclusive slot window covered by a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotWindow {
    pub start_slot: Slot,
    pub end_slot: Slot,
}

/// Signed totals. `net_lamports = protocol_revenue_lamports - execution_fees_lamports`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YieldTotals {
    #[serde(with = "lamports_decimal")]
    pub execution_fees_lamports: Lamports,
    #[serde(with = "lamports_decimal")]
    pub protocol_revenue_lamports: Lamports,
    #[serde(with = "lamports_decimal")]
    pub net_lamports: Lamports,
}

/// Which stream an evidence reference came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EvidenceKind {
    ExecutionFee,
    ProtocolRevenue,
}

/// Reference to one input event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EvidenceReference {
    pub kind: EvidenceKind,
    pub slot: Slot,
    pub signature: String,
    #[serde(with = "lamports_decimal")]
    pub lamports: Lamports,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YieldReport {
    pub generated_at_unix_ms: i64,
    pub window: SlotWindow,
    pub totals: YieldTotals,
    /// Fee references first, then revenue references, each in input order
    pub references: Vec<EvidenceReference>,
}

impl YieldReport {
    /// Generation time as a UTC datetime, if representable.
    pub fn generated_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.generated_at_unix_ms)
    }
}
