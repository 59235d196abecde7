//! Error taxonomy for the SDK.
//!
//! Every failure carries a stable, machine-matchable [`ErrorCode`], a
//! human-readable message and structured details. Errors are grouped into
//! the four categories the SDK distinguishes: input shape, referential
//! integrity, domain infeasibility and collaborator failures.

use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use thiserror::Error;

/// Structured error details, keyed by field name.
pub type Details = BTreeMap<String, Value>;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, ThreeiumError>;

/// Stable error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ErrorCode {
    // Configuration and client
    RpcUrlRequired,
    RpcUrlInvalid,
    ConfigParseFailed,
    ProgramNameRequired,
    ProgramNameDuplicate,
    ProgramNotFound,
    SignerRequired,
    // Execution
    BlockhashRequired,
    BlockhashInvalid,
    ComposeFailed,
    // Liquidity
    RouteIdRequired,
    RouteIdDuplicate,
    RouteMetricInvalid,
    WeightsInvalid,
    AllocationImpossible,
    AccountInfoMissing,
    AccountBatchMismatch,
    ChainAccessFailed,
    // Ledger
    SlotInvalid,
    EventInvalid,
    AmountOverflow,
    // IDL
    IdlPathRequired,
    IdlReadFailed,
    IdlUrlRequired,
    IdlUrlInvalid,
    IdlFetchFailed,
    IdlParseFailed,
    IdlInvalid,
}

impl ErrorCode {
    /// Returns the stable string form of the code.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::RpcUrlRequired => "E_RPC_URL_REQUIRED",
            ErrorCode::RpcUrlInvalid => "E_RPC_URL_INVALID",
            ErrorCode::ConfigParseFailed => "E_CONFIG_PARSE_FAILED",
            ErrorCode::ProgramNameRequired => "E_PROGRAM_NAME_REQUIRED",
            ErrorCode::ProgramNameDuplicate => "E_PROGRAM_NAME_DUPLICATE",
            ErrorCode::ProgramNotFound => "E_PROGRAM_NOT_FOUND",
            ErrorCode::SignerRequired => "E_SIGNER_REQUIRED",
            ErrorCode::BlockhashRequired => "E_BLOCKHASH_REQUIRED",
            ErrorCode::BlockhashInvalid => "E_BLOCKHASH_INVALID",
            ErrorCode::ComposeFailed => "E_COMPOSE_FAILED",
            ErrorCode::RouteIdRequired => "E_ROUTE_ID_REQUIRED",
            ErrorCode::RouteIdDuplicate => "E_ROUTE_ID_DUPLICATE",
            ErrorCode::RouteMetricInvalid => "E_ROUTE_METRIC_INVALID",
            ErrorCode::WeightsInvalid => "E_WEIGHTS_INVALID",
            ErrorCode::AllocationImpossible => "E_ALLOCATION_IMPOSSIBLE",
            ErrorCode::AccountInfoMissing => "E_ACCOUNT_INFO_MISSING",
            ErrorCode::AccountBatchMismatch => "E_ACCOUNT_BATCH_MISMATCH",
            ErrorCode::ChainAccessFailed => "E_CHAIN_ACCESS_FAILED",
            ErrorCode::SlotInvalid => "E_SLOT_INVALID",
            ErrorCode::EventInvalid => "E_EVENT_INVALID",
            ErrorCode::AmountOverflow => "E_AMOUNT_OVERFLOW",
            ErrorCode::IdlPathRequired => "E_IDL_PATH_REQUIRED",
            ErrorCode::IdlReadFailed => "E_IDL_READ_FAILED",
            ErrorCode::IdlUrlRequired => "E_IDL_URL_REQUIRED",
            ErrorCode::IdlUrlInvalid => "E_IDL_URL_INVALID",
            ErrorCode::IdlFetchFailed => "E_IDL_FETCH_FAILED",
            ErrorCode::IdlParseFailed => "E_IDL_PARSE_FAILED",
            ErrorCode::IdlInvalid => "E_IDL_INVALID",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Missing/empty field, non-finite number, malformed value.
    InvalidInput,
    /// Duplicate identifiers, missing referenced data.
    Integrity,
    /// The inputs are well-formed but the computation is undefined.
    Infeasible,
    /// A collaborator (RPC, filesystem, HTTP) failed.
    Collaborator,
}

/// SDK error type.
#[derive(Debug, Error)]
pub enum ThreeiumError {
    #[error("[{code}] {message}")]
    InvalidInput {
        code: ErrorCode,
        message: String,
        details: Details,
    },

    #[error("[{code}] {message}")]
    Integrity {
        code: ErrorCode,
        message: String,
        details: Details,
    },

    #[error("[{code}] {message}")]
    Infeasible {
        code: ErrorCode,
        message: String,
        details: Details,
    },

    #[error("[{code}] {message}: {source}")]
    Collaborator {
        code: ErrorCode,
        message: String,
        details: Details,
        #[source]
        source: anyhow::Error,
    },
}

/// Serializable view of an error, for logs and API responses.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorReport {
    pub name: &'static str,
    pub code: &'static str,
    pub category: ErrorCategory,
    pub message: String,
    pub details: Details,
}

impl ThreeiumError {
    pub fn invalid_input(code: ErrorCode, message: impl Into<String>) -> Self {
        ThreeiumError::InvalidInput {
            code,
            message: message.into(),
            details: Details::new(),
        }
    }

    pub fn integrity(code: ErrorCode, message: impl Into<String>) -> Self {
        ThreeiumError::Integrity {
            code,
            message: message.into(),
            details: Details::new(),
        }
    }

    pub fn infeasible(code: ErrorCode, message: impl Into<String>) -> Self {
        ThreeiumError::Infeasible {
            code,
            message: message.into(),
            details: Details::new(),
        }
    }

    pub fn collaborator(
        code: ErrorCode,
        message: impl Into<String>,
        source: impl Into<anyhow::Error>,
    ) -> Self {
        ThreeiumError::Collaborator {
            code,
            message: message.into(),
            details: Details::new(),
            source: source.into(),
        }
    }

    /// Attach a structured detail to the error.
    pub fn with_detail(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.details_mut().insert(key.to_string(), value.into());
        self
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            ThreeiumError::InvalidInput { code, .. }
            | ThreeiumError::Integrity { code, .. }
            | ThreeiumError::Infeasible { code, .. }
            | ThreeiumError::Collaborator { code, .. } => *code,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            ThreeiumError::InvalidInput { .. } => ErrorCategory::InvalidInput,
            ThreeiumError::Integrity { .. } => ErrorCategory::Integrity,
            ThreeiumError::Infeasible { .. } => ErrorCategory::Infeasible,
            ThreeiumError::Collaborator { .. } => ErrorCategory::Collaborator,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ThreeiumError::InvalidInput { message, .. }
            | ThreeiumError::Integrity { message, .. }
            | ThreeiumError::Infeasible { message, .. }
            | ThreeiumError::Collaborator { message, .. } => message,
        }
    }

    pub fn details(&self) -> &Details {
        match self {
            ThreeiumError::InvalidInput { details, .. }
            | ThreeiumError::Integrity { details, .. }
            | ThreeiumError::Infeasible { details, .. }
            | ThreeiumError::Collaborator { details, .. } => details,
        }
    }

    fn details_mut(&mut self) -> &mut Details {
        match self {
            ThreeiumError::InvalidInput { details, .. }
            | ThreeiumError::Integrity { details, .. }
            | ThreeiumError::Infeasible { details, .. }
            | ThreeiumError::Collaborator { details, .. } => details,
        }
    }

    /// Build the serializable report for this error.
    pub fn to_report(&self) -> ErrorReport {
        ErrorReport {
            name: "ThreeiumError",
            code: self.code().as_str(),
            category: self.category(),
            message: self.message().to_string(),
            details: self.details().clone(),
        }
    }
}

/// Fail with an input-shape error unless `condition` holds.
pub fn require(condition: bool, code: ErrorCode, message: &str) -> Result<()> {
    if condition {
        Ok(())
    } else {
        Err(ThreeiumError::invalid_input(code, message))
    }
}

/// Fail unless `value` is a non-empty string.
pub fn require_non_empty(value: &str, code: ErrorCode, message: &str) -> Result<()> {
    require(!value.is_empty(), code, message)
}

/// Fail unless `value` is a finite number. The offending value is recorded.
pub fn require_finite(value: f64, code: ErrorCode, field: &str) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ThreeiumError::invalid_input(
            code,
            format!("{} must be a finite number", field),
        )
        .with_detail("field", field)
        .with_detail("value", value.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_strings_are_stable() {
        assert_eq!(ErrorCode::RouteIdRequired.as_str(), "E_ROUTE_ID_REQUIRED");
        assert_eq!(ErrorCode::AllocationImpossible.to_string(), "E_ALLOCATION_IMPOSSIBLE");
    }

    #[test]
    fn test_with_detail_and_report() {
        let err = ThreeiumError::integrity(ErrorCode::RouteIdDuplicate, "duplicate routeId")
            .with_detail("routeId", "route-a");

        assert_eq!(err.code(), ErrorCode::RouteIdDuplicate);
        assert_eq!(err.category(), ErrorCategory::Integrity);
        assert_eq!(err.to_string(), "[E_ROUTE_ID_DUPLICATE] duplicate routeId");

        let report = err.to_report();
        assert_eq!(report.code, "E_ROUTE_ID_DUPLICATE");
        assert_eq!(report.details.get("routeId"), Some(&Value::from("route-a")));

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["category"], "integrity");
    }

    #[test]
    fn test_require_finite_records_value() {
        let err = require_finite(f64::NAN, ErrorCode::WeightsInvalid, "weights.feeEfficiency")
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::WeightsInvalid);
        assert_eq!(err.details()["field"], "weights.feeEfficiency");
        assert!(require_finite(1.5, ErrorCode::WeightsInvalid, "x").is_ok());
    }

    #[test]
    fn test_collaborator_keeps_source() {
        let err = ThreeiumError::collaborator(
            ErrorCode::ChainAccessFailed,
            "getSlot failed",
            anyhow::anyhow!("connection refused"),
        );
        assert_eq!(err.category(), ErrorCategory::Collaborator);
        assert!(std::error::Error::source(&err).is_some());
        assert!(err.to_string().contains("connection refused"));
    }
}
