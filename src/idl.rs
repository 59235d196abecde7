//! Runtime IDL loader (Anchor-compatible).
//!
//! No IDLs are embedded in the SDK. Loaded documents get a structural check
//! only: an object with non-empty `version` and `name` and an
//! `instructions` array.

use crate::error::{require_non_empty, ErrorCode, Result, ThreeiumError};
use reqwest::Url;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::Path;
use tracing::{debug, instrument};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnchorIdl {
    pub version: String,
    pub name: String,
    pub instructions: Vec<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accounts: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub types: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub events: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Map<String, Value>>,
}

fn invalid(message: &str) -> ThreeiumError {
    ThreeiumError::invalid_input(ErrorCode::IdlInvalid, message)
}

fn is_non_empty_str(value: Option<&Value>) -> bool {
    matches!(value, Some(Value::String(s)) if !s.is_empty())
}

/// Structural validation, then typed conversion.
pub fn validate_anchor_idl(idl: Value) -> Result<AnchorIdl> {
    let object = idl
        .as_object()
        .ok_or_else(|| invalid("IDL must be a plain object"))?;

    if !is_non_empty_str(object.get("version")) {
        return Err(invalid("IDL.version must be a non-empty string"));
    }
    if !is_non_empty_str(object.get("name")) {
        return Err(invalid("IDL.name must be a non-empty string"));
    }
    if !matches!(object.get("instructions"), Some(Value::Array(_))) {
        return Err(invalid("IDL.instructions must be an array"));
    }

    serde_json::from_value(idl).map_err(|e| {
        invalid("IDL has malformed optional sections").with_detail("reason", e.to_string())
    })
}

/// Loads an IDL from a JSON file.
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub async fn load_idl_from_file(path: impl AsRef<Path>) -> Result<AnchorIdl> {
    let path = path.as_ref();
    let display = path.display().to_string();
    require_non_empty(&display, ErrorCode::IdlPathRequired, "IDL path is required")?;

    let raw = tokio::fs::read_to_string(path).await.map_err(|e| {
        ThreeiumError::collaborator(ErrorCode::IdlReadFailed, "Failed to read IDL from file", e)
            .with_detail("path", display.as_str())
    })?;

    let parsed: Value = serde_json::from_str(&raw).map_err(|e| {
        ThreeiumError::invalid_input(ErrorCode::IdlParseFailed, "Failed to parse IDL JSON")
            .with_detail("path", display.as_str())
            .with_detail("reason", e.to_string())
    })?;

    let idl = validate_anchor_idl(parsed)?;
    debug!("Loaded IDL {} v{} from file", idl.name, idl.version);
    Ok(idl)
}

/// Loads an IDL from an http(s) URL.
#[instrument(skip_all, fields(url = %url))]
pub async fn load_idl_from_url(url: &str) -> Result<AnchorIdl> {
    require_non_empty(url, ErrorCode::IdlUrlRequired, "IDL URL is required")?;

    let parsed_url = Url::parse(url).map_err(|e| {
        ThreeiumError::invalid_input(ErrorCode::IdlUrlInvalid, "IDL URL must be a valid URL")
            .with_detail("url", url)
            .with_detail("reason", e.to_string())
    })?;
    if parsed_url.scheme() != "http" && parsed_url.scheme() != "https" {
        return Err(
            ThreeiumError::invalid_input(ErrorCode::IdlUrlInvalid, "IDL URL must use http or https")
                .with_detail("url", url),
        );
    }

    let response = reqwest::get(parsed_url).await.map_err(|e| {
        ThreeiumError::collaborator(ErrorCode::IdlFetchFailed, "Failed to fetch IDL", e)
            .with_detail("url", url)
    })?;

    if !response.status().is_success() {
        let status = response.status();
        return Err(ThreeiumError::collaborator(
            ErrorCode::IdlFetchFailed,
            "IDL fetch returned non-OK status",
            anyhow::anyhow!("HTTP status {}", status),
        )
        .with_detail("url", url)
        .with_detail("status", status.as_u16()));
    }

    let json: Value = response.json().await.map_err(|e| {
        ThreeiumError::invalid_input(ErrorCode::IdlParseFailed, "Failed to parse IDL JSON from URL")
            .with_detail("url", url)
            .with_detail("reason", e.to_string())
    })?;

    let idl = validate_anchor_idl(json)?;
    debug!("Loaded IDL {} v{} from URL", idl.name, idl.version);
    Ok(idl)
}
