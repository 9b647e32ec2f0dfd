// crates/observatory-gate-core/src/core/decode.rs
// ============================================================================
// Module: Scanner Response Decoding
// Description: Parses captured scanner stdout into a ScanResult.
// Purpose: Fail fast on anything that is not the expected JSON document.
// Dependencies: serde_json, thiserror
// ============================================================================

//! ## Overview
//! Decoding runs in two passes over the same bytes. The first parses generic
//! JSON so the minimal contract (a `scan` object carrying an integer `score`)
//! can be checked with precise messages; the second decodes the typed
//! [`ScanResult`], which rejects malformed test entries instead of rendering a
//! half-populated report.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::Value;
use thiserror::Error;

use crate::core::model::ScanResult;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Raised when scanner output is not the expected JSON document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed scanner response: {reason}")]
pub struct MalformedResponseError {
    /// Parse or shape error description.
    pub reason: String,
}

impl MalformedResponseError {
    /// Builds an error with the given reason.
    fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

// ============================================================================
// SECTION: Decoding
// ============================================================================

/// Decodes captured scanner output.
///
/// # Errors
///
/// Returns [`MalformedResponseError`] when the bytes are not JSON, the `scan`
/// object or its integer `score` is missing, or a test entry is malformed.
pub fn decode(bytes: &[u8]) -> Result<ScanResult, MalformedResponseError> {
    let document: Value =
        serde_json::from_slice(bytes).map_err(|err| MalformedResponseError::new(err.to_string()))?;
    let Some(scan) = document.get("scan").and_then(Value::as_object) else {
        return Err(MalformedResponseError::new("missing `scan` object"));
    };
    if scan.get("score").and_then(Value::as_i64).is_none() {
        if let Some(error) = scan.get("error").and_then(Value::as_str) {
            return Err(MalformedResponseError::new(format!("scanner reported error: {error}")));
        }
        return Err(MalformedResponseError::new("`scan.score` must be an integer"));
    }
    // Typed pass reads the raw bytes; `Value` maps are sorted and would lose
    // the document order of `tests`.
    serde_json::from_slice(bytes).map_err(|err| MalformedResponseError::new(err.to_string()))
}
