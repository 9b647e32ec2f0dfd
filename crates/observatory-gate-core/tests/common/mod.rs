// crates/observatory-gate-core/tests/common/mod.rs
// ============================================================================
// Module: Core Test Helpers
// Description: Shared fixtures and scanner doubles for core tests.
// Purpose: Keep scanner output fixtures consistent across test files.
// Dependencies: observatory-gate-core, serde_json
// ============================================================================

//! Scanner fixtures and a recording scanner double.

#![allow(
    dead_code,
    clippy::unwrap_used,
    reason = "Each test binary uses a different subset of the helpers."
)]

use std::cell::Cell;
use std::cell::RefCell;

use observatory_gate_core::ScanExecutionError;
use observatory_gate_core::Scanner;
use serde_json::json;

/// Scanner output with a perfect score and two passing checks.
pub fn perfect_scan() -> Vec<u8> {
    serde_json::to_vec(&json!({
        "scan": {
            "grade": "A+",
            "score": 100,
            "testsPassed": 10,
            "testsQuantity": 10
        },
        "tests": {
            "content-security-policy": { "pass": true, "scoreModifier": 5 },
            "strict-transport-security": { "pass": true, "scoreModifier": 10 }
        }
    }))
    .unwrap()
}

/// Scanner output with a low score.
pub fn low_scan() -> Vec<u8> {
    br#"{
        "scan": { "grade": "D", "score": 25, "testsPassed": 6, "testsFailed": 4, "testsQuantity": 10 },
        "tests": {
            "x-frame-options": { "pass": false, "scoreModifier": -20, "result": "x-frame-options-not-implemented" },
            "cookies": { "pass": true, "scoreModifier": 0 }
        }
    }"#
    .to_vec()
}

/// Scanner double returning a fixed result and recording the hosts it saw.
pub struct FixedScanner {
    /// Result returned for every scan.
    result: Result<Vec<u8>, ScanExecutionError>,
    /// Last host passed to `scan`.
    pub last_host: RefCell<Option<String>>,
    /// Number of scans performed.
    pub calls: Cell<usize>,
}

impl FixedScanner {
    /// Scanner that prints `stdout`.
    pub fn ok(stdout: Vec<u8>) -> Self {
        Self {
            result: Ok(stdout),
            last_host: RefCell::new(None),
            calls: Cell::new(0),
        }
    }

    /// Scanner that fails with `error`.
    pub fn err(error: ScanExecutionError) -> Self {
        Self {
            result: Err(error),
            last_host: RefCell::new(None),
            calls: Cell::new(0),
        }
    }
}

impl Scanner for FixedScanner {
    fn scan(&self, host: &str) -> Result<Vec<u8>, ScanExecutionError> {
        self.calls.set(self.calls.get() + 1);
        *self.last_host.borrow_mut() = Some(host.to_string());
        self.result.clone()
    }
}
