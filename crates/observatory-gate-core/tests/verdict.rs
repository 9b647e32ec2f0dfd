// crates/observatory-gate-core/tests/verdict.rs
// ============================================================================
// Module: Verdict Tests
// Description: Score versus threshold comparisons.
// Purpose: Ensure the gate fails exactly when the score is below threshold.
// Dependencies: observatory-gate-core
// ============================================================================

//! Verdict evaluation behavior.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use observatory_gate_core::ScanResult;
use observatory_gate_core::Verdict;
use observatory_gate_core::decode;
use observatory_gate_core::evaluate;

fn scored(score: i64) -> ScanResult {
    decode(format!(r#"{{"scan":{{"score":{score}}}}}"#).as_bytes()).unwrap()
}

#[test]
fn verdict_table() {
    assert_eq!(evaluate(&scored(100), 100), Verdict::Pass);
    assert_eq!(evaluate(&scored(99), 100), Verdict::Fail {
        score: 99,
        threshold: 100,
    });
    assert_eq!(evaluate(&scored(25), 20), Verdict::Pass);
    assert_eq!(evaluate(&scored(25), 50), Verdict::Fail {
        score: 25,
        threshold: 50,
    });
}

#[test]
fn negative_thresholds_pass_negative_scores() {
    assert!(evaluate(&scored(-10), -10).is_pass());
    assert!(!evaluate(&scored(-11), -10).is_pass());
}

#[test]
fn failure_message_names_threshold() {
    let verdict = evaluate(&scored(25), 100);
    assert_eq!(verdict.failure_message().as_deref(), Some("Scan failed: Score is lower than 100"));
    assert_eq!(Verdict::Pass.failure_message(), None);
}
