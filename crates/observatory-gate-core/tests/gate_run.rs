// crates/observatory-gate-core/tests/gate_run.rs
// ============================================================================
// Module: Gate Run Tests
// Description: End-to-end runs against the in-memory platform.
// Purpose: Ensure every terminal outcome publishes the right signals.
// Dependencies: observatory-gate-core
// ============================================================================

//! End-to-end gate scenarios with a scanner double.

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

mod common;

use observatory_gate_core::InMemoryPlatform;
use observatory_gate_core::RunOptions;
use observatory_gate_core::RunOutcome;
use observatory_gate_core::ScanExecutionError;
use observatory_gate_core::ScoreRange;
use observatory_gate_core::ThresholdPolicy;
use observatory_gate_core::run;
use observatory_gate_core::runtime::RESULTS_OUTPUT;

use crate::common::FixedScanner;
use crate::common::low_scan;
use crate::common::perfect_scan;

fn platform(host: &str) -> InMemoryPlatform {
    InMemoryPlatform::new().with_input("host", host)
}

#[test]
fn perfect_score_passes_with_default_threshold() {
    let platform = platform("https://example.com/");
    let scanner = FixedScanner::ok(perfect_scan());

    let outcome = run(&platform, &scanner, &RunOptions::default());

    assert_eq!(outcome, RunOutcome::Passed {
        score: 100,
        threshold: 100,
    });
    assert!(outcome.is_success());
    assert_eq!(scanner.last_host.borrow().as_deref(), Some("example.com"));
    let record = platform.record();
    let results = record.output(RESULTS_OUTPUT).unwrap();
    assert!(results.contains("Grade: A+"));
    assert!(results.contains("Score: 100"));
    assert_eq!(record.summaries.len(), 1);
    assert!(record.failures.is_empty());
}

#[test]
fn low_score_fails_below_default_threshold() {
    let platform = platform("example.com");
    let scanner = FixedScanner::ok(low_scan());

    let outcome = run(&platform, &scanner, &RunOptions::default());

    assert_eq!(outcome, RunOutcome::BelowThreshold {
        score: 25,
        threshold: 100,
    });
    assert!(!outcome.is_success());
    let record = platform.record();
    assert_eq!(record.failures, vec!["Scan failed: Score is lower than 100".to_string()]);
    // Report stays published even though the verdict failed.
    assert!(record.output(RESULTS_OUTPUT).unwrap().contains("Score: 25"));
}

#[test]
fn explicit_threshold_is_honored() {
    let platform = platform("example.com").with_input("passing-score", "20.9");
    let scanner = FixedScanner::ok(low_scan());

    let outcome = run(&platform, &scanner, &RunOptions::default());

    assert_eq!(outcome, RunOutcome::Passed {
        score: 25,
        threshold: 20,
    });
}

#[test]
fn scan_error_without_message_reports_unknown_error() {
    let platform = platform("example.com");
    let scanner = FixedScanner::err(ScanExecutionError::unknown());

    let outcome = run(&platform, &scanner, &RunOptions::default());

    let RunOutcome::Errored {
        message,
    } = outcome
    else {
        panic!("expected errored outcome");
    };
    assert!(message.ends_with("Unknown error"), "{message}");
    assert_eq!(platform.record().failures, vec![message]);
    assert!(platform.record().outputs.is_empty());
}

#[test]
fn scan_error_message_is_surfaced_verbatim() {
    let platform = platform("example.com");
    let scanner = FixedScanner::err(ScanExecutionError::new("Command failed: npx boom"));

    let outcome = run(&platform, &scanner, &RunOptions::default());

    assert_eq!(outcome, RunOutcome::Errored {
        message: "Scan failed: Command failed: npx boom".to_string(),
    });
}

#[test]
fn invalid_json_reports_parse_error() {
    let platform = platform("example.com");
    let scanner = FixedScanner::ok(b"<html>rate limited</html>".to_vec());

    let outcome = run(&platform, &scanner, &RunOptions::default());

    let RunOutcome::Errored {
        message,
    } = outcome
    else {
        panic!("expected errored outcome");
    };
    assert!(message.starts_with("Scan failed: malformed scanner response: "), "{message}");
    assert!(message.contains("expected value"), "{message}");
}

#[test]
fn missing_host_fails_before_scanning() {
    let platform = InMemoryPlatform::new();
    let scanner = FixedScanner::ok(perfect_scan());

    let outcome = run(&platform, &scanner, &RunOptions::default());

    assert_eq!(outcome, RunOutcome::Errored {
        message: "Scan failed: Input required and not supplied: host".to_string(),
    });
    assert_eq!(scanner.calls.get(), 0);
}

#[test]
fn invalid_host_fails_before_scanning() {
    let platform = platform("https://");
    let scanner = FixedScanner::ok(perfect_scan());

    let outcome = run(&platform, &scanner, &RunOptions::default());

    let RunOutcome::Errored {
        message,
    } = outcome
    else {
        panic!("expected errored outcome");
    };
    assert!(message.starts_with("Scan failed: invalid host: "), "{message}");
    assert_eq!(scanner.calls.get(), 0);
}

#[test]
fn clamped_threshold_emits_warning() {
    let platform = platform("example.com").with_input("passing-score", "500");
    let scanner = FixedScanner::ok(perfect_scan());
    let options = RunOptions {
        threshold: ThresholdPolicy {
            default: 100,
            clamp: Some(ScoreRange {
                min: 0,
                max: 145,
            }),
        },
        ..RunOptions::default()
    };

    let outcome = run(&platform, &scanner, &options);

    assert_eq!(outcome, RunOutcome::BelowThreshold {
        score: 100,
        threshold: 145,
    });
    assert_eq!(platform.record().warnings, vec![
        "passing score 500 is outside [0, 145]; using 145".to_string()
    ]);
}
