// crates/observatory-gate-core/tests/threshold_resolution.rs
// ============================================================================
// Module: Passing Score Tests
// Description: Default, truncation, and clamp behavior of the threshold.
// Purpose: Ensure the passing-score input is read the same way everywhere.
// Dependencies: observatory-gate-core, proptest
// ============================================================================

//! Passing-score parsing and clamp policy behavior.

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

use observatory_gate_core::DEFAULT_PASSING_SCORE;
use observatory_gate_core::ResolvedThreshold;
use observatory_gate_core::ScoreRange;
use observatory_gate_core::ThresholdPolicy;
use observatory_gate_core::resolve_threshold;
use proptest::prelude::*;

#[test]
fn absent_empty_and_garbage_fall_back_to_default() {
    assert_eq!(resolve_threshold(None), 100);
    assert_eq!(resolve_threshold(Some("")), 100);
    assert_eq!(resolve_threshold(Some("not-a-number")), 100);
    assert_eq!(resolve_threshold(Some("   ")), DEFAULT_PASSING_SCORE);
}

#[test]
fn numeric_input_is_truncated() {
    assert_eq!(resolve_threshold(Some("85")), 85);
    assert_eq!(resolve_threshold(Some("85.7")), 85);
    assert_eq!(resolve_threshold(Some(" 70 ")), 70);
    assert_eq!(resolve_threshold(Some("-5")), -5);
}

#[test]
fn unclamped_policy_accepts_any_integer() {
    assert_eq!(resolve_threshold(Some("500")), 500);
    assert_eq!(resolve_threshold(Some("-40")), -40);
}

#[test]
fn clamp_policy_pulls_values_into_range() {
    let policy = ThresholdPolicy {
        default: 100,
        clamp: Some(ScoreRange {
            min: 0,
            max: 145,
        }),
    };
    assert_eq!(policy.resolve(Some("200")), ResolvedThreshold {
        value: 145,
        clamped_from: Some(200),
    });
    assert_eq!(policy.resolve(Some("-1")), ResolvedThreshold {
        value: 0,
        clamped_from: Some(-1),
    });
    assert_eq!(policy.resolve(Some("90")), ResolvedThreshold {
        value: 90,
        clamped_from: None,
    });
}

#[test]
fn custom_default_applies_to_garbage() {
    let policy = ThresholdPolicy {
        default: 70,
        clamp: None,
    };
    assert_eq!(policy.resolve(Some("abc")).value, 70);
    assert_eq!(policy.resolve(None).value, 70);
}

proptest! {
    #[test]
    fn integers_round_trip(value in -10_000i64..10_000) {
        prop_assert_eq!(resolve_threshold(Some(&value.to_string())), value);
    }

    #[test]
    fn fractions_truncate_toward_integer_part(whole in 0i64..1_000, frac in 0u32..1_000) {
        prop_assert_eq!(resolve_threshold(Some(&format!("{whole}.{frac}"))), whole);
    }

    #[test]
    fn clamped_value_is_always_in_range(raw in ".{0,16}") {
        let range = ScoreRange { min: 0, max: 145 };
        let policy = ThresholdPolicy { default: 100, clamp: Some(range) };
        prop_assert!(range.contains(policy.resolve(Some(&raw)).value));
    }
}
