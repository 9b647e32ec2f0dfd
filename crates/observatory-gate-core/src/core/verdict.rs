// crates/observatory-gate-core/src/core/verdict.rs
// ============================================================================
// Module: Verdict Evaluation
// Description: Compares the scan score against the passing threshold.
// Purpose: Produce the pass/fail decision and its canonical message.
// Dependencies: none
// ============================================================================

//! ## Overview
//! A run fails exactly when the score is strictly below the threshold. The
//! failure message is a stable template so downstream tooling can tell a low
//! score apart from a broken scan.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::model::ScanResult;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Prefix shared by every failure message the gate publishes.
pub const FAILURE_PREFIX: &str = "Scan failed: ";

// ============================================================================
// SECTION: Verdict
// ============================================================================

/// Outcome of comparing a score with the threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Score meets or exceeds the threshold.
    Pass,
    /// Score is below the threshold.
    Fail {
        /// Observed score.
        score: i64,
        /// Effective threshold.
        threshold: i64,
    },
}

impl Verdict {
    /// Returns true for [`Verdict::Pass`].
    #[must_use]
    pub const fn is_pass(&self) -> bool {
        matches!(self, Self::Pass)
    }

    /// Returns the failure message, or `None` on pass.
    #[must_use]
    pub fn failure_message(&self) -> Option<String> {
        match self {
            Self::Pass => None,
            Self::Fail {
                threshold, ..
            } => Some(format!("{FAILURE_PREFIX}Score is lower than {threshold}")),
        }
    }
}

/// Evaluates `result` against `threshold`.
#[must_use]
pub const fn evaluate(result: &ScanResult, threshold: i64) -> Verdict {
    let score = result.scan.score;
    if score < threshold {
        Verdict::Fail {
            score,
            threshold,
        }
    } else {
        Verdict::Pass
    }
}
