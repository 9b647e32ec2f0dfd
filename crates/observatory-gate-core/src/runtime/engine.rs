// crates/observatory-gate-core/src/runtime/engine.rs
// ============================================================================
// Module: Gate Engine
// Description: Resolve inputs, scan, decode, render, publish, and decide.
// Purpose: Provide the explicit run entry point for one gate invocation.
// Dependencies: crate::{core, interfaces}, thiserror
// ============================================================================

//! ## Overview
//! [`run`] executes the whole pipeline once and never panics or exits the
//! process itself; the caller maps the returned [`RunOutcome`] to an exit
//! status.
//! Invariants:
//! - Every failure path publishes exactly one failure message through
//!   [`CiPlatform::set_failed`], prefixed with [`FAILURE_PREFIX`].
//! - Outputs published before a later failure are not retracted.
//! - The scanner is invoked at most once per run.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

use crate::core::decode::MalformedResponseError;
use crate::core::decode::decode;
use crate::core::host::InvalidHostError;
use crate::core::host::resolve_host;
use crate::core::report::ReportOptions;
use crate::core::report::render_narrative;
use crate::core::report::render_summary;
use crate::core::threshold::ThresholdPolicy;
use crate::core::verdict::FAILURE_PREFIX;
use crate::core::verdict::Verdict;
use crate::core::verdict::evaluate;
use crate::interfaces::CiPlatform;
use crate::interfaces::PlatformError;
use crate::interfaces::ScanExecutionError;
use crate::interfaces::Scanner;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Name of the required host input.
pub const HOST_INPUT: &str = "host";
/// Name of the optional passing-score input.
pub const PASSING_SCORE_INPUT: &str = "passing-score";
/// Name of the output carrying the narrative report.
pub const RESULTS_OUTPUT: &str = "results";

// ============================================================================
// SECTION: Types
// ============================================================================

/// Options for a gate run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Passing-score policy.
    pub threshold: ThresholdPolicy,
    /// Report rendering options.
    pub report: ReportOptions,
}

/// Terminal outcome of a gate run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// Score met the threshold.
    Passed {
        /// Observed score.
        score: i64,
        /// Effective threshold.
        threshold: i64,
    },
    /// Score fell below the threshold.
    BelowThreshold {
        /// Observed score.
        score: i64,
        /// Effective threshold.
        threshold: i64,
    },
    /// A step failed before a verdict could be reached.
    Errored {
        /// Published failure message.
        message: String,
    },
}

impl RunOutcome {
    /// Returns true when the run should exit successfully.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Passed { .. })
    }
}

/// Errors that abort a gate run.
///
/// # Invariants
/// - Display text is the part published after [`FAILURE_PREFIX`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GateError {
    /// Host input was empty or unparsable.
    #[error(transparent)]
    InvalidHost(#[from] InvalidHostError),
    /// Scanner failed to launch or exited abnormally.
    #[error(transparent)]
    ScanExecution(#[from] ScanExecutionError),
    /// Scanner output was not the expected document.
    #[error(transparent)]
    MalformedResponse(#[from] MalformedResponseError),
    /// The CI platform rejected a read or write.
    #[error(transparent)]
    Platform(#[from] PlatformError),
}

/// Verdict plus the numbers it was reached from.
struct Evaluation {
    /// Pass/fail decision.
    verdict: Verdict,
    /// Observed score.
    score: i64,
    /// Effective threshold.
    threshold: i64,
}

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// Runs the gate once and reports the verdict through `platform`.
pub fn run<P, S>(platform: &P, scanner: &S, options: &RunOptions) -> RunOutcome
where
    P: CiPlatform + ?Sized,
    S: Scanner + ?Sized,
{
    match execute(platform, scanner, options) {
        Ok(evaluation) => {
            let Evaluation {
                verdict,
                score,
                threshold,
            } = evaluation;
            match verdict.failure_message() {
                None => RunOutcome::Passed {
                    score,
                    threshold,
                },
                Some(message) => {
                    let _ = platform.set_failed(&message);
                    RunOutcome::BelowThreshold {
                        score,
                        threshold,
                    }
                }
            }
        }
        Err(err) => {
            let message = format!("{FAILURE_PREFIX}{err}");
            let _ = platform.set_failed(&message);
            RunOutcome::Errored {
                message,
            }
        }
    }
}

/// Executes the pipeline up to the verdict.
fn execute<P, S>(platform: &P, scanner: &S, options: &RunOptions) -> Result<Evaluation, GateError>
where
    P: CiPlatform + ?Sized,
    S: Scanner + ?Sized,
{
    let host = resolve_host(&platform.input(HOST_INPUT, true)?)?;
    let raw_score = platform.input(PASSING_SCORE_INPUT, false)?;
    let threshold = options.threshold.resolve(Some(&raw_score));
    if let (Some(requested), Some(range)) = (threshold.clamped_from, options.threshold.clamp) {
        platform.warning(&format!(
            "passing score {requested} is outside [{}, {}]; using {}",
            range.min, range.max, threshold.value
        ))?;
    }

    let stdout = scanner.scan(&host)?;
    let result = decode(&stdout)?;

    platform.set_output(RESULTS_OUTPUT, &render_narrative(&result, &host, &options.report))?;
    platform.write_summary(&render_summary(&result, &host, &options.report))?;

    Ok(Evaluation {
        verdict: evaluate(&result, threshold.value),
        score: result.scan.score,
        threshold: threshold.value,
    })
}
