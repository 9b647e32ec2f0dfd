// crates/observatory-gate-core/src/lib.rs
// ============================================================================
// Module: Observatory Gate Core Library
// Description: Public API surface for the Observatory Gate core.
// Purpose: Expose scan types, interfaces, and the gate runtime.
// Dependencies: crate::{core, interfaces, runtime}
// ============================================================================

//! ## Overview
//! Observatory Gate core turns a single HTTP Observatory scan into a CI
//! verdict: it resolves the target host and passing score, decodes the
//! scanner's JSON output, renders the report, and compares the score against
//! the threshold. The scanner process and the CI platform are reached only
//! through the traits in [`interfaces`], so the whole pipeline runs in tests
//! without spawning processes or touching the environment.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod interfaces;
pub mod runtime;

#[cfg(test)]
mod tests;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use core::*;

pub use interfaces::CiPlatform;
pub use interfaces::PlatformError;
pub use interfaces::ScanExecutionError;
pub use interfaces::Scanner;
pub use runtime::GateError;
pub use runtime::HOST_INPUT;
pub use runtime::InMemoryPlatform;
pub use runtime::PASSING_SCORE_INPUT;
pub use runtime::PlatformRecord;
pub use runtime::RESULTS_OUTPUT;
pub use runtime::RunOptions;
pub use runtime::RunOutcome;
pub use runtime::run;
