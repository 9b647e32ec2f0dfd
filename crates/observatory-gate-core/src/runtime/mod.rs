// crates/observatory-gate-core/src/runtime/mod.rs
// ============================================================================
// Module: Observatory Gate Runtime
// Description: The gate pipeline and an in-memory CI platform.
// Purpose: Execute one scan-and-verdict run against the interfaces.
// Dependencies: crate::{core, interfaces}
// ============================================================================

//! ## Overview
//! The runtime owns the single linear flow of a gate run. Every external
//! surface (scanner, CI platform) must be called through the same [`run`]
//! entry point so tests and the CLI exercise identical logic.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod engine;
pub mod platform;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use engine::GateError;
pub use engine::HOST_INPUT;
pub use engine::PASSING_SCORE_INPUT;
pub use engine::RESULTS_OUTPUT;
pub use engine::RunOptions;
pub use engine::RunOutcome;
pub use engine::run;
pub use platform::InMemoryPlatform;
pub use platform::PlatformRecord;
