// crates/observatory-gate-core/src/core/mod.rs
// ============================================================================
// Module: Observatory Gate Core Types
// Description: Scan result model plus the pure resolution, decoding,
//              rendering, and verdict steps.
// Purpose: Keep every side-effect-free step of the gate in one place.
// Dependencies: serde, serde_json, thiserror, url
// ============================================================================

//! ## Overview
//! Core modules hold the pure half of the gate. Nothing in here spawns a
//! process or reads the environment; the runtime wires these steps to the
//! scanner and CI platform interfaces.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod decode;
pub mod host;
pub mod model;
pub mod report;
pub mod threshold;
pub mod verdict;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use decode::MalformedResponseError;
pub use decode::decode;
pub use host::InvalidHostError;
pub use host::resolve_host;
pub use model::ScanResult;
pub use model::ScanSummary;
pub use model::TestEntry;
pub use model::TestOutcome;
pub use report::DEFAULT_DETAILS_URL;
pub use report::GlyphStyle;
pub use report::ReportOptions;
pub use report::SummaryFormat;
pub use report::SummaryTable;
pub use report::TableRow;
pub use report::pass_glyph;
pub use report::render_narrative;
pub use report::render_summary;
pub use report::render_table;
pub use report::tidy_key;
pub use threshold::DEFAULT_PASSING_SCORE;
pub use threshold::ResolvedThreshold;
pub use threshold::ScoreRange;
pub use threshold::ThresholdPolicy;
pub use threshold::resolve_threshold;
pub use verdict::FAILURE_PREFIX;
pub use verdict::Verdict;
pub use verdict::evaluate;
