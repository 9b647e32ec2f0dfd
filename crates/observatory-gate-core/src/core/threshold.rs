// crates/observatory-gate-core/src/core/threshold.rs
// ============================================================================
// Module: Passing Score Resolution
// Description: Parses the `passing-score` input into an integer threshold.
// Purpose: Apply the default and the optional clamp range in one place.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! The passing score arrives as free text. Absent or non-numeric input falls
//! back to the default silently; numeric input is read as its leading integer,
//! so fractional parts are discarded (`"85.7"` becomes `85`).
//!
//! Clamping is opt-in. Without a configured [`ScoreRange`] any integer is
//! accepted as-is; with one, out-of-range values are pulled into the range and
//! the caller is told the original value so it can warn.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Threshold used when the input is absent or not a number.
pub const DEFAULT_PASSING_SCORE: i64 = 100;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Inclusive score range used for optional clamping.
///
/// # Invariants
/// - `min <= max` (validated by the configuration layer).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScoreRange {
    /// Lowest accepted threshold.
    pub min: i64,
    /// Highest accepted threshold.
    pub max: i64,
}

impl ScoreRange {
    /// Returns true when `value` lies inside the range.
    #[must_use]
    pub const fn contains(self, value: i64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Policy for turning the raw input into a threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThresholdPolicy {
    /// Value used when the input is absent or unparsable.
    pub default: i64,
    /// Optional clamp range; `None` accepts any integer.
    pub clamp: Option<ScoreRange>,
}

impl Default for ThresholdPolicy {
    fn default() -> Self {
        Self {
            default: DEFAULT_PASSING_SCORE,
            clamp: None,
        }
    }
}

/// Threshold chosen by a [`ThresholdPolicy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedThreshold {
    /// Effective threshold.
    pub value: i64,
    /// Parsed input value when it had to be clamped.
    pub clamped_from: Option<i64>,
}

impl ThresholdPolicy {
    /// Resolves the raw input under this policy.
    #[must_use]
    pub fn resolve(&self, raw: Option<&str>) -> ResolvedThreshold {
        let parsed = raw.and_then(parse_leading_integer).unwrap_or(self.default);
        match self.clamp {
            Some(range) if !range.contains(parsed) => ResolvedThreshold {
                value: parsed.clamp(range.min, range.max),
                clamped_from: Some(parsed),
            },
            _ => ResolvedThreshold {
                value: parsed,
                clamped_from: None,
            },
        }
    }
}

// ============================================================================
// SECTION: Resolution
// ============================================================================

/// Resolves the raw `passing-score` input with the default, unclamped policy.
#[must_use]
pub fn resolve_threshold(raw: Option<&str>) -> i64 {
    ThresholdPolicy::default().resolve(raw).value
}

/// Parses the optional sign and leading ASCII digits of `raw`.
///
/// Returns `None` when no digits lead the (trimmed) input or the value does
/// not fit in an `i64`.
pub(crate) fn parse_leading_integer(raw: &str) -> Option<i64> {
    let trimmed = raw.trim();
    let sign_len = usize::from(trimmed.starts_with(['+', '-']));
    let digits = trimmed[sign_len ..].bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    trimmed[.. sign_len + digits].parse().ok()
}
