// crates/observatory-gate-core/src/core/model.rs
// ============================================================================
// Module: Scan Result Model
// Description: Typed view of the HTTP Observatory JSON document.
// Purpose: Give rendering and verdict code a fixed, validated shape.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! The scanner emits one JSON document with a `scan` summary object and a
//! `tests` object keyed by check name. Only the summary score plus each test's
//! `pass` flag and `scoreModifier` drive behavior; everything else is kept as
//! passthrough data for display.
//!
//! Invariants:
//! - Test entries keep the order in which they appear in the document.
//! - `scan.score` is required; other summary fields default when absent.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::fmt;

use serde::Deserialize;
use serde::Deserializer;
use serde::de::MapAccess;
use serde::de::Visitor;
use serde_json::Map;
use serde_json::Value;

// ============================================================================
// SECTION: Scan Result
// ============================================================================

/// Decoded scanner output for a single host.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ScanResult {
    /// Summary verdict for the host.
    pub scan: ScanSummary,
    /// Individual checks in document order.
    #[serde(default, deserialize_with = "deserialize_ordered_tests")]
    pub tests: Vec<TestEntry>,
}

/// Summary block of a scan.
///
/// # Invariants
/// - `score` may be negative or exceed 100; it is never clamped here.
/// - `tests_passed + tests_failed <= tests_quantity` is reported by the
///   scanner and not enforced.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanSummary {
    /// Letter grade, e.g. `A+` or `F`.
    #[serde(default)]
    pub grade: Option<String>,
    /// Overall numeric score.
    pub score: i64,
    /// HTTP status code observed by the scanner.
    #[serde(default)]
    pub status_code: Option<i64>,
    /// Scoring algorithm version.
    #[serde(default)]
    pub algorithm_version: Option<i64>,
    /// Number of passing checks.
    #[serde(default)]
    pub tests_passed: u64,
    /// Number of failing checks.
    #[serde(default)]
    pub tests_failed: u64,
    /// Total number of checks.
    #[serde(default)]
    pub tests_quantity: u64,
    /// Scanner-reported error, if any.
    #[serde(default)]
    pub error: Option<String>,
    /// Response headers captured during the scan.
    #[serde(default)]
    pub response_headers: BTreeMap<String, String>,
}

// ============================================================================
// SECTION: Test Outcomes
// ============================================================================

/// A named check paired with its outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct TestEntry {
    /// Check name as emitted by the scanner, e.g. `x-frame-options`.
    pub name: String,
    /// Outcome of the check.
    pub outcome: TestOutcome,
}

/// Outcome of a single security check.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestOutcome {
    /// Whether the check passed.
    pub pass: bool,
    /// Contribution of this check to the overall score.
    pub score_modifier: i64,
    /// Result identifier, e.g. `csp-implemented-with-no-unsafe`.
    #[serde(default)]
    pub result: Option<String>,
    /// Expected result identifier.
    #[serde(default)]
    pub expectation: Option<String>,
    /// Check-specific fields (policy flags, cookies, redirect route).
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

// ============================================================================
// SECTION: Ordered Deserialization
// ============================================================================

/// Deserializes the `tests` object into entries that keep document order.
fn deserialize_ordered_tests<'de, D>(deserializer: D) -> Result<Vec<TestEntry>, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_map(OrderedTests)
}

/// Map visitor that collects entries in the order they are read.
struct OrderedTests;

impl<'de> Visitor<'de> for OrderedTests {
    type Value = Vec<TestEntry>;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("an object mapping check names to outcomes")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
        while let Some((name, outcome)) = map.next_entry::<String, TestOutcome>()? {
            entries.push(TestEntry {
                name,
                outcome,
            });
        }
        Ok(entries)
    }
}
