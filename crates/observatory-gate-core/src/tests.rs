// crates/observatory-gate-core/src/tests.rs
// ============================================================================
// Module: Core Test Lint Configuration
// Description: Shared test-only lint relaxations for core unit tests.
// Purpose: Allow panic-based assertions and debug output in tests.
// Dependencies: observatory-gate-core
// ============================================================================

//! ## Overview
//! Provides test-only lint relaxations and unit tests for private helpers.

// ============================================================================
// SECTION: Lint Configuration
// ============================================================================

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

// ============================================================================
// SECTION: Tests
// ============================================================================

use crate::core::report::escape_html;
use crate::core::report::escape_markdown_cell;
use crate::core::threshold::parse_leading_integer;

#[test]
fn leading_integer_parse_follows_digit_prefix() {
    assert_eq!(parse_leading_integer("85"), Some(85));
    assert_eq!(parse_leading_integer("  85.7"), Some(85));
    assert_eq!(parse_leading_integer("-12abc"), Some(-12));
    assert_eq!(parse_leading_integer("+7"), Some(7));
    assert_eq!(parse_leading_integer("-"), None);
    assert_eq!(parse_leading_integer(".5"), None);
    assert_eq!(parse_leading_integer("99999999999999999999"), None);
}

#[test]
fn markdown_cells_escape_pipes() {
    assert_eq!(escape_markdown_cell("a|b"), "a\\|b");
    assert_eq!(escape_markdown_cell("plain"), "plain");
}

#[test]
fn html_escape_covers_markup_characters() {
    assert_eq!(escape_html("<a href=\"x\">&</a>"), "&lt;a href=&quot;x&quot;&gt;&amp;&lt;/a&gt;");
}
