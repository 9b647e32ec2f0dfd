// crates/observatory-gate-core/src/core/report.rs
// ============================================================================
// Module: Report Rendering
// Description: Narrative report, summary table, and shared formatting rules.
// Purpose: Turn a ScanResult into the text published to the CI platform.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Rendering is pure: every function maps a [`ScanResult`] to a string or a
//! [`SummaryTable`]. Check names go through [`tidy_key`] and pass flags through
//! [`pass_glyph`] everywhere, so the narrative and the table always agree.
//! Invariants:
//! - Table rows follow the decoded order of the `tests` object.
//! - The glyph is an injective function of the pass flag for every style.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt::Write as _;

use serde::Deserialize;
use serde::Serialize;

use crate::core::model::ScanResult;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Base URL of the public Observatory result page.
pub const DEFAULT_DETAILS_URL: &str = "https://developer.mozilla.org/en-US/observatory/analyze";
/// Report heading.
const REPORT_TITLE: &str = "Mozilla HTTP Observatory Results";
/// Table header cells.
const TABLE_HEADER: [&str; 3] = ["Test", "Passed", "Score"];
/// Placeholder for a missing grade.
const MISSING_GRADE: &str = "-";

// ============================================================================
// SECTION: Options
// ============================================================================

/// Pass/fail indicator style.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GlyphStyle {
    /// `✅ Pass` / `❌ Fail`.
    #[default]
    Emoji,
    /// `Pass` / `Fail`.
    Text,
}

/// Encoding of the results table in the job summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SummaryFormat {
    /// GitHub-flavored Markdown table.
    #[default]
    Markdown,
    /// HTML `<table>`.
    Html,
}

/// Rendering options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportOptions {
    /// Pass/fail indicator style.
    pub glyphs: GlyphStyle,
    /// Base URL for the full-results link; `?host=<host>` is appended.
    pub details_url: String,
    /// Table encoding used by [`render_summary`].
    pub summary_format: SummaryFormat,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            glyphs: GlyphStyle::default(),
            details_url: DEFAULT_DETAILS_URL.to_string(),
            summary_format: SummaryFormat::default(),
        }
    }
}

impl ReportOptions {
    /// Returns the full-results link for `host`.
    #[must_use]
    pub fn details_link(&self, host: &str) -> String {
        format!("{}?host={host}", self.details_url)
    }
}

// ============================================================================
// SECTION: Formatting Rules
// ============================================================================

/// Turns a check name into a title: `x-frame-options` -> `X Frame Options`.
///
/// Only the first character of each `-`-separated segment is upper-cased; the
/// rest of the segment is kept verbatim.
#[must_use]
pub fn tidy_key(name: &str) -> String {
    name.split('-').map(capitalize_first).collect::<Vec<_>>().join(" ")
}

/// Upper-cases the first character of `segment`.
fn capitalize_first(segment: &str) -> String {
    let mut chars = segment.chars();
    chars.next().map_or_else(String::new, |first| first.to_uppercase().chain(chars).collect())
}

/// Returns the pass/fail indicator for `pass`.
#[must_use]
pub const fn pass_glyph(pass: bool, style: GlyphStyle) -> &'static str {
    match (style, pass) {
        (GlyphStyle::Emoji, true) => "✅ Pass",
        (GlyphStyle::Emoji, false) => "❌ Fail",
        (GlyphStyle::Text, true) => "Pass",
        (GlyphStyle::Text, false) => "Fail",
    }
}

// ============================================================================
// SECTION: Narrative
// ============================================================================

/// Renders the Markdown narrative report for `host`.
#[must_use]
pub fn render_narrative(result: &ScanResult, host: &str, options: &ReportOptions) -> String {
    let mut out = render_header(result, host, options);
    out.push_str("\n## Tests\n\n");
    for entry in &result.tests {
        let _ = writeln!(
            out,
            "- {}: {} (Score: {})",
            tidy_key(&entry.name),
            pass_glyph(entry.outcome.pass, options.glyphs),
            entry.outcome.score_modifier
        );
    }
    out
}

/// Renders the job summary: narrative header followed by the results table.
#[must_use]
pub fn render_summary(result: &ScanResult, host: &str, options: &ReportOptions) -> String {
    let mut out = render_header(result, host, options);
    out.push_str("\n## Results\n\n");
    let table = render_table(result, options);
    match options.summary_format {
        SummaryFormat::Markdown => out.push_str(&table.to_markdown()),
        SummaryFormat::Html => out.push_str(&table.to_html()),
    }
    out
}

/// Renders the heading and summary block shared by narrative and summary.
fn render_header(result: &ScanResult, host: &str, options: &ReportOptions) -> String {
    let scan = &result.scan;
    let mut out = String::new();
    let _ = writeln!(out, "# {REPORT_TITLE}\n");
    let _ = writeln!(out, "Scanned: {host}\n");
    out.push_str("## Summary\n\n");
    let _ = writeln!(out, "- Grade: {}", scan.grade.as_deref().unwrap_or(MISSING_GRADE));
    let _ = writeln!(out, "- Score: {}", scan.score);
    let _ = writeln!(out, "- Tests Passed: {} / {}", scan.tests_passed, scan.tests_quantity);
    let _ = writeln!(out, "- Full Results: {}", options.details_link(host));
    out
}

// ============================================================================
// SECTION: Summary Table
// ============================================================================

/// One row of the summary table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    /// True for the header row.
    pub header: bool,
    /// `Test`, `Passed`, `Score` cells.
    pub cells: [String; 3],
}

/// Tabular summary: a header row followed by one row per check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryTable {
    /// Rows in display order, header first.
    pub rows: Vec<TableRow>,
}

/// Builds the summary table for `result`.
#[must_use]
pub fn render_table(result: &ScanResult, options: &ReportOptions) -> SummaryTable {
    let mut rows = Vec::with_capacity(result.tests.len() + 1);
    rows.push(TableRow {
        header: true,
        cells: TABLE_HEADER.map(str::to_string),
    });
    rows.extend(result.tests.iter().map(|entry| TableRow {
        header: false,
        cells: [
            tidy_key(&entry.name),
            pass_glyph(entry.outcome.pass, options.glyphs).to_string(),
            entry.outcome.score_modifier.to_string(),
        ],
    }));
    SummaryTable {
        rows,
    }
}

impl SummaryTable {
    /// Returns the rows after the header.
    pub fn data_rows(&self) -> impl Iterator<Item = &TableRow> {
        self.rows.iter().filter(|row| !row.header)
    }

    /// Renders a GitHub-flavored Markdown table.
    #[must_use]
    pub fn to_markdown(&self) -> String {
        let mut out = String::new();
        for row in &self.rows {
            let cells: Vec<String> =
                row.cells.iter().map(|cell| escape_markdown_cell(cell)).collect();
            let _ = writeln!(out, "| {} |", cells.join(" | "));
            if row.header {
                out.push_str("| --- | --- | --- |\n");
            }
        }
        out
    }

    /// Renders an HTML table.
    #[must_use]
    pub fn to_html(&self) -> String {
        let mut head = String::new();
        let mut body = String::new();
        for row in &self.rows {
            let (target, tag) = if row.header { (&mut head, "th") } else { (&mut body, "td") };
            target.push_str("    <tr>\n");
            for cell in &row.cells {
                let _ = writeln!(target, "      <{tag}>{}</{tag}>", escape_html(cell));
            }
            target.push_str("    </tr>\n");
        }
        format!("<table>\n  <thead>\n{head}  </thead>\n  <tbody>\n{body}  </tbody>\n</table>\n")
    }
}

/// Escapes pipe characters so a value stays inside its Markdown cell.
pub(crate) fn escape_markdown_cell(value: &str) -> String {
    value.replace('|', "\\|")
}

/// Escapes HTML markup characters.
pub(crate) fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}
