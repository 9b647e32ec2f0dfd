// crates/observatory-gate-cli/src/lib.rs
// ============================================================================
// Module: Observatory Gate CLI Library
// Description: Shared helpers for the Observatory Gate command-line interface.
// Purpose: Provide reusable components (i18n) for the CLI binary and tests.
// Dependencies: Standard library.
// ============================================================================

//! ## Overview
//! This library houses the internationalized message catalog. The binary
//! entry point (`src/main.rs`) imports it so every user-facing line goes
//! through the same [`t!`] macro.

// ============================================================================
// SECTION: Modules
// ============================================================================

/// Internationalization helpers and message catalog.
pub mod i18n;
