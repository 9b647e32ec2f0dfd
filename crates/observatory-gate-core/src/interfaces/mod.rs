// crates/observatory-gate-core/src/interfaces/mod.rs
// ============================================================================
// Module: Observatory Gate Interfaces
// Description: Boundaries to the scanner process and the CI platform.
// Purpose: Define the contract surfaces used by the gate runtime.
// Dependencies: thiserror
// ============================================================================

//! ## Overview
//! The gate delegates the actual scan to an external tool and its inputs and
//! outputs to the host CI platform. Both are modeled as traits so production
//! adapters (subprocess, GitHub Actions) and in-memory test doubles are
//! interchangeable.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Message used when a scan error carries no message of its own.
pub const UNKNOWN_ERROR_MESSAGE: &str = "Unknown error";

// ============================================================================
// SECTION: Scanner
// ============================================================================

/// Scan failure surfaced by a [`Scanner`].
///
/// # Invariants
/// - Displays the underlying message verbatim, or [`UNKNOWN_ERROR_MESSAGE`]
///   when none is available.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", .message.as_deref().unwrap_or(UNKNOWN_ERROR_MESSAGE))]
pub struct ScanExecutionError {
    /// Underlying error text, if any.
    pub message: Option<String>,
}

impl ScanExecutionError {
    /// Builds an error carrying `message`.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
        }
    }

    /// Builds an error without a message.
    #[must_use]
    pub const fn unknown() -> Self {
        Self {
            message: None,
        }
    }
}

/// Runs a security scan against a host.
pub trait Scanner {
    /// Scans `host` and returns the scanner's raw standard output.
    ///
    /// # Errors
    ///
    /// Returns [`ScanExecutionError`] when the scanner cannot be launched,
    /// exits unsuccessfully, or exceeds its limits.
    fn scan(&self, host: &str) -> Result<Vec<u8>, ScanExecutionError>;
}

// ============================================================================
// SECTION: CI Platform
// ============================================================================

/// Errors raised by a [`CiPlatform`].
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlatformError {
    /// A required input was empty or unset.
    #[error("Input required and not supplied: {0}")]
    MissingInput(String),
    /// Writing to a platform file or stream failed.
    #[error("platform io error: {0}")]
    Io(String),
    /// A command or value could not be encoded for the platform.
    #[error("invalid platform command: {0}")]
    Invalid(String),
}

/// Input/output conventions of the host CI platform.
pub trait CiPlatform {
    /// Reads a named input. Values are trimmed; absent inputs read as empty.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError::MissingInput`] when `required` is set and the
    /// value is empty.
    fn input(&self, name: &str, required: bool) -> Result<String, PlatformError>;

    /// Publishes a named output value.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError`] when the value cannot be written.
    fn set_output(&self, name: &str, value: &str) -> Result<(), PlatformError>;

    /// Appends Markdown content to the run summary.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError`] when the summary cannot be written.
    fn write_summary(&self, content: &str) -> Result<(), PlatformError>;

    /// Marks the run as failed with `message`.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError`] when the failure cannot be reported.
    fn set_failed(&self, message: &str) -> Result<(), PlatformError>;

    /// Emits a warning annotation.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError`] when the warning cannot be reported.
    fn warning(&self, message: &str) -> Result<(), PlatformError>;
}
