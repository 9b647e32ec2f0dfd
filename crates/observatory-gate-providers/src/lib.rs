// crates/observatory-gate-providers/src/lib.rs
// ============================================================================
// Module: Observatory Gate Providers
// Description: Production scanner and CI platform adapters.
// Purpose: Connect the gate runtime to a real subprocess and GitHub Actions.
// Dependencies: observatory-gate-core, rand
// ============================================================================

//! ## Overview
//! This crate ships the two production adapters behind the core interfaces:
//! [`CommandScanner`] runs the scanner as a child process with a timeout and
//! an output cap, and [`GithubActions`] speaks the GitHub Actions runner
//! conventions (input env vars, file commands, workflow commands).
//! Invariants:
//! - The scanner is never run through a shell; the host is one argument.
//! - Values written as workflow commands are escaped so they cannot inject
//!   further commands.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod command;
pub mod github;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use command::CommandScanner;
pub use command::CommandScannerConfig;
pub use github::GithubActions;
pub use github::escape_command_data;
pub use github::escape_command_property;
