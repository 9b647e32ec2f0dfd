// crates/observatory-gate-config/src/lib.rs
// ============================================================================
// Module: Observatory Gate Config Library
// Description: Configuration model and validation.
// Purpose: Single source of truth for observatory-gate.toml semantics.
// Dependencies: observatory-gate-core, serde, toml
// ============================================================================

//! ## Overview
//! `observatory-gate-config` defines the optional configuration file for the
//! gate: which scanner command to run and with what limits, the passing-score
//! policy, and report rendering options. Validation is strict and fails
//! closed; a missing default file means built-in defaults.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::*;
