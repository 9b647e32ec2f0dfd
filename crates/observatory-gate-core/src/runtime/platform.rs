// crates/observatory-gate-core/src/runtime/platform.rs
// ============================================================================
// Module: In-Memory CI Platform
// Description: Recording CiPlatform implementation for tests and dry runs.
// Purpose: Observe everything a gate run publishes without a real CI host.
// Dependencies: crate::interfaces
// ============================================================================

//! ## Overview
//! [`InMemoryPlatform`] serves inputs from a map and records outputs,
//! summaries, failures, and warnings in call order. Input semantics match the
//! GitHub Actions adapter: values are trimmed and a required empty input is a
//! [`PlatformError::MissingInput`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;

use crate::interfaces::CiPlatform;
use crate::interfaces::PlatformError;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Everything published to an [`InMemoryPlatform`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlatformRecord {
    /// Output name/value pairs in publication order.
    pub outputs: Vec<(String, String)>,
    /// Summary fragments in publication order.
    pub summaries: Vec<String>,
    /// Failure messages.
    pub failures: Vec<String>,
    /// Warning messages.
    pub warnings: Vec<String>,
}

impl PlatformRecord {
    /// Returns the last value published for output `name`.
    #[must_use]
    pub fn output(&self, name: &str) -> Option<&str> {
        self.outputs.iter().rev().find(|(key, _)| key == name).map(|(_, value)| value.as_str())
    }
}

/// In-memory CI platform for tests and examples.
#[derive(Debug, Default, Clone)]
pub struct InMemoryPlatform {
    /// Input values keyed by input name.
    inputs: BTreeMap<String, String>,
    /// Published values protected by a mutex.
    record: Arc<Mutex<PlatformRecord>>,
}

impl InMemoryPlatform {
    /// Creates a platform with no inputs.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the platform with input `name` set to `value`.
    #[must_use]
    pub fn with_input(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.inputs.insert(name.into(), value.into());
        self
    }

    /// Returns a copy of everything published so far.
    #[must_use]
    pub fn record(&self) -> PlatformRecord {
        self.record
            .lock()
            .map_or_else(|poisoned| poisoned.into_inner().clone(), |guard| guard.clone())
    }

    /// Locks the record for an append.
    fn lock(&self) -> Result<MutexGuard<'_, PlatformRecord>, PlatformError> {
        self.record
            .lock()
            .map_err(|_| PlatformError::Io("platform record mutex poisoned".to_string()))
    }
}

impl CiPlatform for InMemoryPlatform {
    fn input(&self, name: &str, required: bool) -> Result<String, PlatformError> {
        let value =
            self.inputs.get(name).map(|value| value.trim().to_string()).unwrap_or_default();
        if required && value.is_empty() {
            return Err(PlatformError::MissingInput(name.to_string()));
        }
        Ok(value)
    }

    fn set_output(&self, name: &str, value: &str) -> Result<(), PlatformError> {
        self.lock()?.outputs.push((name.to_string(), value.to_string()));
        Ok(())
    }

    fn write_summary(&self, content: &str) -> Result<(), PlatformError> {
        self.lock()?.summaries.push(content.to_string());
        Ok(())
    }

    fn set_failed(&self, message: &str) -> Result<(), PlatformError> {
        self.lock()?.failures.push(message.to_string());
        Ok(())
    }

    fn warning(&self, message: &str) -> Result<(), PlatformError> {
        self.lock()?.warnings.push(message.to_string());
        Ok(())
    }
}
