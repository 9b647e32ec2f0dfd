// crates/observatory-gate-core/src/core/host.rs
// ============================================================================
// Module: Host Resolution
// Description: Normalizes the `host` input to a bare hostname.
// Purpose: Accept either a hostname or a full URL and hand the scanner a host.
// Dependencies: thiserror, url
// ============================================================================

//! ## Overview
//! Users paste either `example.com` or `https://example.com/some/page` into
//! the workflow input. Inputs that carry a scheme are parsed as URLs and
//! reduced to their host component; bare inputs are validated as hosts. A
//! port is dropped in both forms, so `example.com:8443` and
//! `https://example.com:8443` both resolve to `example.com`.
//! Invariants:
//! - The result is a fixed point: resolving it again yields the same host.
//! - The scheme never influences the result.
//! - The result never starts with `-`, so it cannot be read as a flag.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;
use url::Host;
use url::Url;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Raised when the host input is empty or cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid host: {reason}")]
pub struct InvalidHostError {
    /// Why the input was rejected.
    pub reason: String,
}

impl InvalidHostError {
    /// Builds an error with the given reason.
    fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

// ============================================================================
// SECTION: Resolution
// ============================================================================

/// Resolves the raw `host` input into a bare hostname.
///
/// # Errors
///
/// Returns [`InvalidHostError`] when the input is empty, a scheme-prefixed
/// value fails URL parsing or has no host, or a bare value is not a host.
pub fn resolve_host(raw: &str) -> Result<String, InvalidHostError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(InvalidHostError::new("host input is empty"));
    }

    let host = if trimmed.contains("://") {
        let url = Url::parse(trimmed)
            .map_err(|err| InvalidHostError::new(format!("{trimmed}: {err}")))?;
        url.host_str()
            .map(str::to_owned)
            .ok_or_else(|| InvalidHostError::new(format!("{trimmed}: url has no host")))?
    } else {
        Host::parse(strip_port(trimmed))
            .map_err(|err| InvalidHostError::new(format!("{trimmed}: {err}")))?
            .to_string()
    };

    if host.is_empty() {
        return Err(InvalidHostError::new(format!("{trimmed}: url has no host")));
    }
    if host.starts_with('-') {
        return Err(InvalidHostError::new(format!("{host}: host must not start with '-'")));
    }
    Ok(host)
}

/// Removes a trailing `:<digits>` port from a bare host.
fn strip_port(bare: &str) -> &str {
    match bare.rsplit_once(':') {
        Some((host, port))
            if !port.is_empty()
                && port.bytes().all(|byte| byte.is_ascii_digit())
                && (!host.contains(':') || host.ends_with(']')) =>
        {
            host
        }
        _ => bare,
    }
}
