// crates/observatory-gate-config/src/config.rs
// ============================================================================
// Module: Observatory Gate Configuration
// Description: Configuration loading and validation for the gate.
// Purpose: Provide strict, fail-closed config parsing with hard limits.
// Dependencies: observatory-gate-core, serde, toml, url
// ============================================================================

//! ## Overview
//! Configuration is loaded from a TOML file with strict size and path limits.
//! The file is optional: when no path is given, the environment does not name
//! one, and `observatory-gate.toml` does not exist, defaults apply. A file that
//! is named explicitly must exist. Unknown keys are rejected.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

use observatory_gate_core::DEFAULT_DETAILS_URL;
use observatory_gate_core::DEFAULT_PASSING_SCORE;
use observatory_gate_core::GlyphStyle;
use observatory_gate_core::ReportOptions;
use observatory_gate_core::RunOptions;
use observatory_gate_core::SummaryFormat;
use observatory_gate_core::ScoreRange;
use observatory_gate_core::ThresholdPolicy;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;
use url::Url;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
pub const DEFAULT_CONFIG_NAME: &str = "observatory-gate.toml";
/// Environment variable used to override the config path.
pub const CONFIG_ENV_VAR: &str = "OBSERVATORY_GATE_CONFIG";
/// Maximum configuration file size in bytes.
pub(crate) const MAX_CONFIG_FILE_SIZE: usize = 64 * 1024;
/// Maximum length of a single path component.
pub(crate) const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
pub(crate) const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Default scanner timeout in milliseconds.
pub const DEFAULT_SCANNER_TIMEOUT_MS: u64 = 300_000;
/// Minimum scanner timeout in milliseconds.
pub(crate) const MIN_SCANNER_TIMEOUT_MS: u64 = 1_000;
/// Maximum scanner timeout in milliseconds.
pub(crate) const MAX_SCANNER_TIMEOUT_MS: u64 = 3_600_000;
/// Default cap on captured scanner stdout.
pub const DEFAULT_MAX_OUTPUT_BYTES: usize = 8 * 1024 * 1024;
/// Minimum cap on captured scanner stdout.
pub(crate) const MIN_MAX_OUTPUT_BYTES: usize = 1024;
/// Maximum cap on captured scanner stdout.
pub(crate) const MAX_MAX_OUTPUT_BYTES: usize = 64 * 1024 * 1024;
/// Maximum number of scanner command arguments.
pub(crate) const MAX_COMMAND_ARGS: usize = 64;

// ============================================================================
// SECTION: Configuration Types
// ============================================================================

/// Observatory Gate configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ObservatoryGateConfig {
    /// Scanner command configuration.
    #[serde(default)]
    pub scanner: ScannerConfig,
    /// Passing-score policy.
    #[serde(default)]
    pub threshold: ThresholdConfig,
    /// Report rendering configuration.
    #[serde(default)]
    pub report: ReportConfig,
}

impl ObservatoryGateConfig {
    /// Loads configuration from disk using the default resolution rules.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let (resolved, explicit) = resolve_path(path)?;
        validate_path(&resolved)?;
        if !explicit && !resolved.exists() {
            return Ok(Self::default());
        }
        let bytes = fs::read(&resolved).map_err(|err| ConfigError::Io(err.to_string()))?;
        Self::from_bytes(&bytes)
    }

    /// Parses and validates configuration from raw file bytes.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the bytes are oversized, not UTF-8, not
    /// valid TOML, or fail validation.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ConfigError> {
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        let config: Self =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.scanner.validate()?;
        self.threshold.validate()?;
        self.report.validate()?;
        Ok(())
    }

    /// Returns the run options derived from this configuration.
    #[must_use]
    pub fn run_options(&self) -> RunOptions {
        RunOptions {
            threshold: self.threshold.policy(),
            report: self.report.options(),
        }
    }
}

/// Scanner command configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScannerConfig {
    /// Program and leading arguments; the host is appended as the last one.
    #[serde(default = "default_scanner_command")]
    pub command: Vec<String>,
    /// Wall-clock limit for one scan, in milliseconds.
    #[serde(default = "default_scanner_timeout_ms")]
    pub timeout_ms: u64,
    /// Maximum captured stdout size in bytes.
    #[serde(default = "default_max_output_bytes")]
    pub max_output_bytes: usize,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            command: default_scanner_command(),
            timeout_ms: DEFAULT_SCANNER_TIMEOUT_MS,
            max_output_bytes: DEFAULT_MAX_OUTPUT_BYTES,
        }
    }
}

impl ScannerConfig {
    /// Validates scanner settings.
    fn validate(&self) -> Result<(), ConfigError> {
        let Some(program) = self.command.first() else {
            return Err(ConfigError::Invalid("scanner.command must not be empty".to_string()));
        };
        if program.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "scanner.command program must be non-empty".to_string(),
            ));
        }
        if self.command.len() > MAX_COMMAND_ARGS {
            return Err(ConfigError::Invalid("scanner.command has too many arguments".to_string()));
        }
        if self.command.iter().any(|arg| arg.contains('\0')) {
            return Err(ConfigError::Invalid(
                "scanner.command arguments must not contain NUL".to_string(),
            ));
        }
        if !(MIN_SCANNER_TIMEOUT_MS..=MAX_SCANNER_TIMEOUT_MS).contains(&self.timeout_ms) {
            return Err(ConfigError::Invalid(format!(
                "scanner.timeout_ms must be between {MIN_SCANNER_TIMEOUT_MS} and \
                 {MAX_SCANNER_TIMEOUT_MS}"
            )));
        }
        if !(MIN_MAX_OUTPUT_BYTES..=MAX_MAX_OUTPUT_BYTES).contains(&self.max_output_bytes) {
            return Err(ConfigError::Invalid(format!(
                "scanner.max_output_bytes must be between {MIN_MAX_OUTPUT_BYTES} and \
                 {MAX_MAX_OUTPUT_BYTES}"
            )));
        }
        Ok(())
    }
}

/// Passing-score policy configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ThresholdConfig {
    /// Threshold used when the input is absent or non-numeric.
    #[serde(default = "default_passing_score")]
    pub default: i64,
    /// Optional range requested thresholds are clamped into.
    #[serde(default)]
    pub clamp: Option<ScoreRange>,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            default: DEFAULT_PASSING_SCORE,
            clamp: None,
        }
    }
}

impl ThresholdConfig {
    /// Validates threshold settings.
    fn validate(&self) -> Result<(), ConfigError> {
        if let Some(range) = self.clamp {
            if range.min > range.max {
                return Err(ConfigError::Invalid(
                    "threshold.clamp.min must not exceed threshold.clamp.max".to_string(),
                ));
            }
            if !range.contains(self.default) {
                return Err(ConfigError::Invalid(
                    "threshold.default must lie within threshold.clamp".to_string(),
                ));
            }
        }
        Ok(())
    }

    /// Returns the core threshold policy.
    #[must_use]
    pub const fn policy(&self) -> ThresholdPolicy {
        ThresholdPolicy {
            default: self.default,
            clamp: self.clamp,
        }
    }
}

/// Report rendering configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReportConfig {
    /// Pass/fail indicator style.
    #[serde(default)]
    pub glyphs: GlyphStyle,
    /// Base URL of the full-results page; `?host=<host>` is appended.
    #[serde(default = "default_details_url")]
    pub details_url: String,
    /// Encoding of the job summary table.
    #[serde(default)]
    pub summary_format: SummaryFormat,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            glyphs: GlyphStyle::default(),
            details_url: default_details_url(),
            summary_format: SummaryFormat::default(),
        }
    }
}

impl ReportConfig {
    /// Validates report settings.
    fn validate(&self) -> Result<(), ConfigError> {
        let url = Url::parse(&self.details_url)
            .map_err(|err| ConfigError::Invalid(format!("report.details_url: {err}")))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::Invalid(
                "report.details_url must use http or https".to_string(),
            ));
        }
        if url.query().is_some() || url.fragment().is_some() {
            return Err(ConfigError::Invalid(
                "report.details_url must not carry a query or fragment".to_string(),
            ));
        }
        Ok(())
    }

    /// Returns the core report options.
    #[must_use]
    pub fn options(&self) -> ReportOptions {
        ReportOptions {
            glyphs: self.glyphs,
            details_url: self.details_url.clone(),
            summary_format: self.summary_format,
        }
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration loading or validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Resolves the config path; the flag reports whether it was named explicitly.
fn resolve_path(path: Option<&Path>) -> Result<(PathBuf, bool), ConfigError> {
    if let Some(path) = path {
        return Ok((path.to_path_buf(), true));
    }
    if let Ok(env_path) = env::var(CONFIG_ENV_VAR) {
        if env_path.len() > MAX_TOTAL_PATH_LENGTH {
            return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
        }
        if !env_path.trim().is_empty() {
            return Ok((PathBuf::from(env_path), true));
        }
    }
    Ok((PathBuf::from(DEFAULT_CONFIG_NAME), false))
}

/// Validates the resolved path against length limits.
fn validate_path(path: &Path) -> Result<(), ConfigError> {
    let text = path.to_string_lossy();
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
    }
    for component in path.components() {
        let value = component.as_os_str().to_string_lossy();
        if value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid("config path component too long".to_string()));
        }
    }
    Ok(())
}

/// Default scanner command.
fn default_scanner_command() -> Vec<String> {
    vec!["npx".to_string(), "@mdn/mdn-http-observatory".to_string()]
}

/// Default scanner timeout.
const fn default_scanner_timeout_ms() -> u64 {
    DEFAULT_SCANNER_TIMEOUT_MS
}

/// Default stdout cap.
const fn default_max_output_bytes() -> usize {
    DEFAULT_MAX_OUTPUT_BYTES
}

/// Default passing score.
const fn default_passing_score() -> i64 {
    DEFAULT_PASSING_SCORE
}

/// Default details page URL.
fn default_details_url() -> String {
    DEFAULT_DETAILS_URL.to_string()
}
