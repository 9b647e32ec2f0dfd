// crates/observatory-gate-providers/src/github.rs
// ============================================================================
// Module: GitHub Actions Platform
// Description: CiPlatform adapter for the GitHub Actions runner.
// Purpose: Read action inputs and publish outputs, summaries, and annotations.
// Dependencies: observatory-gate-core, rand
// ============================================================================

//! ## Overview
//! [`GithubActions`] follows the runner conventions:
//! - Inputs come from `INPUT_<NAME>` environment variables (upper-cased,
//!   spaces replaced by `_`), trimmed. Explicit overrides win over the
//!   environment.
//! - Outputs are appended to the `$GITHUB_OUTPUT` file with a random heredoc
//!   delimiter; without that file a `::set-output` command is written.
//! - Summaries are appended to `$GITHUB_STEP_SUMMARY`, or written to stdout.
//! - Failures and warnings are `::error::` / `::warning::` workflow commands.
//!
//! The environment is captured once at construction so tests can supply a
//! synthetic one.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

use observatory_gate_core::CiPlatform;
use observatory_gate_core::PlatformError;
use rand::RngCore;
use rand::rngs::OsRng;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Prefix of input environment variables.
const INPUT_ENV_PREFIX: &str = "INPUT_";
/// Environment variable naming the output file.
pub const OUTPUT_FILE_ENV: &str = "GITHUB_OUTPUT";
/// Environment variable naming the step summary file.
pub const SUMMARY_FILE_ENV: &str = "GITHUB_STEP_SUMMARY";
/// Prefix of generated heredoc delimiters.
const DELIMITER_PREFIX: &str = "ghadelimiter_";

// ============================================================================
// SECTION: Platform
// ============================================================================

/// GitHub Actions runner adapter writing commands to `W`.
#[derive(Debug)]
pub struct GithubActions<W: Write = io::Stdout> {
    /// Captured environment variables.
    env: BTreeMap<String, String>,
    /// Input values that take precedence over the environment.
    overrides: BTreeMap<String, String>,
    /// Command stream (stdout on a real runner).
    stdout: Mutex<W>,
}

impl GithubActions<io::Stdout> {
    /// Creates an adapter over the process environment and stdout.
    #[must_use]
    pub fn from_env() -> Self {
        let env = std::env::vars_os()
            .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?)))
            .filter(|(key, _)| {
                key.starts_with(INPUT_ENV_PREFIX)
                    || key == OUTPUT_FILE_ENV
                    || key == SUMMARY_FILE_ENV
            })
            .collect();
        Self::new(env, io::stdout())
    }
}

impl<W: Write> GithubActions<W> {
    /// Creates an adapter over an explicit environment and command stream.
    pub fn new(env: BTreeMap<String, String>, stdout: W) -> Self {
        Self {
            env,
            overrides: BTreeMap::new(),
            stdout: Mutex::new(stdout),
        }
    }

    /// Returns the adapter with input `name` forced to `value`.
    #[must_use]
    pub fn with_input(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.overrides.insert(name.into(), value.into());
        self
    }

    /// Consumes the adapter and returns the command stream.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError::Io`] when the stream lock was poisoned.
    pub fn into_writer(self) -> Result<W, PlatformError> {
        self.stdout.into_inner().map_err(|_| poisoned())
    }

    /// Returns a non-empty environment value.
    fn env_value(&self, key: &str) -> Option<&str> {
        self.env.get(key).map(String::as_str).filter(|value| !value.is_empty())
    }

    /// Writes one line to the command stream.
    fn write_line(&self, line: &str) -> Result<(), PlatformError> {
        let mut stdout = self.stdout.lock().map_err(|_| poisoned())?;
        writeln!(stdout, "{line}").map_err(io_error)?;
        stdout.flush().map_err(io_error)
    }

    /// Writes a workflow command with escaped data.
    fn issue_command(&self, command: &str, message: &str) -> Result<(), PlatformError> {
        self.write_line(&format!("::{command}::{}", escape_command_data(message)))
    }
}

impl<W: Write> CiPlatform for GithubActions<W> {
    fn input(&self, name: &str, required: bool) -> Result<String, PlatformError> {
        let value = self.overrides.get(name).map_or_else(
            || self.env.get(&input_env_key(name)).cloned().unwrap_or_default(),
            Clone::clone,
        );
        let value = value.trim().to_string();
        if required && value.is_empty() {
            return Err(PlatformError::MissingInput(name.to_string()));
        }
        Ok(value)
    }

    fn set_output(&self, name: &str, value: &str) -> Result<(), PlatformError> {
        if let Some(path) = self.env_value(OUTPUT_FILE_ENV) {
            let entry = heredoc_entry(name, value, &random_delimiter())?;
            return append_file(Path::new(path), &entry);
        }
        self.write_line("")?;
        self.write_line(&format!(
            "::set-output name={}::{}",
            escape_command_property(name),
            escape_command_data(value)
        ))
    }

    fn write_summary(&self, content: &str) -> Result<(), PlatformError> {
        if let Some(path) = self.env_value(SUMMARY_FILE_ENV) {
            return append_file(Path::new(path), content);
        }
        let mut stdout = self.stdout.lock().map_err(|_| poisoned())?;
        stdout.write_all(content.as_bytes()).map_err(io_error)?;
        stdout.flush().map_err(io_error)
    }

    fn set_failed(&self, message: &str) -> Result<(), PlatformError> {
        self.issue_command("error", message)
    }

    fn warning(&self, message: &str) -> Result<(), PlatformError> {
        self.issue_command("warning", message)
    }
}

// ============================================================================
// SECTION: Escaping
// ============================================================================

/// Escapes a workflow command message.
#[must_use]
pub fn escape_command_data(value: &str) -> String {
    value.replace('%', "%25").replace('\r', "%0D").replace('\n', "%0A")
}

/// Escapes a workflow command property value.
#[must_use]
pub fn escape_command_property(value: &str) -> String {
    escape_command_data(value).replace(':', "%3A").replace(',', "%2C")
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Returns the environment key carrying input `name`.
pub(crate) fn input_env_key(name: &str) -> String {
    format!("{INPUT_ENV_PREFIX}{}", name.replace(' ', "_").to_uppercase())
}

/// Generates a heredoc delimiter that is unpredictable to the value's author.
fn random_delimiter() -> String {
    let mut bytes = [0u8; 16];
    OsRng.fill_bytes(&mut bytes);
    let mut delimiter = String::from(DELIMITER_PREFIX);
    for byte in bytes {
        let _ = write!(delimiter, "{byte:02x}");
    }
    delimiter
}

/// Builds a file-command heredoc entry.
///
/// # Errors
///
/// Returns [`PlatformError::Invalid`] when the name or value contains the
/// delimiter.
pub(crate) fn heredoc_entry(
    name: &str,
    value: &str,
    delimiter: &str,
) -> Result<String, PlatformError> {
    if name.contains(delimiter) {
        return Err(PlatformError::Invalid(format!(
            "output name must not contain the delimiter {delimiter}"
        )));
    }
    if value.contains(delimiter) {
        return Err(PlatformError::Invalid(format!(
            "output value must not contain the delimiter {delimiter}"
        )));
    }
    Ok(format!("{name}<<{delimiter}\n{value}\n{delimiter}\n"))
}

/// Appends `content` to the file at `path`, creating it when missing.
fn append_file(path: &Path, content: &str) -> Result<(), PlatformError> {
    let mut file = OpenOptions::new().create(true).append(true).open(path).map_err(|err| {
        PlatformError::Io(format!("failed to open {}: {err}", path.display()))
    })?;
    file.write_all(content.as_bytes()).map_err(io_error)
}

/// Maps an I/O error into a platform error.
fn io_error(err: io::Error) -> PlatformError {
    PlatformError::Io(err.to_string())
}

/// Error for a poisoned command stream lock.
fn poisoned() -> PlatformError {
    PlatformError::Io("command stream mutex poisoned".to_string())
}
