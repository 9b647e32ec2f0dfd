// crates/observatory-gate-providers/src/command.rs
// ============================================================================
// Module: Command Scanner
// Description: Runs the scanner CLI as a child process.
// Purpose: Capture scanner stdout under a wall-clock limit and size cap.
// Dependencies: observatory-gate-core
// ============================================================================

//! ## Overview
//! [`CommandScanner`] spawns the configured program with the host appended as
//! the final argument. Stdin is closed; stdout and stderr are drained on
//! helper threads so the child can never block on a full pipe while the
//! caller waits with a deadline.
//! Invariants:
//! - The timeout bounds the whole scan: the child is killed when it expires,
//!   and pipes still held open by descendants after the child exits are
//!   abandoned at the same deadline.
//! - Captured stdout never exceeds `max_output_bytes`; excess is drained and
//!   reported as a scan failure.
//! - A child that ends without an exit code and without stderr yields
//!   [`ScanExecutionError::unknown`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io;
use std::io::Read;
use std::process::Child;
use std::process::Command;
use std::process::ExitStatus;
use std::process::Stdio;
use std::sync::mpsc;
use std::sync::mpsc::Receiver;
use std::sync::mpsc::RecvTimeoutError;
use std::thread;
use std::time::Duration;
use std::time::Instant;

use observatory_gate_core::ScanExecutionError;
use observatory_gate_core::Scanner;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default wall-clock limit for one scan.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);
/// Default cap on captured stdout.
pub const DEFAULT_MAX_OUTPUT_BYTES: usize = 8 * 1024 * 1024;
/// Cap on captured stderr used for error messages.
const MAX_STDERR_BYTES: usize = 64 * 1024;
/// Interval between child status polls.
const POLL_INTERVAL: Duration = Duration::from_millis(20);
/// Read buffer size for pipe draining.
const READ_CHUNK_BYTES: usize = 8 * 1024;

// ============================================================================
// SECTION: Configuration
// ============================================================================

/// Configuration for the command scanner.
///
/// # Invariants
/// - `command` holds the program followed by its leading arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandScannerConfig {
    /// Program and leading arguments.
    pub command: Vec<String>,
    /// Wall-clock limit for one scan.
    pub timeout: Duration,
    /// Maximum captured stdout size in bytes.
    pub max_output_bytes: usize,
}

impl Default for CommandScannerConfig {
    fn default() -> Self {
        Self {
            command: vec!["npx".to_string(), "@mdn/mdn-http-observatory".to_string()],
            timeout: DEFAULT_TIMEOUT,
            max_output_bytes: DEFAULT_MAX_OUTPUT_BYTES,
        }
    }
}

// ============================================================================
// SECTION: Scanner
// ============================================================================

/// Scanner backed by an external command.
#[derive(Debug, Clone)]
pub struct CommandScanner {
    /// Command and limits.
    config: CommandScannerConfig,
}

impl CommandScanner {
    /// Creates a scanner with the given configuration.
    #[must_use]
    pub const fn new(config: CommandScannerConfig) -> Self {
        Self {
            config,
        }
    }
}

impl Scanner for CommandScanner {
    fn scan(&self, host: &str) -> Result<Vec<u8>, ScanExecutionError> {
        let (program, args) = self
            .config
            .command
            .split_first()
            .ok_or_else(|| ScanExecutionError::new("scanner command is empty"))?;
        let command_line = render_command_line(&self.config.command, host);

        let mut child = Command::new(program)
            .args(args)
            .arg(host)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|err| {
                ScanExecutionError::new(format!("failed to launch scanner {program}: {err}"))
            })?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| ScanExecutionError::new("scanner stdout unavailable"))?;
        let stderr = child
            .stderr
            .take()
            .ok_or_else(|| ScanExecutionError::new("scanner stderr unavailable"))?;
        let limit = self.config.max_output_bytes;
        let stdout_reader = spawn_reader(stdout, limit);
        let stderr_reader = spawn_reader(stderr, MAX_STDERR_BYTES);
        let timed_out = || {
            ScanExecutionError::new(format!(
                "scanner timed out after {} ms: {command_line}",
                self.config.timeout.as_millis()
            ))
        };

        // Readers left pending are detached: descendants may still hold the pipes open.
        let deadline = Instant::now() + self.config.timeout;
        let Some(status) = wait_with_deadline(&mut child, deadline)? else {
            return Err(timed_out());
        };
        let Some(stdout) = receive_capture(&stdout_reader, deadline)? else {
            return Err(timed_out());
        };
        let Some(stderr) = receive_capture(&stderr_reader, deadline)? else {
            return Err(timed_out());
        };
        let stderr_text = String::from_utf8_lossy(&stderr.data).trim().to_string();

        if !status.success() {
            if status.code().is_none() && stderr_text.is_empty() {
                return Err(ScanExecutionError::unknown());
            }
            let mut message = format!("Command failed: {command_line}");
            if !stderr_text.is_empty() {
                message.push('\n');
                message.push_str(&stderr_text);
            }
            return Err(ScanExecutionError::new(message));
        }
        if stdout.overflowed {
            return Err(ScanExecutionError::new(format!(
                "scanner output exceeds {limit} bytes"
            )));
        }
        Ok(stdout.data)
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Bytes read from a pipe, truncated at a cap.
struct Captured {
    /// Bytes kept, at most the cap.
    data: Vec<u8>,
    /// True when the stream produced more than the cap.
    overflowed: bool,
}

/// Reads `reader` to end, keeping at most `limit` bytes.
fn drain_capped<R: Read>(mut reader: R, limit: usize) -> io::Result<Captured> {
    let mut data = Vec::new();
    let mut overflowed = false;
    let mut buffer = [0u8; READ_CHUNK_BYTES];
    loop {
        let read = match reader.read(&mut buffer) {
            Ok(0) => break,
            Ok(read) => read,
            Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
            Err(err) => return Err(err),
        };
        if overflowed {
            continue;
        }
        let room = limit.saturating_sub(data.len());
        let chunk = &buffer[..read];
        if chunk.len() > room {
            data.extend_from_slice(&chunk[..room]);
            overflowed = true;
        } else {
            data.extend_from_slice(chunk);
        }
    }
    Ok(Captured {
        data,
        overflowed,
    })
}

/// Drains `reader` on a helper thread and delivers the capture over a channel.
fn spawn_reader<R>(reader: R, limit: usize) -> Receiver<io::Result<Captured>>
where
    R: Read + Send + 'static,
{
    let (sender, receiver) = mpsc::channel();
    thread::spawn(move || {
        let _ = sender.send(drain_capped(reader, limit));
    });
    receiver
}

/// Waits for `child` until `deadline`; kills it and returns `None` on expiry.
fn wait_with_deadline(
    child: &mut Child,
    deadline: Instant,
) -> Result<Option<ExitStatus>, ScanExecutionError> {
    loop {
        match child.try_wait() {
            Ok(Some(status)) => return Ok(Some(status)),
            Ok(None) => {}
            Err(err) => {
                stop_child(child);
                return Err(ScanExecutionError::new(format!("failed to wait for scanner: {err}")));
            }
        }
        let now = Instant::now();
        if now >= deadline {
            stop_child(child);
            return Ok(None);
        }
        thread::sleep(POLL_INTERVAL.min(deadline - now));
    }
}

/// Kills `child` and reaps it.
pub(crate) fn stop_child(child: &mut Child) {
    let _ = child.kill();
    let _ = child.wait();
}

/// Receives a pipe capture, returning `None` when `deadline` passes first.
fn receive_capture(
    receiver: &Receiver<io::Result<Captured>>,
    deadline: Instant,
) -> Result<Option<Captured>, ScanExecutionError> {
    let remaining = deadline.saturating_duration_since(Instant::now());
    match receiver.recv_timeout(remaining) {
        Ok(captured) => captured.map(Some).map_err(|err| {
            ScanExecutionError::new(format!("failed to read scanner output: {err}"))
        }),
        Err(RecvTimeoutError::Timeout) => Ok(None),
        Err(RecvTimeoutError::Disconnected) => {
            Err(ScanExecutionError::new("scanner output reader failed"))
        }
    }
}

/// Renders the command line for messages.
fn render_command_line(command: &[String], host: &str) -> String {
    let mut parts: Vec<&str> = command.iter().map(String::as_str).collect();
    parts.push(host);
    parts.join(" ")
}
