// crates/observatory-gate-cli/src/main.rs
// ============================================================================
// Module: Observatory Gate CLI Entry Point
// Description: Command dispatcher for the Observatory Gate CI step.
// Purpose: Run the scan gate on a CI runner and validate its configuration.
// Dependencies: clap, observatory-gate-{config, core, providers}, thiserror.
// ============================================================================

//! ## Overview
//! Without a subcommand the binary runs one gate invocation: it loads the
//! optional configuration, reads the `host` and `passing-score` inputs from
//! the GitHub Actions environment (or `--host` / `--passing-score`), runs the
//! scanner, publishes the report, and exits non-zero when the scan failed or
//! scored below the passing score. CLI-local messages go through the i18n
//! catalog.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::ArgAction;
use clap::Args;
use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use observatory_gate_cli::i18n::Locale;
use observatory_gate_cli::i18n::set_locale;
use observatory_gate_cli::t;
use observatory_gate_config::ObservatoryGateConfig;
use observatory_gate_config::ScannerConfig;
use observatory_gate_core::CiPlatform;
use observatory_gate_core::FAILURE_PREFIX;
use observatory_gate_core::HOST_INPUT;
use observatory_gate_core::PASSING_SCORE_INPUT;
use observatory_gate_core::RunOutcome;
use observatory_gate_core::run as run_gate;
use observatory_gate_providers::CommandScanner;
use observatory_gate_providers::CommandScannerConfig;
use observatory_gate_providers::GithubActions;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Environment variable for CLI locale selection.
const LANG_ENV: &str = "OBSERVATORY_GATE_LANG";

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "observatory-gate", disable_help_subcommand = true, disable_version_flag = true)]
struct Cli {
    /// Print version information and exit.
    #[arg(long = "version", action = ArgAction::SetTrue, global = true)]
    show_version: bool,
    /// Preferred output language (overrides `OBSERVATORY_GATE_LANG`).
    #[arg(long, value_enum, value_name = "LANG", global = true)]
    lang: Option<LangArg>,
    /// Gate run arguments used when no subcommand is given.
    #[command(flatten)]
    gate: GateArgs,
    /// Selected subcommand to execute.
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Arguments for a gate run.
#[derive(Args, Debug)]
struct GateArgs {
    /// Optional config file path (defaults to observatory-gate.toml or env override).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Host to scan (overrides the `host` action input).
    #[arg(long, value_name = "HOST")]
    host: Option<String>,
    /// Minimum passing score (overrides the `passing-score` action input).
    #[arg(long = "passing-score", value_name = "SCORE")]
    passing_score: Option<String>,
}

/// Supported CLI subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Configuration utilities.
    Config {
        /// Selected config subcommand.
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

/// Configuration subcommands.
#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Validate an Observatory Gate configuration file.
    Validate(ConfigValidateCommand),
}

/// Arguments for `config validate`.
#[derive(Args, Debug)]
struct ConfigValidateCommand {
    /// Optional config file path (defaults to observatory-gate.toml or env override).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

/// Supported CLI language selections.
#[derive(ValueEnum, Copy, Clone, Debug)]
enum LangArg {
    /// English.
    En,
    /// Catalan.
    Ca,
}

impl From<LangArg> for Locale {
    fn from(value: LangArg) -> Self {
        match value {
            LangArg::En => Self::En,
            LangArg::Ca => Self::Ca,
        }
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error wrapper for localized error messages.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Human-readable error message.
    message: String,
}

impl CliError {
    /// Constructs a new [`CliError`] from a localized message.
    const fn new(message: String) -> Self {
        Self {
            message,
        }
    }
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Executes the CLI command dispatcher.
fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();
    let env_lang = std::env::var(LANG_ENV).ok();
    let locale = resolve_locale(cli.lang, env_lang.as_deref())?;
    set_locale(locale);
    if locale != Locale::En {
        write_stderr_line(&t!("i18n.disclaimer.machine_translated"))
            .map_err(|err| CliError::new(output_error("stderr", &err)))?;
    }

    if cli.show_version {
        let version = env!("CARGO_PKG_VERSION");
        write_stdout_line(&t!("main.version", version = version))
            .map_err(|err| CliError::new(output_error("stdout", &err)))?;
        return Ok(ExitCode::SUCCESS);
    }

    match cli.command {
        None => command_gate(cli.gate),
        Some(Commands::Config {
            command,
        }) => command_config(command),
    }
}

// ============================================================================
// SECTION: Gate Command
// ============================================================================

/// Runs the gate once against the GitHub Actions environment.
///
/// Config failures are published through the platform like any other failed
/// run before the CLI error is returned.
fn command_gate(args: GateArgs) -> CliResult<ExitCode> {
    let mut platform = GithubActions::from_env();
    if let Some(host) = args.host {
        platform = platform.with_input(HOST_INPUT, host);
    }
    if let Some(score) = args.passing_score {
        platform = platform.with_input(PASSING_SCORE_INPUT, score);
    }
    let config = match ObservatoryGateConfig::load(args.config.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            let _ = platform.set_failed(&format!("{FAILURE_PREFIX}{err}"));
            return Err(CliError::new(t!("config.load_failed", error = err)));
        }
    };

    let scanner = CommandScanner::new(scanner_config(&config.scanner));

    let outcome = run_gate(&platform, &scanner, &config.run_options());
    let line = match &outcome {
        RunOutcome::Passed {
            score,
            threshold,
        } => t!("gate.result.passed", score = score, threshold = threshold),
        RunOutcome::BelowThreshold {
            score,
            threshold,
        } => t!("gate.result.below_threshold", score = score, threshold = threshold),
        RunOutcome::Errored {
            message,
        } => t!("gate.result.errored", message = message),
    };
    write_stderr_line(&line).map_err(|err| CliError::new(output_error("stderr", &err)))?;

    if outcome.is_success() { Ok(ExitCode::SUCCESS) } else { Ok(ExitCode::FAILURE) }
}

/// Builds the subprocess scanner settings from configuration.
fn scanner_config(config: &ScannerConfig) -> CommandScannerConfig {
    CommandScannerConfig {
        command: config.command.clone(),
        timeout: Duration::from_millis(config.timeout_ms),
        max_output_bytes: config.max_output_bytes,
    }
}

// ============================================================================
// SECTION: Config Commands
// ============================================================================

/// Dispatches config subcommands.
fn command_config(command: ConfigCommand) -> CliResult<ExitCode> {
    match command {
        ConfigCommand::Validate(command) => command_config_validate(&command),
    }
}

/// Executes the config validation command.
fn command_config_validate(command: &ConfigValidateCommand) -> CliResult<ExitCode> {
    let _config = ObservatoryGateConfig::load(command.config.as_deref())
        .map_err(|err| CliError::new(t!("config.load_failed", error = err)))?;
    write_stdout_line(&t!("config.validate.ok"))
        .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Locale
// ============================================================================

/// Resolves the CLI locale from flags or environment.
fn resolve_locale(lang: Option<LangArg>, env_lang: Option<&str>) -> CliResult<Locale> {
    if let Some(lang) = lang {
        return Ok(lang.into());
    }
    if let Some(value) = env_lang.filter(|value| !value.trim().is_empty()) {
        return Locale::parse(value).ok_or_else(|| {
            CliError::new(t!("i18n.lang.invalid_env", env = LANG_ENV, value = value))
        });
    }
    Ok(Locale::En)
}

// ============================================================================
// SECTION: Output Helpers
// ============================================================================

/// Writes a single line to stdout.
fn write_stdout_line(message: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}")
}

/// Writes a single line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Formats a localized output error message.
fn output_error(stream: &str, error: &std::io::Error) -> String {
    let stream_label = match stream {
        "stdout" => t!("output.stream.stdout"),
        "stderr" => t!("output.stream.stderr"),
        _ => t!("output.stream.unknown"),
    };
    t!("output.write_failed", stream = stream_label, error = error)
}

/// Emits an error message to stderr and returns a failure exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::FAILURE
}
