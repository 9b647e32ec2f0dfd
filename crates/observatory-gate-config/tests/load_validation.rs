//! Config load validation tests for observatory-gate-config.
// crates/observatory-gate-config/tests/load_validation.rs
// =============================================================================
// Module: Config Load Validation Tests
// Description: Validate config loading guards (path, size, encoding, syntax).
// Purpose: Ensure config input handling is strict and fail-closed.
// =============================================================================

use std::io::Write;
use std::path::Path;

use observatory_gate_config::ConfigError;
use observatory_gate_config::ObservatoryGateConfig;
use tempfile::NamedTempFile;

type TestResult = Result<(), String>;

fn assert_invalid(result: Result<ObservatoryGateConfig, ConfigError>, needle: &str) -> TestResult {
    match result {
        Err(error) => {
            let message = error.to_string();
            if message.contains(needle) {
                Ok(())
            } else {
                Err(format!("error {message} did not contain {needle}"))
            }
        }
        Ok(_) => Err("expected invalid config load".to_string()),
    }
}

fn write_config(content: &[u8]) -> Result<NamedTempFile, String> {
    let mut file = NamedTempFile::new().map_err(|err| err.to_string())?;
    file.write_all(content).map_err(|err| err.to_string())?;
    Ok(file)
}

#[test]
fn load_reads_explicit_file() -> TestResult {
    let file = write_config(
        br#"
[scanner]
command = ["observatory-cli", "--format", "json"]
timeout_ms = 60000

[threshold]
default = 70
clamp = { min = 0, max = 145 }

[report]
glyphs = "text"
summary_format = "html"
"#,
    )?;
    let config = ObservatoryGateConfig::load(Some(file.path())).map_err(|err| err.to_string())?;
    if config.scanner.command != ["observatory-cli", "--format", "json"] {
        return Err(format!("unexpected command {}", config.scanner.command.join(" ")));
    }
    if config.scanner.timeout_ms != 60_000 || config.threshold.default != 70 {
        return Err("explicit values not applied".to_string());
    }
    if config.report.summary_format != observatory_gate_core::SummaryFormat::Html {
        return Err("summary format not applied".to_string());
    }
    if config.scanner.max_output_bytes != observatory_gate_config::DEFAULT_MAX_OUTPUT_BYTES {
        return Err("omitted key should keep its default".to_string());
    }
    Ok(())
}

#[test]
fn load_empty_file_yields_defaults() -> TestResult {
    let file = write_config(b"")?;
    let config = ObservatoryGateConfig::load(Some(file.path())).map_err(|err| err.to_string())?;
    if config != ObservatoryGateConfig::default() {
        return Err("empty file should match defaults".to_string());
    }
    Ok(())
}

#[test]
fn load_rejects_missing_explicit_file() -> TestResult {
    let dir = tempfile::tempdir().map_err(|err| err.to_string())?;
    let path = dir.path().join("absent.toml");
    assert_invalid(ObservatoryGateConfig::load(Some(&path)), "config io error")?;
    Ok(())
}

#[test]
fn load_rejects_path_too_long() -> TestResult {
    let long_path = "a".repeat(5_000);
    let path = Path::new(&long_path);
    assert_invalid(ObservatoryGateConfig::load(Some(path)), "config path exceeds max length")?;
    Ok(())
}

#[test]
fn load_rejects_path_component_too_long() -> TestResult {
    let long_component = "a".repeat(300);
    let path = Path::new(&long_component);
    assert_invalid(ObservatoryGateConfig::load(Some(path)), "config path component too long")?;
    Ok(())
}

#[test]
fn load_rejects_oversized_file() -> TestResult {
    let file = write_config(&vec![b'#'; 64 * 1024 + 1])?;
    assert_invalid(
        ObservatoryGateConfig::load(Some(file.path())),
        "config file exceeds size limit",
    )?;
    Ok(())
}

#[test]
fn load_rejects_non_utf8_file() -> TestResult {
    let file = write_config(&[0xFF, 0xFE, 0xFF])?;
    assert_invalid(ObservatoryGateConfig::load(Some(file.path())), "config file must be utf-8")?;
    Ok(())
}

#[test]
fn load_rejects_unknown_keys() -> TestResult {
    let file = write_config(b"[scanner]\nshell = true\n")?;
    assert_invalid(ObservatoryGateConfig::load(Some(file.path())), "config parse error")?;
    let file = write_config(b"[logging]\nlevel = \"debug\"\n")?;
    assert_invalid(ObservatoryGateConfig::load(Some(file.path())), "config parse error")?;
    Ok(())
}

#[test]
fn load_rejects_unknown_glyph_style() -> TestResult {
    let file = write_config(b"[report]\nglyphs = \"ascii-art\"\n")?;
    assert_invalid(ObservatoryGateConfig::load(Some(file.path())), "config parse error")?;
    Ok(())
}
