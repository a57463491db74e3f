//! End-to-end runs of the superpi binary

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

fn command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_superpi"));
    cmd.args(args)
        .current_dir(dir)
        .env_remove("SUPERPI_OUTPUT_DIR")
        .env_remove("SUPERPI_REPORT")
        .env_remove("RUST_LOG");
    cmd
}

fn superpi(dir: &Path, args: &[&str]) -> Output {
    command(dir, args).output().expect("failed to run superpi")
}

#[test]
fn test_computes_and_saves() {
    let dir = tempfile::tempdir().unwrap();
    let output = superpi(dir.path(), &["20"]);
    assert!(output.status.success(), "{:?}", output);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("computing pi to 20 digits"));
    assert!(stdout.contains("Average performance:"));

    let contents = fs::read_to_string(dir.path().join("pi_20.txt")).unwrap();
    let mut lines = contents.lines();
    assert_eq!(lines.next(), Some("3.14159265358979323846"));
    assert_eq!(lines.next(), Some(""));
    assert!(lines.next().unwrap().starts_with("Computed by SuperPi"));
    assert_eq!(lines.next(), Some("Digits: 20"));
    assert_eq!(lines.next(), Some("Algorithm: Gauss-Legendre"));
    assert!(lines.next().unwrap().starts_with("Date: "));
    assert_eq!(lines.next(), None);
}

#[test]
fn test_zero_digits_fails_without_file() {
    let dir = tempfile::tempdir().unwrap();
    let output = superpi(dir.path(), &["0"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("invalid digit count"));
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn test_too_many_digits_fails() {
    let dir = tempfile::tempdir().unwrap();
    let output = superpi(dir.path(), &["1G"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("exceeds the supported maximum"));
}

#[test]
fn test_unparseable_digits_is_usage_error() {
    let dir = tempfile::tempdir().unwrap();
    let output = superpi(dir.path(), &["many"]);
    assert!(!output.status.success());
}

#[test]
fn test_json_report_without_saving() {
    let dir = tempfile::tempdir().unwrap();
    let output = superpi(dir.path(), &["--report", "json", "--no-save", "1K"]);
    assert!(output.status.success(), "{:?}", output);

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["digits"], 1000);
    assert!(report["iterations"].as_u64().unwrap() > 0);
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn test_config_file_in_working_directory() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("superpi.toml"),
        "default_digits = 15\noutput_dir = \"results\"\nfile_prefix = \"stress\"\n",
    )
    .unwrap();

    let output = superpi(dir.path(), &["-q"]);
    assert!(output.status.success(), "{:?}", output);
    let contents = fs::read_to_string(dir.path().join("results").join("stress_15.txt")).unwrap();
    assert!(contents.starts_with("3.141592653589793\n"));
}

#[test]
fn test_invalid_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.toml");
    fs::write(&path, "growth = [").unwrap();

    let output = superpi(dir.path(), &["--config", path.to_str().unwrap(), "10"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("configuration error"));
}

#[test]
fn test_continuous_mode_with_round_limit() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("superpi.toml"),
        "save = false\n[continuous]\nstart_digits = 10\ngrowth_factor = 10\nmax_digits = 1000\nmax_rounds = 3\n",
    )
    .unwrap();

    let output = superpi(dir.path(), &["--continuous"]);
    assert!(output.status.success(), "{:?}", output);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Round 3: 1000 digits"));
    assert!(stdout.contains("Stopped after 3 round(s), 0 mismatch(es)"));
}

#[test]
fn test_version() {
    let dir = tempfile::tempdir().unwrap();
    let output = superpi(dir.path(), &["--version"]);
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim(),
        format!("superpi {}", env!("CARGO_PKG_VERSION"))
    );
}

#[test]
fn test_completions() {
    let dir = tempfile::tempdir().unwrap();
    let output = superpi(dir.path(), &["--completions", "bash"]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("superpi"));
}

#[test]
fn test_engine_logs_quiet_by_default() {
    let dir = tempfile::tempdir().unwrap();
    let output = superpi(dir.path(), &["--no-save", "50"]);
    assert!(output.status.success(), "{:?}", output);
    assert!(!String::from_utf8_lossy(&output.stderr).contains("iteration complete"));
}

#[test]
fn test_rust_log_enables_engine_debug() {
    let dir = tempfile::tempdir().unwrap();
    let output = command(dir.path(), &["--no-save", "50"])
        .env("RUST_LOG", "superpi_engine=debug")
        .output()
        .expect("failed to run superpi");
    assert!(output.status.success(), "{:?}", output);
    assert!(String::from_utf8_lossy(&output.stderr).contains("iteration complete"));
}

#[test]
fn test_verbose_enables_engine_debug() {
    let dir = tempfile::tempdir().unwrap();
    let output = superpi(dir.path(), &["-v", "--no-save", "50"]);
    assert!(output.status.success(), "{:?}", output);
    assert!(String::from_utf8_lossy(&output.stderr).contains("iteration complete"));
}
