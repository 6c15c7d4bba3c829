#![cfg(feature = "cli")]

use anyhow::Result;
use std::process::{Command, Output};
use tempfile::TempDir;

fn annotator(work_dir: &TempDir) -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_color-annotator"));
    // 暫存目錄內沒有 .env
    command.current_dir(work_dir.path()).env_remove("RUST_LOG");
    command
}

fn text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

#[test]
fn test_no_arguments_prints_usage_and_exits_one() -> Result<()> {
    let work_dir = TempDir::new()?;

    let output: Output = annotator(&work_dir).output()?;

    assert_eq!(output.status.code(), Some(1));
    assert!(text(&output.stdout).contains("Usage: color-annotator <input.csv>"));
    assert_eq!(std::fs::read_dir(work_dir.path())?.count(), 0);

    Ok(())
}

#[test]
fn test_missing_api_key_is_reported_before_input_file() -> Result<()> {
    let work_dir = TempDir::new()?;

    let output = annotator(&work_dir)
        .env_remove("OPENAI_API_KEY")
        .arg("absent.csv")
        .arg("--base-dir")
        .arg(work_dir.path())
        .output()?;

    let stderr = text(&output.stderr);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr.contains("OPENAI_API_KEY"));
    assert!(!stderr.contains("Input file not found"));
    assert_eq!(std::fs::read_dir(work_dir.path())?.count(), 0);

    Ok(())
}

#[test]
fn test_missing_input_file_exits_one_without_output() -> Result<()> {
    let work_dir = TempDir::new()?;
    let base_dir = work_dir.path().join("absent-dir");

    let output = annotator(&work_dir)
        .env("OPENAI_API_KEY", "sk-test")
        .arg("products.csv")
        .arg("--base-dir")
        .arg(&base_dir)
        .args(["--delay-ms", "0", "--api-base", "http://127.0.0.1:9"])
        .output()?;

    assert_eq!(output.status.code(), Some(1));
    assert!(text(&output.stderr).contains("Input file not found"));
    assert!(!base_dir.exists());
    assert_eq!(std::fs::read_dir(work_dir.path())?.count(), 0);

    Ok(())
}
