//! Integration test: Verify binary prints correct version

use std::process::Command;

#[test]
fn binary_prints_version() {
    // --version exits before the required file argument is checked
    let output = Command::new(env!("CARGO_BIN_EXE_pagesel"))
        .arg("--version")
        .output()
        .expect("Failed to execute binary");

    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success());
    assert!(
        stdout.contains(env!("CARGO_PKG_VERSION")),
        "Expected output to contain version '{}', but got: {}",
        env!("CARGO_PKG_VERSION"),
        stdout
    );
}

#[test]
fn binary_rejects_missing_file() {
    let output = Command::new(env!("CARGO_BIN_EXE_pagesel"))
        .arg("tests/fixtures/does_not_exist.jsonl")
        .args(["--config", "tests/fixtures/pagesel.toml"])
        .output()
        .expect("Failed to execute binary");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("does_not_exist.jsonl"), "stderr: {stderr}");
}
