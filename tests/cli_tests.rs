//! Integration tests for the CLI

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

fn manifest(content: &str) -> NamedTempFile {
    let mut f = NamedTempFile::new().unwrap();
    f.write_all(content.as_bytes()).unwrap();
    f.flush().unwrap();
    f
}

#[test]
fn test_cli_help() {
    let mut cmd = Command::cargo_bin("depfence").unwrap();
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("maintainer abandonment risk"));
}

#[test]
fn test_cli_missing_file_exits_2() {
    let mut cmd = Command::cargo_bin("depfence").unwrap();
    cmd.arg("/nonexistent/requirements.txt");

    cmd.assert()
        .code(2)
        .stderr(predicate::str::contains("file not found"));
}

#[test]
fn test_cli_malformed_json_manifest_fails() {
    let f = manifest("{not valid json");
    let mut cmd = Command::cargo_bin("depfence").unwrap();
    cmd.arg(f.path());

    cmd.assert()
        .code(1)
        .stderr(predicate::str::contains("scan failed"));
}

#[test]
fn test_cli_empty_manifest_succeeds() {
    // Comments and flag lines only: nothing to fetch, table renders empty
    let f = manifest("# just a comment\n-e git+https://example.com/foo\n\n");
    let mut cmd = Command::cargo_bin("depfence").unwrap();
    cmd.arg(f.path()).arg("--no-color");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Package"))
        .stdout(predicate::str::contains("Verdict"));
}

#[test]
fn test_cli_json_output_contract_on_empty_scan() {
    let f = manifest("# nothing declared\n");
    let mut cmd = Command::cargo_bin("depfence").unwrap();
    cmd.arg(f.path()).arg("-o").arg("json");

    let output = cmd.assert().success().get_output().stdout.clone();
    let v: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(v["schema_version"], "1.0");
    assert_eq!(v["truncated"], false);
    assert!(v["packages"].as_array().unwrap().is_empty());
}

#[test]
fn test_cli_legacy_json_flag() {
    let f = manifest("# nothing declared\n");
    let mut cmd = Command::cargo_bin("depfence").unwrap();
    cmd.arg(f.path()).arg("--json");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\"schema_version\": \"1.0\""));
}

#[test]
fn test_cli_sarif_output_on_empty_scan() {
    let f = manifest("# nothing declared\n");
    let mut cmd = Command::cargo_bin("depfence").unwrap();
    cmd.arg(f.path()).arg("-o").arg("sarif");

    let output = cmd.assert().success().get_output().stdout.clone();
    let v: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(v["version"], "2.1.0");
    assert_eq!(v["runs"][0]["tool"]["driver"]["name"], "DepFence");
}

#[test]
fn test_cli_gates_pass_on_empty_scan() {
    let f = manifest("# nothing declared\n");
    let mut cmd = Command::cargo_bin("depfence").unwrap();
    cmd.arg(f.path())
        .arg("--fail-over")
        .arg("50")
        .arg("--threshold")
        .arg("0.5");

    cmd.assert().success();
}

#[test]
fn test_cli_bad_config_file_fails() {
    let f = manifest("# nothing declared\n");
    let cfg = manifest("this is not [valid toml");
    let mut cmd = Command::cargo_bin("depfence").unwrap();
    cmd.arg(f.path()).arg("-c").arg(cfg.path());

    cmd.assert()
        .code(1)
        .stderr(predicate::str::contains("failed to load config"));
}

#[test]
#[ignore] // Requires network access to the live registry
fn test_cli_scan_real_package() {
    let f = manifest("requests\n");
    let mut cmd = Command::cargo_bin("depfence").unwrap();
    cmd.arg(f.path()).arg("--no-color");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("requests"));
}
