//! CLI tests for the `parse` and `generate` subcommands.

use std::fs;
use std::io::Write;
use std::process::{Command, Stdio};

use assert_cmd::cargo;

fn designer_cmd() -> Command {
    Command::new(cargo::cargo_bin!("label-designer"))
}

fn write_temp(name: &str, content: &str) -> (tempfile::TempDir, String) {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join(name);
    fs::write(&path, content).expect("write temp file");
    (dir, path.to_string_lossy().to_string())
}

const SAMPLE: &str = "^XA^PW200^LL100^FO10,20^A0N,30,30^FDHello^FS^XZ";

#[test]
fn parse_json_emits_document_and_diagnostics() {
    let (_dir, path) = write_temp("label.zpl", SAMPLE);

    let output = designer_cmd()
        .args(["parse", &path, "--output", "json"])
        .output()
        .expect("run parse");
    assert!(
        output.status.success(),
        "parse failed, stderr={}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    let json: serde_json::Value = serde_json::from_str(&stdout).expect("valid parse json");
    assert_eq!(json["document"]["canvas_width"], 200);
    assert_eq!(json["document"]["canvas_height"], 100);
    assert_eq!(json["document"]["elements"][0]["type"], "text");
    assert_eq!(json["document"]["elements"][0]["content"], "Hello");
    assert!(json["diagnostics"].is_array());
}

#[test]
fn parse_reads_stdin_dash() {
    let mut child = designer_cmd()
        .args(["parse", "-", "--output", "json"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn parse");
    child
        .stdin
        .as_mut()
        .expect("stdin handle")
        .write_all(SAMPLE.as_bytes())
        .expect("write stdin");
    let output = child.wait_with_output().expect("wait parse");
    assert!(output.status.success());

    let json: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("valid parse json");
    assert_eq!(json["document"]["elements"][0]["x"], 10);
}

#[test]
fn parse_then_generate_round_trips_markup() {
    let (_dir, path) = write_temp("label.zpl", SAMPLE);

    let parsed = designer_cmd()
        .args(["parse", &path, "--output", "json"])
        .output()
        .expect("run parse");
    assert!(parsed.status.success());
    let json: serde_json::Value = serde_json::from_slice(&parsed.stdout).expect("parse json");

    let doc_path = _dir.path().join("doc.json");
    fs::write(
        &doc_path,
        serde_json::to_string(&json["document"]).expect("document json"),
    )
    .expect("write document");

    let generated = designer_cmd()
        .args([
            "generate",
            &doc_path.to_string_lossy(),
            "--layout",
            "compact",
            "--output",
            "json",
        ])
        .output()
        .expect("run generate");
    assert!(
        generated.status.success(),
        "generate failed, stderr={}",
        String::from_utf8_lossy(&generated.stderr)
    );

    let markup = String::from_utf8_lossy(&generated.stdout);
    assert_eq!(
        markup,
        "^XA^PW200^LL100^FO10,20^A0N,30,30^FDHello^FS^XZ"
    );
}

#[test]
fn generate_rejects_invalid_document_json() {
    let (_dir, path) = write_temp("doc.json", "{ not json");

    let output = designer_cmd()
        .args(["generate", &path, "--output", "json"])
        .output()
        .expect("run generate");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("invalid document JSON"),
        "missing context in stderr: {stderr}"
    );
}

#[test]
fn parse_missing_file_fails_with_context() {
    let output = designer_cmd()
        .args(["parse", "/nonexistent/label.zpl", "--output", "json"])
        .output()
        .expect("run parse");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("failed to read"),
        "missing context in stderr: {stderr}"
    );
}
