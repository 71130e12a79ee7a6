//! CLI tests for the `explain` subcommand.

use std::process::Command;

use assert_cmd::cargo;
use label_designer_diagnostics::codes;

fn designer_cmd() -> Command {
    Command::new(cargo::cargo_bin!("label-designer"))
}

#[test]
fn explain_known_code_json() {
    let output = designer_cmd()
        .args(["explain", codes::PARSER_STRAY_CONTENT, "--output", "json"])
        .output()
        .expect("run explain");
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).expect("explain json");
    assert_eq!(json["id"], codes::PARSER_STRAY_CONTENT);
    assert!(
        json["explanation"].is_string(),
        "expected an explanation string: {json}"
    );
}

#[test]
fn explain_unknown_code_reports_null_explanation() {
    let output = designer_cmd()
        .args(["explain", "LBL9999", "--output", "json"])
        .output()
        .expect("run explain");
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).expect("explain json");
    assert!(json["explanation"].is_null());
}

#[test]
fn explain_pretty_prints_to_stdout() {
    let output = designer_cmd()
        .args(["explain", codes::PARSER_UNKNOWN_COMMAND, "--output", "pretty"])
        .output()
        .expect("run explain");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains(codes::PARSER_UNKNOWN_COMMAND),
        "explanation must name the code: {stdout}"
    );
}
