use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

const ANALYSIS: &str = r#"{
    "highlights": [
        {"doc_start": 2, "doc_end": 6, "agent": "x", "severity": "high", "reason": "first"},
        {"doc_start": 4, "doc_end": 8, "agent": "y", "severity": "low", "reason": "second"}
    ]
}"#;

#[allow(deprecated)]
fn manuscript() -> Command {
    let mut cmd = Command::cargo_bin("manuscript").expect("binary");
    cmd.env_remove("MANUSCRIPT_PALETTE").arg("--quiet");
    cmd
}

fn write_inputs(dir: &Path, text: &str, analysis: &str) {
    fs::write(dir.join("text.txt"), text).unwrap();
    fs::write(dir.join("analysis.json"), analysis).unwrap();
}

fn run_segments(dir: &Path, extra: &[&str]) -> Value {
    let output = manuscript()
        .current_dir(dir)
        .args(["segments", "--text", "text.txt", "--analysis", "analysis.json"])
        .args(extra)
        .output()
        .expect("command run");

    assert!(
        output.status.success(),
        "stdout: {}\nstderr: {}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("valid json")
}

#[test]
fn segments_reports_overlay_as_json() {
    let temp = tempdir().unwrap();
    write_inputs(temp.path(), "ABCDEFGHIJ", ANALYSIS);

    let response = run_segments(temp.path(), &[]);
    assert_eq!(response["source"], "highlights");
    assert_eq!(response["stats"]["kept_issues"], 2);
    assert_eq!(response["stats"]["segments"], 5);

    let segments = response["segments"].as_array().expect("segments array");
    let texts: Vec<&str> = segments.iter().map(|s| s["text"].as_str().unwrap()).collect();
    assert_eq!(texts, vec!["AB", "CD", "EF", "GH", "IJ"]);
    assert!(segments[0].get("decoration").is_none());
    assert_eq!(segments[2]["key"], "4-6");
    assert_eq!(segments[2]["decoration"]["agent"], "x");
    let tooltip = segments[2]["decoration"]["tooltip"].as_array().unwrap();
    assert_eq!(tooltip.len(), 2);
    assert_eq!(tooltip[1]["reason"], "second");
}

#[test]
fn text_can_come_from_stdin() {
    let temp = tempdir().unwrap();
    fs::write(temp.path().join("analysis.json"), ANALYSIS).unwrap();

    let output = manuscript()
        .current_dir(temp.path())
        .args(["segments", "--text", "-", "--analysis", "analysis.json"])
        .write_stdin("ABCDEFGHIJ")
        .output()
        .expect("command run");
    assert!(output.status.success());
    let response: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(response["segments"].as_array().unwrap().len(), 5);
}

#[test]
fn utf16_unit_reads_javascript_offsets() {
    let temp = tempdir().unwrap();
    write_inputs(
        temp.path(),
        "🌙 night falls",
        r#"{"highlights": [{"doc_start": 3, "doc_end": 8, "agent": "tone"}]}"#,
    );

    let response = run_segments(temp.path(), &["--unit", "utf16"]);
    let segments = response["segments"].as_array().unwrap();
    assert_eq!(segments[1]["text"], "night");
    assert_eq!(segments[1]["start"], 3);
    assert_eq!(segments[1]["end"], 8);
    assert_eq!(response["stats"]["unit"], "utf16");
}

#[test]
fn decomposed_text_is_composed_unless_disabled() {
    let temp = tempdir().unwrap();
    write_inputs(
        temp.path(),
        "Cafe\u{301} noir",
        r#"{"highlights": [{"doc_start": 5, "doc_end": 9, "agent": "tone"}]}"#,
    );

    let response = run_segments(temp.path(), &[]);
    assert_eq!(response["segments"][1]["text"], "noir");

    let response = run_segments(temp.path(), &["--no-nfc"]);
    assert_eq!(response["segments"][1]["text"], " noi");
}

#[test]
fn palette_file_overrides_colors() {
    let temp = tempdir().unwrap();
    write_inputs(temp.path(), "ABCDEFGHIJ", ANALYSIS);
    fs::write(
        temp.path().join("palette.toml"),
        "[agents]\nx = \"#ff0000\"\n",
    )
    .unwrap();

    let response = run_segments(temp.path(), &["--palette", "palette.toml"]);
    assert_eq!(response["segments"][1]["decoration"]["color"], "rgb(255, 0, 0)");
}

#[test]
fn palette_env_is_used_without_flag() {
    let temp = tempdir().unwrap();
    write_inputs(temp.path(), "ABCDEFGHIJ", ANALYSIS);
    fs::write(
        temp.path().join("palette.json"),
        r#"{"agents": {"y": "rgb(1, 2, 3)"}}"#,
    )
    .unwrap();

    let output = manuscript()
        .current_dir(temp.path())
        .env("MANUSCRIPT_PALETTE", "palette.json")
        .args(["segments", "--text", "text.txt", "--analysis", "analysis.json"])
        .output()
        .expect("command run");
    assert!(output.status.success());
    let response: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(response["segments"][3]["decoration"]["color"], "rgb(1, 2, 3)");
}

#[test]
fn html_escapes_text_and_tooltips() {
    let temp = tempdir().unwrap();
    write_inputs(
        temp.path(),
        "a <b> & c",
        r#"{"highlights": [{"doc_start": 2, "doc_end": 5, "agent": "logic", "reason": "\"tag\" here"}]}"#,
    );

    manuscript()
        .current_dir(temp.path())
        .args(["html", "--text", "text.txt", "--analysis", "analysis.json"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            r#"<div class="manuscript-overlay""#,
        ))
        .stdout(predicate::str::contains(r#"data-agent="logic""#))
        .stdout(predicate::str::contains("&lt;b&gt;</mark>"))
        .stdout(predicate::str::contains("&amp; c</span>"))
        .stdout(predicate::str::contains(r#"title="logic: &quot;tag&quot; here""#));
}

#[test]
fn schema_lists_payload_fields() {
    let output = manuscript().arg("schema").output().expect("command run");
    assert!(output.status.success());
    let schema: Value = serde_json::from_slice(&output.stdout).unwrap();
    let properties = schema["properties"].as_object().expect("properties");
    assert!(properties.contains_key("highlights"));
    assert!(properties.contains_key("split_map"));
}

#[test]
fn invalid_analysis_fails_with_context() {
    let temp = tempdir().unwrap();
    write_inputs(temp.path(), "text", "{not json");

    manuscript()
        .current_dir(temp.path())
        .args(["segments", "--text", "text.txt", "--analysis", "analysis.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid analysis JSON"));
}

#[test]
fn missing_text_file_fails() {
    let temp = tempdir().unwrap();
    fs::write(temp.path().join("analysis.json"), ANALYSIS).unwrap();

    manuscript()
        .current_dir(temp.path())
        .args(["segments", "--text", "missing.txt", "--analysis", "analysis.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read text"));
}
