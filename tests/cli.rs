//! CLI behavior tests: exit codes, output formats, init.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const FIXTURES: &str = "test-content/blog";
const GOOD_POST: &str = "static-site-generator.post.json";
const WEAK_PAGE: &str = "weak.html";
const MARKDOWN_POST: &str = "markdown-front-matter.md";

fn pagegrade_cmd() -> Command {
    Command::new(env!("CARGO_BIN_EXE_pagegrade"))
}

/// Copy the fixtures into a scratch dir so runs never write cache or
/// history files into the repository
fn fixture_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    for name in [GOOD_POST, WEAK_PAGE, MARKDOWN_POST] {
        fs::copy(Path::new(FIXTURES).join(name), dir.path().join(name)).unwrap();
    }
    dir
}

fn fixture(dir: &TempDir, name: &str) -> PathBuf {
    dir.path().join(name)
}

fn json_of(output: &std::process::Output) -> serde_json::Value {
    let s = String::from_utf8_lossy(&output.stdout);
    serde_json::from_str(s.trim()).expect("valid JSON")
}

#[test]
fn no_args_returns_error_not_panic() {
    pagegrade_cmd()
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("path"));
}

#[test]
fn good_post_scores_100() {
    let dir = fixture_dir();
    let output = pagegrade_cmd()
        .arg(fixture(&dir, GOOD_POST))
        .arg("--json")
        .output()
        .unwrap();
    assert!(output.status.success());
    let parsed = json_of(&output);
    assert_eq!(parsed["score"], 100);
    assert_eq!(parsed["grade"], "A");
    assert!(parsed["issues"].as_array().unwrap().is_empty());
    assert_eq!(parsed["slug"], "choose-a-static-site-generator");
}

#[test]
fn weak_page_scores_38() {
    let dir = fixture_dir();
    let output = pagegrade_cmd()
        .arg(fixture(&dir, WEAK_PAGE))
        .arg("--json")
        .output()
        .unwrap();
    assert!(output.status.success(), "no threshold means exit 0");
    let parsed = json_of(&output);
    assert_eq!(parsed["score"], 38);
    assert_eq!(parsed["grade"], "F");
    assert_eq!(parsed["slug"], "weak");
    assert_eq!(parsed["details"]["headings"]["h1Count"], 2);
    assert_eq!(parsed["details"]["images"]["withoutAlt"], 2);
    assert_eq!(
        parsed["issues"].as_array().unwrap().len(),
        parsed["recommendations"].as_array().unwrap().len()
    );
}

#[test]
fn below_threshold_exit_1() {
    let dir = fixture_dir();
    pagegrade_cmd()
        .arg(fixture(&dir, WEAK_PAGE))
        .arg("--threshold")
        .arg("70")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("below threshold 70"));
}

#[test]
fn threshold_at_exact_score_passes() {
    let dir = fixture_dir();
    pagegrade_cmd()
        .arg(fixture(&dir, WEAK_PAGE))
        .arg("--threshold")
        .arg("38")
        .assert()
        .success();
    pagegrade_cmd()
        .arg(fixture(&dir, WEAK_PAGE))
        .arg("--threshold")
        .arg("39")
        .assert()
        .code(1);
}

#[test]
fn directory_fails_when_any_document_is_below() {
    let dir = fixture_dir();
    let output = pagegrade_cmd()
        .arg(dir.path())
        .arg("--json")
        .arg("--threshold")
        .arg("70")
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    let parsed = json_of(&output);
    assert_eq!(parsed["results"].as_array().unwrap().len(), 3);
    assert_eq!(parsed["summary"]["filesAnalyzed"], 3);
    assert_eq!(parsed["summary"]["belowThreshold"], 1);
}

#[test]
fn keyword_flag_overrides_document() {
    let dir = fixture_dir();
    let output = pagegrade_cmd()
        .arg(fixture(&dir, GOOD_POST))
        .arg("--json")
        .arg("--keyword")
        .arg("kubernetes")
        .output()
        .unwrap();
    let parsed = json_of(&output);
    assert_eq!(parsed["primaryKeyword"], "kubernetes");
    assert_eq!(parsed["details"]["keyword"]["status"], "warning");
    assert_eq!(parsed["score"], 92);
}

#[test]
fn config_threshold_applies_and_cli_wins() {
    let dir = fixture_dir();
    fs::write(
        dir.path().join(".pagegraderc.json"),
        r#"{ "threshold": 30 }"#,
    )
    .unwrap();

    pagegrade_cmd()
        .arg(fixture(&dir, WEAK_PAGE))
        .arg("--quiet")
        .assert()
        .success();
    pagegrade_cmd()
        .arg(fixture(&dir, WEAK_PAGE))
        .arg("--quiet")
        .arg("--threshold")
        .arg("50")
        .assert()
        .code(1);
}

#[test]
fn ignore_patterns_skip_documents() {
    let dir = fixture_dir();
    fs::write(
        dir.path().join(".pagegraderc.json"),
        r#"{ "ignore": ["**/*.html"] }"#,
    )
    .unwrap();
    let output = pagegrade_cmd()
        .arg(dir.path())
        .arg("--json")
        .arg("--no-cache")
        .output()
        .unwrap();
    let parsed = json_of(&output);
    let results = parsed["results"].as_array().unwrap();
    assert_eq!(results.len(), 2);
    assert!(results
        .iter()
        .all(|r| !r["filePath"].as_str().unwrap().ends_with(".html")));
}

#[test]
fn sarif_output_valid() {
    let dir = fixture_dir();
    let output = pagegrade_cmd()
        .arg(fixture(&dir, WEAK_PAGE))
        .arg("--sarif")
        .output()
        .unwrap();
    assert!(output.status.success());
    let parsed = json_of(&output);
    assert_eq!(parsed["version"], "2.1.0");
    let results = parsed["runs"][0]["results"].as_array().unwrap();
    assert_eq!(results.len(), 8);
    assert_eq!(results[0]["ruleId"], "title-length");
    assert_eq!(results[0]["level"], "error");
}

#[test]
fn html_report_written() {
    let dir = fixture_dir();
    let report = dir.path().join("report.html");
    pagegrade_cmd()
        .arg(dir.path())
        .arg("--html")
        .arg(&report)
        .assert()
        .success()
        .stderr(predicate::str::contains("HTML report written"));
    let html = fs::read_to_string(&report).unwrap();
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("weak.html"));
}

#[test]
fn stdin_html() {
    pagegrade_cmd()
        .arg("--stdin")
        .arg("--json")
        .write_stdin("<html><head><title>Short</title></head><body><h1>Hi</h1></body></html>")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"filePath\": \"stdin.html\""))
        .stdout(predicate::str::contains("\"title\": \"Short\""));
}

#[test]
fn stdin_post_json_detected() {
    let post = fs::read_to_string(Path::new(FIXTURES).join(GOOD_POST)).unwrap();
    let output = pagegrade_cmd()
        .arg("--stdin")
        .arg("--json")
        .write_stdin(post)
        .output()
        .unwrap();
    assert!(output.status.success());
    let parsed = json_of(&output);
    assert_eq!(parsed["filePath"], "stdin.post.json");
    assert_eq!(parsed["score"], 100);
}

#[test]
fn quiet_prints_one_line_per_document() {
    let dir = fixture_dir();
    let output = pagegrade_cmd()
        .arg(dir.path())
        .arg("--quiet")
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.lines().count(), 3);
    assert!(stdout.contains("weak.html: 38 (F)"));
}

#[test]
fn console_output_lists_issues() {
    let dir = fixture_dir();
    pagegrade_cmd()
        .arg(fixture(&dir, WEAK_PAGE))
        .assert()
        .success()
        .stdout(predicate::str::contains("Issues Found"))
        .stdout(predicate::str::contains("No external links found"));
}

#[test]
fn history_records_runs() {
    let dir = fixture_dir();
    for _ in 0..2 {
        pagegrade_cmd()
            .arg(fixture(&dir, WEAK_PAGE))
            .arg("--quiet")
            .assert()
            .success();
    }
    let history = fs::read_to_string(dir.path().join(".pagegrade-history.json")).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&history).unwrap();
    assert_eq!(parsed["runs"].as_array().unwrap().len(), 2);
}

#[test]
fn path_not_found_exit_2() {
    pagegrade_cmd()
        .arg("nonexistent/post.html")
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("nonexistent"));
}

#[test]
fn empty_directory_exit_2() {
    let dir = TempDir::new().unwrap();
    pagegrade_cmd()
        .arg(dir.path())
        .assert()
        .code(2)
        .stderr(predicate::str::contains("No documents found"));
}

#[test]
fn init_creates_config() {
    let dir = TempDir::new().unwrap();
    pagegrade_cmd()
        .arg("init")
        .arg("--dir")
        .arg(dir.path())
        .arg("--threshold")
        .arg("85")
        .assert()
        .success();

    let content = fs::read_to_string(dir.path().join(".pagegraderc.json")).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(parsed["threshold"], 85);
    assert!(parsed["ignore"].as_array().is_some());
}

#[test]
fn init_refuses_to_overwrite_without_force() {
    let dir = TempDir::new().unwrap();
    let init = || {
        let mut cmd = pagegrade_cmd();
        cmd.arg("init").arg("--dir").arg(dir.path());
        cmd
    };
    init().assert().success();
    init()
        .assert()
        .code(2)
        .stderr(predicate::str::contains("already exists"));
    init().arg("--force").assert().success();
}
