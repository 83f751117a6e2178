//! # Reporting Unit Tests / 报告单元测试
//!
//! Checks the HTML page and the JSON results produced for a fixed set of runs.
//!
//! 检查针对一组固定运行结果生成的 HTML 页面和 JSON 结果。

use chrono::Local;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;
use tempfile::tempdir;
use test_matrix::core::env::parse_env_string;
use test_matrix::core::models::RunResult;
use test_matrix::reporting::html::render_html_report;
use test_matrix::reporting::json::write_json_report;

fn result(version: &str, seq: usize, success: bool, env: &str) -> RunResult {
    RunResult {
        version: version.to_string(),
        sequence_index: seq,
        success,
        duration: Duration::from_millis(1500),
        started_at: Local::now(),
        log_path: PathBuf::from(format!("local/tests/{version}-{seq}.log")),
        env: parse_env_string(env),
    }
}

fn sample() -> Vec<RunResult> {
    vec![
        result("stable", 0, true, ""),
        result("nightly", 1, false, r#"FEATURES="foo bar""#),
    ]
}

#[test]
fn test_html_lists_every_run() {
    let page = render_html_report(&sample()).into_string();

    assert!(page.starts_with("<!DOCTYPE html>"));
    assert_eq!(page.matches("<tr>").count(), 3, "header plus one row per run");
    assert!(page.contains("status-passed"));
    assert!(page.contains("status-failed"));
    assert!(page.contains("1.50s"));
    assert!(page.contains("local/tests/nightly-1.log"));
    // Quotes in environment strings are escaped.
    assert!(page.contains("FEATURES=&quot;foo bar&quot;"));
}

#[test]
fn test_html_for_no_runs() {
    let page = render_html_report(&[]).into_string();
    assert_eq!(page.matches("<tr>").count(), 1);
}

#[test]
fn test_json_results() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("results.json");

    write_json_report(&sample(), &path).unwrap();

    let parsed: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    let runs = parsed.as_array().unwrap();
    assert_eq!(runs.len(), 2);
    assert_eq!(runs[1]["version"], "nightly");
    assert_eq!(runs[1]["sequence_index"], 1);
    assert_eq!(runs[1]["success"], false);
    assert_eq!(runs[1]["env"]["FEATURES"], "foo bar");
}

#[test]
fn test_json_into_missing_directory_fails() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("missing").join("results.json");
    assert!(write_json_report(&sample(), &path).is_err());
}
