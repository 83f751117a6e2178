//! # HTML Reporting Module / HTML 报告模块
//!
//! Renders the results of a matrix run as a single self-contained HTML page:
//! summary counts followed by one table row per run, in invocation order.
//!
//! 将矩阵运行的结果渲染为一个独立的 HTML 页面：
//! 先是汇总计数，然后按调用顺序每次运行一行表格。

use anyhow::{Context, Result};
use chrono::Local;
use maud::{DOCTYPE, Markup, PreEscaped, html};
use std::fs;
use std::path::Path;

use crate::core::env::to_env_string;
use crate::core::models::RunResult;
use crate::infra::t;
use crate::reporting::console::status_str;

/// Embedded CSS styles for HTML reports / HTML 报告的嵌入式 CSS 样式
const HTML_STYLE: &str = r#"
body { font-family: -apple-system, "Segoe UI", Helvetica, Arial, sans-serif; margin: 2em; color: #24292e; }
h1 { font-size: 1.6em; }
.generated { color: #6a737d; }
.summary-container { display: flex; gap: 2em; margin: 1.5em 0; }
.summary-item { display: flex; flex-direction: column; align-items: center; }
.summary-item .count { font-size: 2em; font-weight: bold; }
.passed-text { color: #22863a; }
.failed-text { color: #cb2431; }
table { border-collapse: collapse; width: 100%; }
th, td { text-align: left; padding: 0.4em 0.8em; border-bottom: 1px solid #e1e4e8; }
.status-passed { color: #22863a; font-weight: bold; }
.status-failed { color: #cb2431; font-weight: bold; }
.duration-cell { text-align: right; }
code { font-size: 0.9em; }
"#;

/// Builds the report page. Split from [`generate_html_report`] so the markup
/// can be checked without touching the file system.
pub fn render_html_report(results: &[RunResult]) -> Markup {
    let total = results.len();
    let passed = results.iter().filter(|r| r.success).count();
    let failed = total - passed;
    let title = t!("html_report.title").to_string();
    let generated_at = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    let generated = t!("html_report.generated_at", time = generated_at).to_string();

    html! {
        (DOCTYPE)
        html {
            head {
                meta charset="utf-8";
                title { (title) }
                style { (PreEscaped(HTML_STYLE)) }
            }
            body {
                h1 { (title) }
                p.generated { (generated) }
                div.summary-container {
                    div.summary-item {
                        span.count { (total) }
                        span.label { (t!("html_report.summary.total").to_string()) }
                    }
                    div.summary-item {
                        span.count.passed-text { (passed) }
                        span.label { (t!("html_report.summary.passed").to_string()) }
                    }
                    div.summary-item {
                        span.count.failed-text { (failed) }
                        span.label { (t!("html_report.summary.failed").to_string()) }
                    }
                }
                table {
                    thead {
                        tr {
                            th { (t!("html_report.table.version").to_string()) }
                            th { "#" }
                            th { (t!("html_report.table.status").to_string()) }
                            th.duration-cell { (t!("html_report.table.duration").to_string()) }
                            th { (t!("html_report.table.env").to_string()) }
                            th { (t!("html_report.table.log").to_string()) }
                        }
                    }
                    tbody {
                        @for result in results {
                            tr {
                                td { (result.version) }
                                td { (result.sequence_index) }
                                td class=(if result.success { "status-passed" } else { "status-failed" }) {
                                    (status_str(result.success))
                                }
                                td.duration-cell { (format!("{:.2}s", result.duration.as_secs_f64())) }
                                td { code { (to_env_string(&result.env)) } }
                                td { code { (result.log_path.display().to_string()) } }
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Writes the HTML report for `results` to `output_path`.
///
/// 将 `results` 的 HTML 报告写入 `output_path`。
///
/// # Errors / 错误
/// Fails if the file cannot be written.
/// 如果无法写入文件则失败。
pub fn generate_html_report(results: &[RunResult], output_path: &Path) -> Result<()> {
    let page = render_html_report(results);
    fs::write(output_path, page.into_string())
        .with_context(|| format!("Failed to write HTML report: {}", output_path.display()))
}
