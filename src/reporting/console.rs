//! # Console Reporting Module / 控制台报告模块
//!
//! Progress lines and the final summary, printed to stdout.
//!
//! 打印到标准输出的进度行和最终摘要。

use colored::*;
use std::io::Write;

use crate::core::models::{RunResult, RunSpec, VersionId};
use crate::infra::t;

/// Localised `OK` / `Failed!` label.
pub fn status_str(success: bool) -> String {
    if success {
        t!("status.ok").to_string()
    } else {
        t!("status.failed").to_string()
    }
}

/// Prints one runner message: a bold blue `>` followed by bold green text.
/// 打印一条运行器消息：粗体蓝色的 `>`，后跟粗体绿色文本。
pub fn msg(text: &str) {
    println!("{} {}", ">".blue().bold(), text.green().bold());
    let _ = std::io::stdout().flush();
}

/// Announces which versions will be run, in order.
pub fn print_selected_versions(versions: &[VersionId]) {
    if versions.is_empty() {
        msg(&t!("run.no_versions"));
    } else {
        let versions = versions.join(", ");
        msg(&t!("run.versions_selected", versions = versions));
    }
}

pub fn print_run_started(spec: &RunSpec) {
    let version = &spec.version;
    let seq = spec.sequence_index;
    msg(&t!("run.started", version = version, seq = seq));
}

pub fn print_run_finished(result: &RunResult) {
    let line = format!("... {}", status_str(result.success));
    if result.success {
        msg(&line);
    } else {
        println!("{} {}", ">".blue().bold(), line.red().bold());
    }
}

/// Prints the ordered summary of every attempted run.
///
/// 打印所有已尝试运行的有序摘要。
///
/// # Output Format / 输出格式
/// ```text
/// > Results:
/// > stable #0: OK
/// > stable #1: Failed!
/// > 1 of 2 runs failed.
/// ```
pub fn print_summary(results: &[RunResult]) {
    println!();
    msg(&t!("summary.banner"));

    for result in results {
        let line = format!("{}: {}", result.label(), status_str(result.success));
        if result.success {
            msg(&line);
        } else {
            println!("{} {}", ">".blue().bold(), line.red().bold());
        }
    }

    let failed = results.iter().filter(|r| r.is_failure()).count();
    if failed > 0 {
        let total = results.len();
        println!(
            "{} {}",
            ">".blue().bold(),
            t!("summary.failed_count", failed = failed, total = total)
                .yellow()
                .bold()
        );
    }
}
