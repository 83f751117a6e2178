//! # Run Command Module / 运行命令模块
//!
//! Drives a whole matrix run: load the configuration, select versions,
//! expand the matrix, execute every run in order and report the results.
//!
//! 驱动整个矩阵运行：加载配置、选择版本、展开矩阵、按顺序执行每次运行并报告结果。

use anyhow::{Context, Result};
use colored::*;
use std::path::PathBuf;

use crate::{
    core::{
        config::load_matrix_config,
        env::EnvSnapshot,
        execution::{RunContext, execute_run},
        models::RunResult,
        planner::expand_matrix,
        selector::select_versions,
    },
    infra::{
        command::{CommandRunner, ShellRunner},
        fs::RunLayout,
        t,
    },
    reporting::{
        console::{print_run_finished, print_run_started, print_selected_versions, print_summary},
        html::generate_html_report,
        json::write_json_report,
    },
};

/// Default toolchain wrapper; the version is appended after it.
pub const DEFAULT_WRAPPER: &str = "rustup run";

/// Options of the run command.
/// 运行命令的选项。
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Path to the CI configuration / CI 配置文件路径
    pub config: PathBuf,
    /// Positional include/exclude arguments / 位置参数（包含/排除）
    pub versions: Vec<String>,
    pub layout: RunLayout,
    pub wrapper: String,
    /// Optional path for an HTML report / HTML 报告的可选路径
    pub html: Option<PathBuf>,
    /// Optional path for a JSON report / JSON 报告的可选路径
    pub json: Option<PathBuf>,
}

impl RunOptions {
    pub fn new(config: impl Into<PathBuf>) -> Self {
        Self {
            config: config.into(),
            versions: Vec::new(),
            layout: RunLayout::default(),
            wrapper: DEFAULT_WRAPPER.to_string(),
            html: None,
            json: None,
        }
    }
}

/// Every run attempted by one invocation, in invocation order.
#[derive(Debug, Default)]
pub struct MatrixOutcome {
    pub results: Vec<RunResult>,
}

impl MatrixOutcome {
    pub fn all_passed(&self) -> bool {
        self.results.iter().all(|r| r.success)
    }

    pub fn failed_count(&self) -> usize {
        self.results.iter().filter(|r| r.is_failure()).count()
    }
}

/// Executes the run command with the shell as process facility.
pub async fn execute(options: RunOptions) -> Result<MatrixOutcome> {
    let environment = EnvSnapshot::capture();
    let runner = ShellRunner::inheriting(&environment);
    execute_with(options, &runner, &environment).await
}

/// Executes the run command with an explicit process facility and environment.
///
/// Errors returned from here abort the matrix: an unreadable configuration,
/// an unrecognised argument (reported before anything is written to disk) or
/// an undefined variable in a script step. A failing step is not an error;
/// it shows up as a failed run in the outcome.
///
/// 使用显式的进程设施和环境执行运行命令。
/// 此处返回的错误会中止矩阵：无法读取的配置、无法识别的参数（在写入任何磁盘内容之前报告），
/// 或脚本步骤中的未定义变量。失败的步骤不是错误，它在结果中表现为一次失败的运行。
pub async fn execute_with<R: CommandRunner>(
    options: RunOptions,
    runner: &R,
    environment: &EnvSnapshot,
) -> Result<MatrixOutcome> {
    let config = load_matrix_config(&options.config)?;
    let versions = select_versions(&options.versions, &config.default_versions)?;
    print_selected_versions(&versions);

    options.layout.ensure_log_dir()?;

    let specs = expand_matrix(&config, &versions);
    let ctx = RunContext {
        steps: &config.script_steps,
        environment,
        layout: &options.layout,
        wrapper: &options.wrapper,
        runner,
    };

    let mut outcome = MatrixOutcome::default();
    for spec in &specs {
        print_run_started(spec);
        let result = execute_run(spec, &ctx)
            .await
            .with_context(|| format!("Run {} aborted", spec.label()))?;
        print_run_finished(&result);
        outcome.results.push(result);
    }

    print_summary(&outcome.results);
    write_reports(&outcome.results, &options);

    Ok(outcome)
}

/// Writes the optional reports. Failures are printed and otherwise ignored.
fn write_reports(results: &[RunResult], options: &RunOptions) {
    if let Some(report_path) = &options.html {
        let path = report_path.display().to_string();
        println!("\n{}", t!("report.html_written", path = path));
        if let Err(e) = generate_html_report(results, report_path) {
            eprintln!("{} {:#}", t!("report.write_failed").red(), e);
        }
    }

    if let Some(report_path) = &options.json {
        let path = report_path.display().to_string();
        println!("{}", t!("report.json_written", path = path));
        if let Err(e) = write_json_report(results, report_path) {
            eprintln!("{} {:#}", t!("report.write_failed").red(), e);
        }
    }
}
