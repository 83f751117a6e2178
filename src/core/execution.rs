//! # Run Execution Module / 运行执行模块
//!
//! Executes one [`RunSpec`]: opens its log, builds its effective environment,
//! substitutes variables into each script step and runs the steps in order,
//! stopping at the first failure.
//!
//! 执行一个 [`RunSpec`]：打开其日志，构建其有效环境，将变量代入每个脚本步骤，
//! 并按顺序运行这些步骤，在第一个失败处停止。

use anyhow::Result;
use chrono::Local;
use std::time::Instant;
use tracing::debug;

use crate::{
    core::{
        env::{EnvSnapshot, EnvironmentMap},
        models::{RunResult, RunSpec},
        substitute::substitute_vars,
    },
    infra::{
        command::CommandRunner,
        fs::{BUILD_DIR_VAR, FAILURE_MARKER, RunLayout, RunLog},
    },
};

/// Everything shared by all runs of a matrix.
/// 矩阵中所有运行共享的内容。
pub struct RunContext<'a, R> {
    /// Script steps, in order / 按顺序排列的脚本步骤
    pub steps: &'a [String],
    /// Environment of the invoking process, captured once / 调用进程的环境，仅捕获一次
    pub environment: &'a EnvSnapshot,
    pub layout: &'a RunLayout,
    /// Toolchain wrapper placed before the version, e.g. `rustup run`.
    /// 放在版本号之前的工具链包装命令，例如 `rustup run`。
    pub wrapper: &'a str,
    pub runner: &'a R,
}

/// The environment a run's steps see: the inherited environment, then the
/// build directory variable, then the run's own variables, later layers winning.
pub fn effective_environment(
    inherited: &EnvSnapshot,
    build_dir: &str,
    run_env: &EnvironmentMap,
) -> EnvironmentMap {
    let mut env = inherited.vars().clone();
    env.insert(BUILD_DIR_VAR.to_string(), build_dir.to_string());
    env.extend(run_env.iter().map(|(k, v)| (k.clone(), v.clone())));
    env
}

/// The literal command line for a step: `<wrapper> <version> <step>`.
pub fn command_line(wrapper: &str, version: &str, step: &str) -> String {
    let wrapper = wrapper.trim();
    if wrapper.is_empty() {
        format!("{version} {step}")
    } else {
        format!("{wrapper} {version} {step}")
    }
}

/// Executes a single run and reports whether every step succeeded.
///
/// A step that fails, or cannot be spawned, ends the run: the remaining steps
/// are skipped and the result is a failure. An undefined variable in a step
/// is returned as an error, which aborts the whole matrix.
///
/// 执行单次运行并报告是否所有步骤都成功。
/// 失败或无法派生的步骤会结束本次运行：剩余步骤被跳过，结果为失败。
/// 步骤中的未定义变量将作为错误返回，从而中止整个矩阵。
pub async fn execute_run<R: CommandRunner>(
    spec: &RunSpec,
    ctx: &RunContext<'_, R>,
) -> Result<RunResult> {
    let started_at = Local::now();
    let start_time = Instant::now();
    let paths = ctx.layout.paths_for(&spec.version, spec.sequence_index);

    debug!(run = %spec.label(), log = %paths.log_path.display(), "starting run");

    let mut log = RunLog::create(&paths.log_path)?;
    log.line(&format!("# {}", spec.label()))?;
    for (name, value) in &spec.env {
        log.line(&format!("# {name}={value:?}"))?;
    }

    let env = effective_environment(
        ctx.environment,
        &paths.build_dir.to_string_lossy(),
        &spec.env,
    );

    let mut success = true;
    for step in ctx.steps {
        let step = substitute_vars(step, &env)?;
        let line = command_line(ctx.wrapper, &spec.version, &step);
        log.line(&format!("> {line}"))?;

        let status = ctx.runner.run(&line, &env, log.file()).await;
        let passed = match status {
            Ok(passed) => passed,
            Err(e) => {
                log.line(&format!("Command failed to start: {e}"))?;
                false
            }
        };

        if !passed {
            log.line(FAILURE_MARKER)?;
            success = false;
            break;
        }
    }
    drop(log);

    Ok(RunResult {
        version: spec.version.clone(),
        sequence_index: spec.sequence_index,
        success,
        duration: start_time.elapsed(),
        started_at,
        log_path: paths.log_path,
        env: spec.env.clone(),
    })
}
