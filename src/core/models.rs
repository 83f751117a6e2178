//! # Data Models Module / 数据模型模块
//!
//! This module defines the data structures that flow through a matrix run:
//! the run specifications produced by the planner, the results produced by
//! the executor, and the typed errors that abort the whole matrix.
//!
//! 此模块定义了在矩阵运行中流转的数据结构：
//! 计划器生成的运行规格、执行器生成的运行结果，以及会中止整个矩阵的类型化错误。

use crate::core::env::EnvironmentMap;
use chrono::{DateTime, Local};
use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Identifier of one toolchain version under test, e.g. `stable` or `1.85.0`.
pub type VersionId = String;

/// Errors that abort the entire matrix rather than a single run.
/// 中止整个矩阵（而不仅是单次运行）的错误。
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MatrixError {
    /// A command-line token is neither a known version nor `-<known version>`.
    /// 命令行参数既不是已知版本，也不是 `-<已知版本>`。
    #[error("Don't know how to deal with argument `{0}`.")]
    UnrecognizedArgument(String),

    /// A script step references a variable missing from the effective environment.
    /// 脚本步骤引用了有效环境中不存在的变量。
    #[error("Undefined variable `{name}` in script step `{step}`.")]
    UndefinedVariable { name: String, step: String },
}

/// One concrete (version, environment) combination to run the script against.
/// 一个具体的（版本，环境）组合，脚本将针对它运行。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSpec {
    /// The toolchain version / 工具链版本
    pub version: VersionId,
    /// Position of this run among the runs of the same version, starting at 0.
    /// 此运行在同一版本的所有运行中的位置，从 0 开始。
    pub sequence_index: usize,
    /// Variables supplied for this run only (not the inherited environment).
    /// 仅为此运行提供的变量（不含继承的环境）。
    pub env: EnvironmentMap,
}

impl RunSpec {
    /// Short human label, e.g. `stable #2`.
    pub fn label(&self) -> String {
        format!("{} #{}", self.version, self.sequence_index)
    }
}

/// Outcome of executing one `RunSpec`.
/// 执行一个 `RunSpec` 的结果。
#[derive(Debug, Clone, Serialize)]
pub struct RunResult {
    pub version: VersionId,
    pub sequence_index: usize,
    /// `true` only if every script step ran and exited with status zero.
    /// 仅当所有脚本步骤都已运行并以状态 0 退出时为 `true`。
    pub success: bool,
    /// Wall time spent on the run, including all spawned steps.
    pub duration: Duration,
    pub started_at: DateTime<Local>,
    /// Where the run's output was written.
    pub log_path: PathBuf,
    pub env: EnvironmentMap,
}

impl RunResult {
    pub fn label(&self) -> String {
        format!("{} #{}", self.version, self.sequence_index)
    }

    pub fn is_failure(&self) -> bool {
        !self.success
    }
}
