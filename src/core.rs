//! # Core Module / 核心模块
//!
//! This module contains the core functionality of the test matrix runner:
//! the configuration model, environment-string parsing, version selection,
//! matrix expansion and the execution of a single run.
//!
//! 此模块包含测试矩阵运行器的核心功能：
//! 配置模型、环境变量字符串解析、版本选择、矩阵展开以及单次运行的执行。

pub mod config;
pub mod env;
pub mod execution;
pub mod models;
pub mod planner;
pub mod selector;
pub mod substitute;

// Re-exports
pub use config::MatrixConfig;
pub use execution::execute_run;
pub use models::{MatrixError, RunResult, RunSpec};
