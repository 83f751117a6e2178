//! # Test Matrix Library / Test Matrix 库
//!
//! This library provides the core functionality for the `test-matrix` tool,
//! a local runner that replays a CI build script once per toolchain version,
//! environment alternative and matrix override row.
//!
//! 此库为 `test-matrix` 工具提供核心功能，
//! 这是一个本地运行器，针对每个工具链版本、环境变量组合和矩阵覆盖行重放 CI 构建脚本。
//!
//! ## Modules / 模块
//!
//! - `core` - Configuration model, matrix expansion and run execution
//! - `infra` - Process spawning, file system layout and tracing setup
//! - `reporting` - Console summary, HTML and JSON reports
//! - `commands` - The run command that ties everything together
//! - `cli` - Command-line interface
//!
//! - `core` - 配置模型、矩阵展开和运行执行
//! - `infra` - 进程派生、文件系统布局和追踪设置
//! - `reporting` - 控制台摘要、HTML 和 JSON 报告
//! - `commands` - 将所有部分串联起来的运行命令
//! - `cli` - 命令行接口

pub mod cli;
pub mod commands;
pub mod core;
pub mod infra;
pub mod reporting;

// Re-export commonly used items
pub use crate::core::config;
pub use crate::core::execution;
pub use crate::core::models;

/// Picks the UI language and activates it.
///
/// An explicit request (from `--lang`) wins. Otherwise the system locale is
/// used. Either way the full tag is tried first (e.g. "zh-CN"), then the bare
/// language code, then "en".
pub fn init_locale(requested: Option<&str>) -> String {
    let locale = requested
        .map(str::to_string)
        .or_else(sys_locale::get_locale)
        .unwrap_or_else(|| "en".to_string());
    let available_locales = rust_i18n::available_locales!();

    let lang = if available_locales.contains(&locale.as_str()) {
        locale.as_str()
    } else {
        locale
            .split('-')
            .next()
            .filter(|lang_code| available_locales.contains(lang_code))
            .unwrap_or("en")
    };

    rust_i18n::set_locale(lang);
    lang.to_string()
}

// Initialize i18n
rust_i18n::i18n!("locales", fallback = "en");
