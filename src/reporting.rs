//! # Reporting Module / 报告模块
//!
//! This module handles progress output and the final reports of a matrix run:
//! colourful console messages, an optional HTML page and an optional JSON file.
//! Reporting never influences which runs execute or how they are judged.
//!
//! 此模块处理矩阵运行的进度输出和最终报告：
//! 彩色控制台消息、可选的 HTML 页面和可选的 JSON 文件。
//! 报告从不影响哪些运行会执行，也不影响它们的判定结果。

pub mod console;
pub mod html;
pub mod json;

// Re-export common reporting functions
pub use console::{msg, print_run_finished, print_run_started, print_summary};
pub use html::generate_html_report;
pub use json::write_json_report;
