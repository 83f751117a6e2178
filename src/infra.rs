//! # Infrastructure Module / 基础设施模块
//!
//! This module provides infrastructure services for the runner:
//! spawning script steps, the on-disk layout of logs and build directories,
//! and tracing/colour setup.
//!
//! 此模块为运行器提供基础设施服务：
//! 派生脚本步骤、日志和构建目录的磁盘布局，以及追踪和颜色设置。

pub mod command;
pub mod fs;
pub mod logging;

// Re-export i18n functions for easier access
pub use rust_i18n::t;
