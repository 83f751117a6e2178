//! # File System Layout Module / 文件系统布局模块
//!
//! Where each run writes its log and where its build output is directed.
//! Path computation is pure; only [`RunLayout::ensure_log_dir`] and
//! [`RunLog::create`] touch the disk.
//!
//! 每次运行写入日志的位置以及构建输出的目标位置。
//! 路径计算是纯函数；只有 [`RunLayout::ensure_log_dir`] 和 [`RunLog::create`] 会访问磁盘。

use anyhow::{Context, Result};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Environment variable through which each run receives its build directory.
pub const BUILD_DIR_VAR: &str = "CARGO_TARGET_DIR";

/// Default directory for run logs, relative to the working directory.
pub const DEFAULT_LOG_DIR: &str = "local/tests";

/// Default root for per-run build directories.
pub const DEFAULT_TARGET_ROOT: &str = "target";

/// Line written to a log after a step exits unsuccessfully.
pub const FAILURE_MARKER: &str = "Command failed.";

/// Paths owned by one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunPaths {
    pub log_path: PathBuf,
    pub build_dir: PathBuf,
}

/// Roots under which run logs and build directories are placed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunLayout {
    pub log_dir: PathBuf,
    pub target_root: PathBuf,
}

impl Default for RunLayout {
    fn default() -> Self {
        Self {
            log_dir: PathBuf::from(DEFAULT_LOG_DIR),
            target_root: PathBuf::from(DEFAULT_TARGET_ROOT),
        }
    }
}

impl RunLayout {
    pub fn new(log_dir: impl Into<PathBuf>, target_root: impl Into<PathBuf>) -> Self {
        Self {
            log_dir: log_dir.into(),
            target_root: target_root.into(),
        }
    }

    /// Computes the log file and build directory for `(version, sequence_index)`.
    /// 计算 `(version, sequence_index)` 对应的日志文件和构建目录。
    pub fn paths_for(&self, version: &str, sequence_index: usize) -> RunPaths {
        let stem = run_stem(version, sequence_index);
        RunPaths {
            log_path: self.log_dir.join(format!("{stem}.log")),
            build_dir: self.target_root.join(stem),
        }
    }

    /// Creates the log directory if it does not exist yet.
    pub fn ensure_log_dir(&self) -> Result<()> {
        fs::create_dir_all(&self.log_dir).with_context(|| {
            format!("Failed to create log directory: {}", self.log_dir.display())
        })
    }
}

/// `<version>-<index>`. Bytes of the version outside `[A-Za-z0-9._-]`,
/// including `%`, are written as `%XX`, so distinct versions never share a stem.
fn run_stem(version: &str, sequence_index: usize) -> String {
    let mut encoded = String::with_capacity(version.len());
    for byte in version.bytes() {
        if byte.is_ascii_alphanumeric() || matches!(byte, b'.' | b'_' | b'-') {
            encoded.push(char::from(byte));
        } else {
            encoded.push_str(&format!("%{byte:02X}"));
        }
    }
    format!("{encoded}-{sequence_index}")
}

/// The log file of a single run. Closed when dropped.
/// 单次运行的日志文件。在被丢弃时关闭。
#[derive(Debug)]
pub struct RunLog {
    file: File,
    path: PathBuf,
}

impl RunLog {
    /// Creates (or truncates) the log at `path`.
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::create(path)
            .with_context(|| format!("Failed to create log file: {}", path.display()))?;
        Ok(Self {
            file,
            path: path.to_path_buf(),
        })
    }

    /// Appends one line and flushes it, so it lands before any child output.
    pub fn line(&mut self, text: &str) -> Result<()> {
        writeln!(self.file, "{text}")
            .and_then(|_| self.file.flush())
            .with_context(|| format!("Failed to write log file: {}", self.path.display()))
    }

    /// The handle child processes write their output to.
    pub fn file(&self) -> &File {
        &self.file
    }
}
