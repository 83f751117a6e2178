//! # Command Execution Module / 命令执行模块
//!
//! The process facility used to run script steps. The executor only talks to
//! the [`CommandRunner`] trait, so runs can be exercised without spawning
//! real toolchains.
//!
//! 用于运行脚本步骤的进程设施。执行器只与 [`CommandRunner`] trait 交互，
//! 因此无需派生真实的工具链即可测试运行。

use crate::core::env::{EnvSnapshot, EnvironmentMap};
use std::ffi::OsString;
use std::fs::File;
use std::io;
use std::process::Stdio;
use tracing::debug;

/// Runs one literal command line.
/// 运行一条字面命令行。
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    /// Runs `command_line` with exactly `env` as its environment, sending both
    /// stdout and stderr to `log`.
    ///
    /// Returns `Ok(true)` if the command exited with status zero, `Ok(false)`
    /// for any other exit, and `Err` if it could not be started at all.
    async fn run(&self, command_line: &str, env: &EnvironmentMap, log: &File) -> io::Result<bool>;
}

/// Runs command lines through the platform shell (`sh -c`, or `cmd /C` on Windows).
///
/// Besides `env`, children receive the non-UTF-8 entries of the snapshot the
/// runner was built from; `env` wins on a name clash.
///
/// 通过平台 shell 运行命令行（`sh -c`，在 Windows 上为 `cmd /C`）。
/// 除 `env` 外，子进程还会收到构建运行器时快照中的非 UTF-8 条目；同名时以 `env` 为准。
#[derive(Debug, Clone, Default)]
pub struct ShellRunner {
    passthrough: Vec<(OsString, OsString)>,
}

impl ShellRunner {
    /// A runner whose children also inherit the opaque entries of `snapshot`.
    pub fn inheriting(snapshot: &EnvSnapshot) -> Self {
        Self {
            passthrough: snapshot.opaque().to_vec(),
        }
    }

    fn shell_command(command_line: &str) -> tokio::process::Command {
        if cfg!(windows) {
            let mut cmd = tokio::process::Command::new("cmd");
            cmd.arg("/C").arg(command_line);
            cmd
        } else {
            let mut cmd = tokio::process::Command::new("sh");
            cmd.arg("-c").arg(command_line);
            cmd
        }
    }
}

impl CommandRunner for ShellRunner {
    async fn run(&self, command_line: &str, env: &EnvironmentMap, log: &File) -> io::Result<bool> {
        debug!(command = %command_line, env = ?env, "sh");

        let mut cmd = Self::shell_command(command_line);
        cmd.env_clear()
            .envs(self.passthrough.iter().map(|(k, v)| (k, v)))
            .envs(env)
            .stdin(Stdio::null())
            .stdout(Stdio::from(log.try_clone()?))
            .stderr(Stdio::from(log.try_clone()?))
            .kill_on_drop(true);

        let status = cmd.status().await?;
        if !status.success() {
            debug!(command = %command_line, ?status, "FAILED!");
        }
        Ok(status.success())
    }
}
