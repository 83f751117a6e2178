// Shared test helpers for integration tests
#![allow(dead_code)]

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use test_matrix::core::env::{EnvSnapshot, EnvironmentMap};
use test_matrix::infra::command::CommandRunner;

/// A `CommandRunner` that records every command line instead of spawning it.
///
/// A command fails when it contains one of `fail_on`, and cannot be started
/// when it contains one of `spawn_error_on`.
#[derive(Default)]
pub struct RecordingRunner {
    pub commands: Mutex<Vec<String>>,
    pub envs: Mutex<Vec<EnvironmentMap>>,
    fail_on: Vec<String>,
    spawn_error_on: Vec<String>,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_on(patterns: &[&str]) -> Self {
        Self {
            fail_on: patterns.iter().map(|p| p.to_string()).collect(),
            ..Self::default()
        }
    }

    pub fn spawn_error_on(patterns: &[&str]) -> Self {
        Self {
            spawn_error_on: patterns.iter().map(|p| p.to_string()).collect(),
            ..Self::default()
        }
    }

    pub fn commands(&self) -> Vec<String> {
        self.commands.lock().unwrap().clone()
    }

    pub fn envs(&self) -> Vec<EnvironmentMap> {
        self.envs.lock().unwrap().clone()
    }
}

impl CommandRunner for RecordingRunner {
    async fn run(&self, command_line: &str, env: &EnvironmentMap, log: &File) -> io::Result<bool> {
        self.commands.lock().unwrap().push(command_line.to_string());
        self.envs.lock().unwrap().push(env.clone());

        if self.spawn_error_on.iter().any(|p| command_line.contains(p.as_str())) {
            return Err(io::Error::new(io::ErrorKind::NotFound, "no such program"));
        }

        let mut log = log;
        writeln!(log, "output of: {command_line}")?;
        Ok(!self.fail_on.iter().any(|p| command_line.contains(p.as_str())))
    }
}

/// A small, fixed inherited environment.
pub fn snapshot() -> EnvSnapshot {
    EnvSnapshot::from_vars([("PATH", "/usr/bin:/bin"), ("HOME", "/home/tester")])
}

/// Writes `content` as `name` inside `dir` and returns its path.
pub fn write_config(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).expect("Failed to write configuration");
    path
}

/// The configuration used by most end-to-end tests.
pub const TRAVIS_YML: &str = r#"
language: rust
script: cargo build --verbose && cargo test --verbose
rust:
  - stable
  - beta
  - nightly
env:
  - FEATURES=""
  - FEATURES="foo bar"
matrix:
  include:
    - rust: nightly
      env: FEATURES="foo bar nightly"
"#;
