//! # File System Layout Unit Tests / 文件系统布局单元测试
//!
//! Path computation for run logs and build directories, plus the log file itself.
//!
//! 运行日志和构建目录的路径计算，以及日志文件本身。

use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;
use test_matrix::infra::fs::{RunLayout, RunLog};

#[cfg(test)]
mod layout_tests {
    use super::*;

    #[test]
    fn test_default_layout() {
        let paths = RunLayout::default().paths_for("stable", 2);
        assert_eq!(paths.log_path, PathBuf::from("local/tests/stable-2.log"));
        assert_eq!(paths.build_dir, PathBuf::from("target/stable-2"));
    }

    #[test]
    fn test_plain_versions_are_unchanged() {
        let layout = RunLayout::new("logs", "out");
        let paths = layout.paths_for("1.70.0", 0);
        assert_eq!(paths.log_path, PathBuf::from("logs/1.70.0-0.log"));
        assert_eq!(paths.build_dir, PathBuf::from("out/1.70.0-0"));

        let paths = layout.paths_for("nightly-2024-01-01", 3);
        assert_eq!(paths.build_dir, PathBuf::from("out/nightly-2024-01-01-3"));
    }

    #[test]
    fn test_awkward_characters_are_encoded() {
        let layout = RunLayout::new("logs", "out");
        assert_eq!(
            layout.paths_for("a/b", 0).build_dir,
            PathBuf::from("out/a%2Fb-0")
        );
        assert_eq!(
            layout.paths_for("x y", 1).log_path,
            PathBuf::from("logs/x%20y-1.log")
        );
    }

    #[test]
    fn test_distinct_versions_never_share_paths() {
        let layout = RunLayout::default();
        let versions = ["a/b", "a_b", "a%2Fb", "a b", "a-b"];

        for (i, left) in versions.iter().enumerate() {
            for right in &versions[i + 1..] {
                assert_ne!(
                    layout.paths_for(left, 0),
                    layout.paths_for(right, 0),
                    "{left} vs {right}"
                );
            }
        }
    }

    #[test]
    fn test_paths_are_pure() {
        let dir = tempdir().unwrap();
        let layout = RunLayout::new(dir.path().join("logs"), dir.path().join("target"));

        layout.paths_for("stable", 0);
        assert!(!dir.path().join("logs").exists());

        layout.ensure_log_dir().unwrap();
        assert!(dir.path().join("logs").is_dir());
    }
}

#[cfg(test)]
mod log_tests {
    use super::*;

    #[test]
    fn test_lines_are_written_and_file_is_truncated() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("run.log");
        fs::write(&path, "stale\n").unwrap();

        let mut log = RunLog::create(&path).unwrap();
        log.line("# stable #0").unwrap();
        log.line("> cargo test").unwrap();

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "# stable #0\n> cargo test\n"
        );
    }
}
