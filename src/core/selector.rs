//! # Version Selection Module / 版本选择模块
//!
//! Resolves the positional command-line arguments against the configured
//! default versions. A bare version includes it, `-<version>` excludes it.
//!
//! 根据配置的默认版本解析命令行位置参数。
//! 裸版本号表示包含，`-<版本>` 表示排除。

use crate::core::models::{MatrixError, VersionId};
use std::collections::HashSet;

/// Returns the ordered list of versions to run.
///
/// Explicitly included versions keep their command-line order and are
/// deduplicated (first occurrence wins). With no includes, the default list
/// is used in its configured order. Exclusions are removed from whichever
/// list results. Any argument that is neither a known version nor a known
/// version prefixed with `-` fails the whole selection.
///
/// 返回要运行的版本的有序列表。
/// 显式包含的版本保持命令行顺序并去重（首次出现为准）。
/// 未显式包含时使用配置中的默认列表。排除的版本从结果列表中移除。
/// 任何既不是已知版本、也不是带 `-` 前缀的已知版本的参数都会导致整个选择失败。
pub fn select_versions<S: AsRef<str>>(
    args: &[S],
    default_versions: &[VersionId],
) -> Result<Vec<VersionId>, MatrixError> {
    let known: HashSet<&str> = default_versions.iter().map(String::as_str).collect();
    let mut include: Vec<VersionId> = Vec::new();
    let mut exclude: HashSet<&str> = HashSet::new();

    for arg in args {
        let arg = arg.as_ref();
        if known.contains(arg) {
            if !include.iter().any(|v| v == arg) {
                include.push(arg.to_string());
            }
        } else if let Some(excluded) = arg.strip_prefix('-').filter(|rest| known.contains(rest)) {
            exclude.insert(excluded);
        } else {
            return Err(MatrixError::UnrecognizedArgument(arg.to_string()));
        }
    }

    if include.is_empty() {
        include = default_versions.to_vec();
    }

    Ok(include
        .into_iter()
        .filter(|version| !exclude.contains(version.as_str()))
        .collect())
}
