//! # Matrix Expansion Module / 矩阵展开模块
//!
//! Expands the declarative matrix into the ordered list of runs to execute.
//!
//! 将声明式矩阵展开为要执行的有序运行列表。

use crate::core::config::{MatrixConfig, OverrideRow};
use crate::core::env::{merge, parse_env_string};
use crate::core::models::{RunSpec, VersionId};

/// Produces one `RunSpec` per (version, environment alternative, applicable row).
///
/// The loops nest in that order. Before the configured override rows, each
/// environment alternative is paired with an implicit empty row, so every
/// (version, alternative) pair runs at least once. Rows pinned to another
/// version are skipped without consuming a sequence index, so the indices of
/// each version are always `0..k`.
///
/// 为每个（版本，环境变量组合，适用的覆盖行）生成一个 `RunSpec`。
/// 在配置的覆盖行之前，每个环境变量组合都会与一个隐式的空行配对，
/// 因此每个（版本，组合）对至少运行一次。固定到其他版本的行会被跳过且不占用序号，
/// 所以每个版本的序号总是 `0..k`。
pub fn expand_matrix(config: &MatrixConfig, versions: &[VersionId]) -> Vec<RunSpec> {
    let implicit_row = OverrideRow::default();
    let rows: Vec<&OverrideRow> = std::iter::once(&implicit_row)
        .chain(config.override_rows.iter())
        .collect();

    let mut specs = Vec::new();
    for version in versions {
        let mut sequence_index = 0;
        for env_string in &config.env_alternatives {
            let base = parse_env_string(env_string);
            for row in rows.iter().filter(|row| row.applies_to(version)) {
                let row_env = parse_env_string(&row.env_string);
                specs.push(RunSpec {
                    version: version.clone(),
                    sequence_index,
                    env: merge(&base, &row_env),
                });
                sequence_index += 1;
            }
        }
    }
    specs
}
