//! # Configuration Module / 配置模块
//!
//! Loads the CI configuration document (`.travis.yml` by default, or a TOML
//! file with the same keys) and turns it into the immutable [`MatrixConfig`]
//! the rest of the runner works from.
//!
//! 加载 CI 配置文档（默认为 `.travis.yml`，或具有相同键的 TOML 文件），
//! 并将其转换为运行器其余部分使用的不可变 [`MatrixConfig`]。

use crate::core::models::VersionId;
use anyhow::{Context, Result};
use serde::de::{self, Deserializer, SeqAccess, Visitor};
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::Path;

/// Separator joining script steps in a single `script` string.
pub const STEP_SEPARATOR: &str = "&&";

/// One matrix-include entry.
/// 一个矩阵 include 条目。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverrideRow {
    /// When set, the row only applies to this version.
    /// 设置后，该行仅适用于此版本。
    pub pinned_version: Option<VersionId>,
    /// Raw environment string added on top of the environment alternative.
    /// 叠加在环境变量组合之上的原始环境变量字符串。
    pub env_string: String,
}

impl OverrideRow {
    /// Whether this row contributes a run for `version`.
    pub fn applies_to(&self, version: &str) -> bool {
        self.pinned_version.as_deref().is_none_or(|pinned| pinned == version)
    }
}

/// The in-memory test matrix.
/// 内存中的测试矩阵。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatrixConfig {
    /// Versions run when no version is named on the command line. Unique, in file order.
    /// 命令行未指定版本时运行的版本。唯一，保持文件中的顺序。
    pub default_versions: Vec<VersionId>,
    /// Script steps, in execution order.
    /// 按执行顺序排列的脚本步骤。
    pub script_steps: Vec<String>,
    /// Raw environment strings; never empty (defaults to a single `""`).
    /// 原始环境变量字符串；从不为空（默认为单个 `""`）。
    pub env_alternatives: Vec<String>,
    pub override_rows: Vec<OverrideRow>,
}

impl MatrixConfig {
    /// Builds a config, applying the same normalisation as loading from a file.
    pub fn new(
        default_versions: Vec<VersionId>,
        script_steps: Vec<String>,
        env_alternatives: Vec<String>,
        override_rows: Vec<OverrideRow>,
    ) -> Self {
        let mut unique_versions: Vec<VersionId> = Vec::with_capacity(default_versions.len());
        for version in default_versions {
            if !unique_versions.contains(&version) {
                unique_versions.push(version);
            }
        }
        let env_alternatives = if env_alternatives.is_empty() {
            vec![String::new()]
        } else {
            env_alternatives
        };
        Self {
            default_versions: unique_versions,
            script_steps,
            env_alternatives,
            override_rows,
        }
    }
}

/// Splits a combined script string on `&&`, trimming each step and dropping empty ones.
/// 按 `&&` 拆分组合脚本字符串，修剪每个步骤并丢弃空步骤。
pub fn split_script(script: &str) -> Vec<String> {
    script
        .split(STEP_SEPARATOR)
        .map(str::trim)
        .filter(|step| !step.is_empty())
        .map(str::to_string)
        .collect()
}

/// A scalar taken as text. YAML and TOML numbers are accepted so that a
/// version such as `1.40` works both in `rust` and in an include row.
#[derive(Debug, Clone)]
struct Scalar(String);

struct ScalarVisitor;

impl<'de> Visitor<'de> for ScalarVisitor {
    type Value = String;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a string or a number")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<String, E> {
        Ok(v.to_string())
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<String, E> {
        Ok(v)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<String, E> {
        Ok(v.to_string())
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<String, E> {
        Ok(v.to_string())
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<String, E> {
        Ok(v.to_string())
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<String, E> {
        Ok(v.to_string())
    }
}

impl<'de> Deserialize<'de> for Scalar {
    // serde_yaml hands a plain scalar to `deserialize_string` as its source
    // text, which keeps `1.40` from turning into `1.4`.
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_string(ScalarVisitor).map(Scalar)
    }
}

/// A value that may be written either as a single scalar or as a list.
#[derive(Debug, Clone)]
struct OneOrMany(Vec<String>);

impl OneOrMany {
    fn into_vec(self) -> Vec<String> {
        self.0
    }
}

struct OneOrManyVisitor;

impl<'de> Visitor<'de> for OneOrManyVisitor {
    type Value = OneOrMany;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a string, a number or a list of them")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<OneOrMany, E> {
        Ok(OneOrMany(vec![v.to_string()]))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<OneOrMany, E> {
        Ok(OneOrMany(vec![v]))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<OneOrMany, E> {
        Ok(OneOrMany(vec![v.to_string()]))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<OneOrMany, E> {
        Ok(OneOrMany(vec![v.to_string()]))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<OneOrMany, E> {
        Ok(OneOrMany(vec![v.to_string()]))
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<OneOrMany, E> {
        Ok(OneOrMany(vec![v.to_string()]))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<OneOrMany, A::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(Scalar(item)) = seq.next_element()? {
            items.push(item);
        }
        Ok(OneOrMany(items))
    }
}

impl<'de> Deserialize<'de> for OneOrMany {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(OneOrManyVisitor)
    }
}

#[derive(Debug, Deserialize)]
struct RawDocument {
    script: OneOrMany,
    rust: OneOrMany,
    #[serde(default)]
    env: Option<OneOrMany>,
    #[serde(default, alias = "jobs")]
    matrix: Option<RawMatrix>,
}

#[derive(Debug, Default, Deserialize)]
struct RawMatrix {
    #[serde(default)]
    include: Vec<RawRow>,
}

#[derive(Debug, Default, Deserialize)]
struct RawRow {
    #[serde(default)]
    rust: Option<Scalar>,
    #[serde(default)]
    env: Option<OneOrMany>,
}

impl From<RawDocument> for MatrixConfig {
    fn from(doc: RawDocument) -> Self {
        let script_steps = doc
            .script
            .into_vec()
            .iter()
            .flat_map(|part| split_script(part))
            .collect();
        let env_alternatives = doc.env.map(OneOrMany::into_vec).unwrap_or_default();
        let override_rows = doc
            .matrix
            .unwrap_or_default()
            .include
            .into_iter()
            .map(|row| OverrideRow {
                pinned_version: row.rust.map(|Scalar(version)| version),
                env_string: row
                    .env
                    .map(|env| env.into_vec().join(" "))
                    .unwrap_or_default(),
            })
            .collect();

        MatrixConfig::new(doc.rust.into_vec(), script_steps, env_alternatives, override_rows)
    }
}

/// Parses a YAML document into a `MatrixConfig`.
pub fn parse_yaml(content: &str) -> Result<MatrixConfig> {
    let doc: RawDocument = serde_yaml::from_str(content)?;
    Ok(doc.into())
}

/// Parses a TOML document into a `MatrixConfig`.
pub fn parse_toml(content: &str) -> Result<MatrixConfig> {
    let doc: RawDocument = toml::from_str(content)?;
    Ok(doc.into())
}

/// Loads the matrix configuration from `path`.
/// Files ending in `.toml` are read as TOML; everything else as YAML.
///
/// 从 `path` 加载矩阵配置。
/// 以 `.toml` 结尾的文件按 TOML 读取；其他文件按 YAML 读取。
pub fn load_matrix_config(path: &Path) -> Result<MatrixConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;

    let is_toml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

    let config = if is_toml {
        parse_toml(&content)
    } else {
        parse_yaml(&content)
    };
    config.with_context(|| format!("Failed to parse configuration file: {}", path.display()))
}
