//! # Environment Strings Module / 环境变量字符串模块
//!
//! Parsing of raw `KEY=value KEY2="quoted value"` strings as they appear in
//! the `env` list and in matrix override rows, plus the snapshot of the
//! invoking process environment that every run is built on.
//!
//! 解析 `env` 列表和矩阵覆盖行中出现的原始 `KEY=value KEY2="quoted value"` 字符串，
//! 以及作为每次运行基础的调用进程环境快照。

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;
use std::ffi::OsString;

/// Variable name to value. Ordered, so logs list variables deterministically.
/// 变量名到值的映射。有序，因此日志中变量的列出顺序是确定的。
pub type EnvironmentMap = BTreeMap<String, String>;

/// A token is `NAME=value` where value is either `"..."` (no embedded quotes)
/// or a run of non-whitespace characters, possibly empty. The leading `(?:^|\s)`
/// anchors every match at the start of a token.
static ENV_TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?:^|\s)([A-Za-z0-9_]+)=(?:"([^"]*)"|(\S*))"#)
        .expect("environment token pattern is valid")
});

/// Parses a raw environment string into a map.
///
/// Tokens that do not fit the `NAME=value` grammar are skipped without error;
/// this leniency matches how CI services treat the same strings. When a name
/// appears more than once, the last value wins.
///
/// 将原始环境变量字符串解析为映射。
/// 不符合 `NAME=value` 语法的片段会被静默跳过；同名变量以最后一次出现为准。
pub fn parse_env_string(raw: &str) -> EnvironmentMap {
    let mut env = EnvironmentMap::new();
    for caps in ENV_TOKEN.captures_iter(raw.trim()) {
        let name = caps[1].to_string();
        let value = caps
            .get(2)
            .or_else(|| caps.get(3))
            .map(|m| m.as_str().to_string())
            .unwrap_or_default();
        env.insert(name, value);
    }
    env
}

/// Serialises a map back into the `KEY=value` form accepted by [`parse_env_string`].
/// Values that are empty or contain whitespace are double-quoted.
pub fn to_env_string(env: &EnvironmentMap) -> String {
    env.iter()
        .map(|(name, value)| {
            if value.is_empty() || value.chars().any(char::is_whitespace) {
                format!("{name}=\"{value}\"")
            } else {
                format!("{name}={value}")
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Overlays `top` on `base`; keys from `top` win.
pub fn merge(base: &EnvironmentMap, top: &EnvironmentMap) -> EnvironmentMap {
    let mut merged = base.clone();
    merged.extend(top.iter().map(|(k, v)| (k.clone(), v.clone())));
    merged
}

/// An immutable copy of the invoking process environment, taken once at start-up.
///
/// Entries that are not valid UTF-8 cannot be substituted into commands. They
/// are kept apart, untouched, so child processes still inherit them.
///
/// 调用进程环境的不可变副本，在启动时获取一次。
/// 非 UTF-8 的条目无法代入命令，它们被原样单独保存，子进程仍会继承它们。
#[derive(Debug, Clone, Default)]
pub struct EnvSnapshot {
    vars: EnvironmentMap,
    opaque: Vec<(OsString, OsString)>,
}

impl EnvSnapshot {
    /// Captures the current process environment.
    pub fn capture() -> Self {
        Self::from_os_vars(std::env::vars_os())
    }

    /// Splits raw environment entries into the UTF-8 map and the opaque rest.
    pub fn from_os_vars<I>(vars: I) -> Self
    where
        I: IntoIterator<Item = (OsString, OsString)>,
    {
        let mut snapshot = Self::default();
        for (name, value) in vars {
            match (name.into_string(), value.into_string()) {
                (Ok(name), Ok(value)) => {
                    snapshot.vars.insert(name, value);
                }
                (name, value) => {
                    let name = name.map_or_else(|raw| raw, OsString::from);
                    let value = value.map_or_else(|raw| raw, OsString::from);
                    snapshot.opaque.push((name, value));
                }
            }
        }
        snapshot
    }

    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: vars.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
            opaque: Vec::new(),
        }
    }

    pub fn vars(&self) -> &EnvironmentMap {
        &self.vars
    }

    /// Entries whose name or value is not valid UTF-8.
    pub fn opaque(&self) -> &[(OsString, OsString)] {
        &self.opaque
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }
}
