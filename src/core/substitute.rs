//! Variable substitution in script steps.

use crate::core::env::EnvironmentMap;
use crate::core::models::MatrixError;
use once_cell::sync::Lazy;
use regex::Regex;

/// `$$`, `$NAME` or `${NAME}`.
static VARIABLE_REF: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\$(?:(\$)|([A-Za-z0-9_]+)|\{([A-Za-z0-9_]+)\})")
        .expect("variable reference pattern is valid")
});

/// Replaces every `$NAME` and `${NAME}` in `step` with its value from `env`.
///
/// `$$` yields a literal `$`. A `$` that starts no reference is kept as is.
/// A reference to a name missing from `env` is an error.
pub fn substitute_vars(step: &str, env: &EnvironmentMap) -> Result<String, MatrixError> {
    let mut out = String::with_capacity(step.len());
    let mut last = 0;

    for caps in VARIABLE_REF.captures_iter(step) {
        let whole = caps.get(0).expect("group 0 always matches");
        out.push_str(&step[last..whole.start()]);
        last = whole.end();

        if caps.get(1).is_some() {
            out.push('$');
            continue;
        }

        let name = caps
            .get(2)
            .or_else(|| caps.get(3))
            .map(|m| m.as_str())
            .unwrap_or_default();
        let value = env.get(name).ok_or_else(|| MatrixError::UndefinedVariable {
            name: name.to_string(),
            step: step.to_string(),
        })?;
        out.push_str(value);
    }

    out.push_str(&step[last..]);
    Ok(out)
}
