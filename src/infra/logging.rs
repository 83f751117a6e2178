//! Tracing and terminal colour setup.
//!
//! Tracing is a diagnostic channel on stderr, separate from the progress
//! messages and the per-run log files. `TRACE_TEST_MATRIX` turns on the trace
//! of every spawned command; otherwise `RUST_LOG` applies, defaulting to `warn`.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Set to any non-empty value to trace spawned commands.
pub const TRACE_ENV: &str = "TRACE_TEST_MATRIX";

fn env_flag(name: &str) -> bool {
    std::env::var(name).is_ok_and(|value| !value.is_empty())
}

/// Initialises the tracing subscriber. Safe to call more than once.
pub fn init() {
    let filter = if env_flag(TRACE_ENV) {
        EnvFilter::new("test_matrix=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .try_init();
}

/// Windows consoles only get colour when asked for it via `FORCE_ANSI` or
/// ConEmu's `ConEmuANSI=ON`. Elsewhere `colored` decides on its own.
pub fn configure_color() {
    if cfg!(windows) {
        let wanted = env_flag("FORCE_ANSI")
            || std::env::var("ConEmuANSI").is_ok_and(|value| value == "ON");
        colored::control::set_override(wanted);
    }
}
