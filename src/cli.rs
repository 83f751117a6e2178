// src/cli.rs
use anyhow::Result;
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::{env, path::PathBuf, process::ExitCode};

use crate::{
    commands::{
        self,
        run::{DEFAULT_WRAPPER, RunOptions},
    },
    infra::{
        fs::{DEFAULT_LOG_DIR, DEFAULT_TARGET_ROOT, RunLayout},
        t,
    },
};

/// Exit status when `--fail-on-error` is set and at least one run failed.
pub const EXIT_RUNS_FAILED: u8 = 2;

/// Default configuration file.
pub const DEFAULT_CONFIG: &str = ".travis.yml";

/// Pre-parses the command line arguments to find the language setting.
/// This allows i18n to be initialized before the full CLI is built.
/// It looks for `--lang <VALUE>` or `--lang=<VALUE>`.
fn pre_parse_language() -> Option<String> {
    let args: Vec<String> = env::args().collect();
    if let Some(lang) = args.iter().find_map(|arg| arg.strip_prefix("--lang=")) {
        return Some(lang.to_string());
    }
    let pos = args.iter().position(|arg| arg == "--lang")?;
    args.get(pos + 1).cloned()
}

pub fn build_cli(locale: &str) -> Command {
    Command::new("test-matrix")
        .version(env!("CARGO_PKG_VERSION"))
        .about(t!("cli.about", locale = locale).to_string())
        .arg(
            Arg::new("versions")
                .help(t!("cli.arg_versions", locale = locale).to_string())
                .value_name("VERSION")
                .num_args(0..)
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .help(t!("cli.arg_config", locale = locale).to_string())
                .value_name("CONFIG")
                .default_value(DEFAULT_CONFIG)
                .value_parser(clap::value_parser!(PathBuf))
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("log-dir")
                .long("log-dir")
                .help(t!("cli.arg_log_dir", locale = locale).to_string())
                .value_name("LOG_DIR")
                .default_value(DEFAULT_LOG_DIR)
                .value_parser(clap::value_parser!(PathBuf))
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("target-root")
                .long("target-root")
                .help(t!("cli.arg_target_root", locale = locale).to_string())
                .value_name("TARGET_ROOT")
                .default_value(DEFAULT_TARGET_ROOT)
                .value_parser(clap::value_parser!(PathBuf))
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("wrapper")
                .long("wrapper")
                .help(t!("cli.arg_wrapper", locale = locale).to_string())
                .value_name("WRAPPER")
                .default_value(DEFAULT_WRAPPER)
                .allow_hyphen_values(true)
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("html")
                .long("html")
                .help(t!("cli.arg_html", locale = locale).to_string())
                .value_name("HTML")
                .value_parser(clap::value_parser!(PathBuf))
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help(t!("cli.arg_json", locale = locale).to_string())
                .value_name("JSON")
                .value_parser(clap::value_parser!(PathBuf))
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("fail-on-error")
                .long("fail-on-error")
                .help(t!("cli.arg_fail_on_error", locale = locale).to_string())
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("lang")
                .long("lang")
                .help(t!("cli.arg_lang", locale = locale).to_string())
                .value_name("LANGUAGE")
                .action(ArgAction::Set),
        )
}

/// Moves the positional version arguments behind a `--` separator, keeping
/// their order, so a `-<version>` exclusion is never read as an option and
/// options are still recognised after a version. `-h` and `-V` stay flags.
///
/// 将位置版本参数按原顺序移到 `--` 分隔符之后，使 `-<版本>` 排除项不会被当作选项，
/// 且版本之后的选项仍能被识别。`-h` 和 `-V` 仍然是标志。
pub fn separate_positionals<I>(cmd: &Command, args: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let takes_value: Vec<&str> = cmd
        .get_arguments()
        .filter(|arg| arg.get_action().takes_values())
        .filter_map(|arg| arg.get_long())
        .collect();

    let mut args = args.into_iter();
    // The binary name stays first.
    let mut options: Vec<String> = args.next().into_iter().collect();
    let mut positionals = Vec::new();

    while let Some(arg) = args.next() {
        if arg == "--" {
            positionals.extend(args.by_ref());
        } else if arg.starts_with("--") || arg == "-h" || arg == "-V" {
            let needs_value = arg
                .strip_prefix("--")
                .is_some_and(|long| !long.contains('=') && takes_value.contains(&long));
            options.push(arg);
            if needs_value {
                options.extend(args.next());
            }
        } else {
            positionals.push(arg);
        }
    }

    if !positionals.is_empty() {
        options.push("--".to_string());
        options.extend(positionals);
    }
    options
}

/// Turns parsed arguments into run options.
pub fn run_options(matches: &ArgMatches) -> RunOptions {
    let path = |id: &str| {
        matches
            .get_one::<PathBuf>(id)
            .cloned()
            .unwrap_or_default()
    };

    RunOptions {
        config: path("config"),
        versions: matches
            .get_many::<String>("versions")
            .map(|values| values.cloned().collect())
            .unwrap_or_default(),
        layout: RunLayout::new(path("log-dir"), path("target-root")),
        wrapper: matches
            .get_one::<String>("wrapper")
            .cloned()
            .unwrap_or_else(|| DEFAULT_WRAPPER.to_string()),
        html: matches.get_one::<PathBuf>("html").cloned(),
        json: matches.get_one::<PathBuf>("json").cloned(),
    }
}

pub async fn run() -> Result<ExitCode> {
    // Pre-parse language and initialize i18n first.
    let requested = pre_parse_language();
    let language = crate::init_locale(requested.as_deref());

    let cli = build_cli(&language);
    let args = separate_positionals(&cli, env::args());
    let matches = cli.get_matches_from(args);
    let fail_on_error = matches.get_flag("fail-on-error");

    let outcome = commands::run::execute(run_options(&matches)).await?;

    if fail_on_error && !outcome.all_passed() {
        return Ok(ExitCode::from(EXIT_RUNS_FAILED));
    }
    Ok(ExitCode::SUCCESS)
}
