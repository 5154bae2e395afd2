//! # CLI Module / 命令行模块
//!
//! Builds the command tree with clap and dispatches to the commands.
//! The language is pre-parsed so that help texts are already localized.
//!
//! 使用 clap 构建命令树并分派到各个命令。
//! 语言参数会被预先解析，以便帮助文本已完成本地化。

pub mod commands;

use anyhow::Result;
use clap::{Arg, ArgAction, Command};
use std::{env, path::PathBuf};

use crate::infra::t;

/// Pre-parses the command line arguments to find the language setting.
/// This allows i18n to be initialized before the full CLI is built.
/// It looks for a `--lang <VALUE>` argument.
fn pre_parse_language() -> Option<String> {
    let args: Vec<String> = env::args().collect();
    let pos = args.iter().position(|arg| arg == "--lang")?;
    args.get(pos + 1).cloned()
}

fn build_cli(locale: &str) -> Command {
    Command::new("solution-runner")
        .version(env!("CARGO_PKG_VERSION"))
        .about(t!("cli_about", locale = locale).to_string())
        .arg(
            Arg::new("lang")
                .long("lang")
                .help(t!("cli_lang", locale = locale).to_string())
                .value_name("LANGUAGE")
                .global(true)
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .help(t!("arg_config", locale = locale).to_string())
                .value_name("CONFIG")
                .default_value("Runner.toml")
                .value_parser(clap::value_parser!(PathBuf))
                .global(true)
                .action(ArgAction::Set),
        )
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("test")
                .about(t!("cmd_test_about", locale = locale).to_string())
                .arg(
                    Arg::new("solution")
                        .help(t!("arg_solution", locale = locale).to_string())
                        .value_name("SOLUTION")
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("time")
                        .short('t')
                        .long("time")
                        .help(t!("arg_time", locale = locale).to_string())
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("debug")
                        .short('d')
                        .long("debug")
                        .help(t!("arg_debug", locale = locale).to_string())
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(Command::new("list").about(t!("cmd_list_about", locale = locale).to_string()))
}

/// Parses the command line and runs the selected command.
///
/// # Returns
/// `Ok(true)` if every executed test passed, `Ok(false)` if some failed.
pub fn run() -> Result<bool> {
    // Pre-parse language and initialize i18n first.
    let language = pre_parse_language();
    if let Some(language) = &language {
        rust_i18n::set_locale(language);
    }
    let locale = language
        .clone()
        .unwrap_or_else(|| (*rust_i18n::locale()).to_string());

    let matches = build_cli(&locale).get_matches();
    let config = matches
        .get_one::<PathBuf>("config")
        .unwrap() // Has default
        .clone();
    let lang_given = language.is_some();

    match matches.subcommand() {
        Some(("test", test_matches)) => {
            let solution = test_matches.get_one::<String>("solution").cloned();
            let show_time = test_matches.get_flag("time");
            let debug = test_matches.get_flag("debug");
            commands::test::execute(solution, config, show_time, debug, lang_given)
        }
        Some(("list", _)) => {
            commands::list::execute(config, lang_given)?;
            Ok(true)
        }
        _ => {
            // Clap has already printed the help text.
            Ok(true)
        }
    }
}
