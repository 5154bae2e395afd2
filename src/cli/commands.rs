//! # Commands Module / 命令模块
//!
//! One module per subcommand.
//!
//! 每个子命令对应一个模块。

pub mod list;

use anyhow::{Context, Result};
use std::path::Path;

use crate::core::config::RunnerConfig;
use crate::infra::t;

/// Loads the runner configuration and applies its language unless `--lang`
/// was given.
pub(crate) fn load_config(path: &Path, lang_given: bool) -> Result<RunnerConfig> {
    let config = RunnerConfig::load(path)
        .with_context(|| t!("config_load_failed", path = path.display()).to_string())?;
    if !lang_given && !config.language.is_empty() {
        rust_i18n::set_locale(&config.language);
    }
    Ok(config)
}
