//! # List Command Module / 列表命令模块
//!
//! Prints the registered solutions with the tester each one would run with.
//!
//! 打印已注册的解答以及每个解答将使用的测试器。

use anyhow::Result;
use colored::*;
use std::path::PathBuf;

use crate::{
    core::{resolver::Conventions, testers},
    infra::t,
    reporting::header,
    solutions,
};

pub fn execute(config: PathBuf, lang_given: bool) -> Result<()> {
    let config = super::load_config(&config, lang_given)?;
    let conventions = Conventions::from(&config);

    println!("{}", header(&t!("list_title"), config.header_width).bold());
    for module in solutions::registry() {
        let mode = module
            .settings
            .tester
            .or_else(|| testers::detect(&module, &conventions));
        let mode = match mode {
            Some(mode) => mode.to_string().green(),
            None => t!("list_undetected").to_string().yellow(),
        };
        println!("{:<24}{}", module.name, mode);
    }
    Ok(())
}
