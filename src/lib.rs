//! # Solution Runner Library / Solution Runner 库
//!
//! A test harness for algorithm solutions. Solutions are registered in code
//! and run against literal test blocks, inline cases and random generators.
//!
//! 算法解答的测试框架。解答在代码中注册，
//! 并针对字面量测试块、内联用例和随机生成器运行。
//!
//! ## Modules / 模块
//!
//! - `core` - Data model, node codec, strategies and the orchestrator
//! - `infra` - Infrastructure services like the stdio shim, panic capture and file lookups
//! - `reporting` - Test reports and their console rendering
//! - `cli` - Command-line interface and commands
//! - `solutions` - The built-in solutions
//!
//! - `core` - 数据模型、节点编解码、测试策略和编排器
//! - `infra` - 基础设施服务，如标准输入输出兼容层、panic 捕获和文件查找
//! - `reporting` - 测试报告及其控制台渲染
//! - `cli` - 命令行接口和命令
//! - `solutions` - 内置解答

pub mod cli;
pub mod core;
pub mod infra;
pub mod reporting;
pub mod solutions;

pub use crate::core::{config, execution, solution};

/// Sets the interface language from the system locale.
///
/// 根据系统区域设置界面语言。
pub fn init() {
    let detected = sys_locale::get_locale().unwrap_or_default();
    rust_i18n::set_locale(supported_locale(&detected, &rust_i18n::available_locales!()));
}

/// The shipped locale closest to `detected`: an exact match such as `zh-CN`,
/// else its language part (`en` for `en-US`), else `en`.
pub fn supported_locale<'a>(detected: &'a str, available: &[&str]) -> &'a str {
    let language = detected.split(['-', '_']).next().unwrap_or_default();
    [detected, language]
        .into_iter()
        .find(|candidate| available.contains(candidate))
        .unwrap_or("en")
}

rust_i18n::i18n!("locales", fallback = "en");
