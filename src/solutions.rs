//! # Solutions Module / 解答模块
//!
//! The built-in solutions the runner can test. Each solution is a
//! `SolutionModule` declaring its functions and classes with their parameter
//! shapes, plus optional code-level settings. Test data lives next to it in
//! `solutions/<name>/`.
//!
//! 运行器可以测试的内置解答。每个解答都是一个 `SolutionModule`，
//! 声明其函数和类及其参数形状，以及可选的代码级设置。
//! 测试数据位于 `solutions/<name>/` 目录中。

pub mod a_plus_b;
pub mod invert_tree;
pub mod max_depth;
pub mod min_stack;
pub mod reverse_list;
pub mod reverse_words;
pub mod sort_colors;
pub mod two_sum;

use crate::core::solution::SolutionModule;

/// Every registered solution, sorted by name.
pub fn registry() -> Vec<SolutionModule> {
    let mut modules = vec![
        a_plus_b::module(),
        invert_tree::module(),
        max_depth::module(),
        min_stack::module(),
        reverse_list::module(),
        reverse_words::module(),
        sort_colors::module(),
        two_sum::module(),
    ];
    modules.sort_by(|a, b| a.name.cmp(&b.name));
    modules
}

pub fn find(name: &str) -> Option<SolutionModule> {
    registry().into_iter().find(|module| module.name == name)
}

pub fn is_registered(name: &str) -> bool {
    registry().iter().any(|module| module.name == name)
}
