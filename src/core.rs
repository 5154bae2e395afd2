//! # Core Module / 核心模块
//!
//! This module contains the core functionality of Solution Runner:
//! the literal parser, the node codec, the solution model, target
//! resolution, the four testing strategies and the orchestrator.
//!
//! 此模块包含 Solution Runner 的核心功能：
//! 字面量解析器、节点编解码、解答模型、目标解析、四种测试策略以及编排器。

pub mod config;
pub mod error;
pub mod execution;
pub mod literal;
pub mod nodes;
pub mod resolver;
pub mod results;
pub mod solution;
pub mod testers;

// Re-exports
pub use config::{RunnerConfig, Settings};
pub use error::{HarnessError, HarnessResult};
pub use execution::{RunOptions, TestSources, test_solution};
pub use resolver::{Mode, Target};
pub use results::{RunStatistics, TestResult};
pub use solution::{Arg, ClassDecl, FunctionDecl, Param, Shape, SolutionModule, TargetError};
pub use testers::Tester;
