//! # Infrastructure Module / 基础设施模块
//!
//! This module provides infrastructure services for Solution Runner,
//! including file system lookups, panic capture, the stdio shim used by
//! stream solutions, and i18n support.
//!
//! 此模块为 Solution Runner 提供基础设施服务，
//! 包括文件系统查找、panic 捕获、流式解答使用的标准输入输出兼容层以及国际化支持。

pub mod fs;
pub mod panic;
pub mod stdio;

// Re-export i18n functions for easier access
pub use rust_i18n::t;
