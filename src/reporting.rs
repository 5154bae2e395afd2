//! # Reporting Module / 报告模块
//!
//! This module turns test results into reports and delivers them to a sink.
//! Reports are plain data (level plus styled lines), so the same run can be
//! printed in color on the console or collected in memory.
//!
//! 此模块将测试结果转换为报告并交付给接收器。
//! 报告是纯数据（级别加带样式的行），因此同一次运行既可以彩色打印到控制台，
//! 也可以收集在内存中。

pub mod console;
pub mod report;

// Re-export common reporting items
pub use console::{ConsoleSink, format_duration, header};
pub use report::{Level, MemorySink, Report, ReportSink, Span, Style};
