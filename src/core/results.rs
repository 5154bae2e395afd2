//! # Results Module / 结果模块
//!
//! A `TestResult` holds what one invocation produced. Validating it decides
//! pass or fail, updates the run's `RunStatistics` exactly once and emits the
//! test's report.
//!
//! `TestResult` 保存一次调用的产出。验证它会判定通过与否，
//! 对本次运行的 `RunStatistics` 恰好更新一次，并输出该测试的报告。

use serde_json::Value;
use std::time::Duration;

use crate::core::config::Validator;
use crate::core::literal::deep_eq;
use crate::reporting::ReportSink;
use crate::reporting::console::{render_summary, render_test};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultKind {
    /// Compared structurally.
    Classic,
    /// Compared token by token, ignoring whitespace layout.
    Stream,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TestResult {
    /// Return value, structures already flattened to literals.
    pub value: Value,
    pub elapsed: Duration,
    pub args_before: Vec<Value>,
    /// Equal to `args_before` unless the call mutated an argument in place.
    pub args_after: Vec<Value>,
    pub kind: ResultKind,
    /// One line per call made, for debug output.
    pub trace: Vec<String>,
}

/// Rendering options shared by test reports and the summary.
#[derive(Debug, Clone, Copy)]
pub struct ReportOptions {
    pub show_time: bool,
    pub header_width: usize,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            show_time: false,
            header_width: 40,
        }
    }
}

impl TestResult {
    /// Default comparison for this kind of result.
    pub fn matches(&self, expected: &Value) -> bool {
        match self.kind {
            ResultKind::Classic => deep_eq(&self.value, expected),
            ResultKind::Stream => match (self.value.as_str(), expected.as_str()) {
                (Some(actual), Some(expected)) => tokens_match(actual, expected),
                _ => deep_eq(&self.value, expected),
            },
        }
    }

    /// Decides the verdict, records it in `stats` and emits the report.
    ///
    /// An absent expected value passes and is listed as such in the summary.
    /// Otherwise `validator` decides if given, else the default comparison.
    ///
    /// 判定结果，记录到 `stats` 并输出报告。
    pub fn validate(
        &self,
        expected: Option<&Value>,
        validator: Option<&Validator>,
        stats: &mut RunStatistics,
        sink: &mut dyn ReportSink,
        options: ReportOptions,
    ) -> bool {
        stats.runs += 1;
        stats.total_time += self.elapsed;

        let success = match (expected, validator) {
            (None, _) => {
                stats.without_expected.push(stats.runs);
                true
            }
            (Some(expected), Some(validator)) => {
                validator(&self.args_before, &self.args_after, Some(expected), &self.value)
            }
            (Some(expected), None) => self.matches(expected),
        };
        if success {
            stats.passed += 1;
        }

        sink.emit(render_test(
            self,
            stats.runs,
            success,
            expected,
            options.show_time,
            options.header_width,
        ));
        success
    }
}

/// Compares two texts as sequences of whitespace-separated tokens.
pub fn tokens_match(actual: &str, expected: &str) -> bool {
    actual.split_whitespace().eq(expected.split_whitespace())
}

/// Counters of one run, created by the orchestrator and threaded through
/// every validation.
///
/// 一次运行的计数器，由编排器创建并在每次验证中传递。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunStatistics {
    pub runs: usize,
    pub passed: usize,
    /// 1-based indices of the tests that had no expected value.
    pub without_expected: Vec<usize>,
    pub total_time: Duration,
}

impl RunStatistics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failed(&self) -> usize {
        self.runs - self.passed
    }

    pub fn all_passed(&self) -> bool {
        self.passed == self.runs
    }

    /// Emits the final summary.
    pub fn report(&self, sink: &mut dyn ReportSink, options: ReportOptions) {
        for report in render_summary(self, options.show_time, options.header_width) {
            sink.emit(report);
        }
    }
}
