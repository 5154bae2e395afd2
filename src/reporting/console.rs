//! # Console Reporting Module / 控制台报告模块
//!
//! This module renders per-test reports and the final summary, and prints
//! reports to the terminal with the level's color.
//!
//! 此模块渲染每个测试的报告和最终摘要，并按级别颜色将报告打印到终端。

use colored::*;
use serde_json::Value;
use std::time::Duration;

use crate::core::literal::to_literal_string;
use crate::core::results::{ResultKind, RunStatistics, TestResult};
use crate::infra::t;
use crate::reporting::report::{Level, Report, ReportSink, Span, Style};

/// Prints reports to stdout.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleSink;

impl ReportSink for ConsoleSink {
    fn emit(&mut self, report: Report) {
        println!("{}", paint(&report));
    }
}

fn level_color(level: Level) -> Color {
    match level {
        Level::Message => Color::Magenta,
        Level::Info => Color::Green,
        Level::Warning => Color::Yellow,
        Level::Error => Color::Red,
        Level::Debug => Color::Blue,
    }
}

/// Renders a report with ANSI styling.
pub fn paint(report: &Report) -> String {
    let color = level_color(report.level);
    report
        .lines
        .iter()
        .map(|spans| {
            spans
                .iter()
                .map(|span| {
                    let text = span.text.as_str().color(color);
                    match span.style {
                        Style::Plain => text,
                        Style::Bold => text.bold(),
                        Style::Label => text.bold().underline(),
                        Style::Italic => text.italic(),
                        Style::ItalicBold => text.italic().bold(),
                    }
                    .to_string()
                })
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Centers `[ name ]` in a line of `=` of about `width` characters.
///
/// 将 `[ name ]` 居中放在约 `width` 个字符宽的 `=` 线中。
pub fn header(name: &str, width: usize) -> String {
    let name = name.trim();
    let free = width as i64 - name.chars().count() as i64 - 6;
    let (half, odd) = (free.div_euclid(2), free.rem_euclid(2));

    let left = "=".repeat(half.max(0) as usize);
    let right = if half != 0 && odd != 0 {
        format!("{left}=")
    } else {
        left.clone()
    };
    format!("{left} [ {name} ] {right}")
}

/// Formats a duration as `ns`, `us` or `ms` below one second, else seconds
/// rounded to three decimals.
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs_f64();
    for (max, scale, unit) in [(1e-6, 1e9, "ns"), (1e-3, 1e6, "us"), (1.0, 1e3, "ms")] {
        if secs < max {
            return format!("{} {unit}", group_thousands((secs * scale).round() as u64));
        }
    }

    let millis = (secs * 1000.0).round() as u64;
    let fraction = format!("{:03}", millis % 1000);
    let fraction = fraction.trim_end_matches('0');
    format!(
        "{}.{} s",
        group_thousands(millis / 1000),
        if fraction.is_empty() { "0" } else { fraction }
    )
}

/// `1234567` as `1,234,567`.
fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut groups: Vec<&str> = digits
        .as_bytes()
        .rchunks(3)
        .map(|group| std::str::from_utf8(group).unwrap_or_default())
        .collect();
    groups.reverse();
    groups.join(",")
}

fn labeled(label: impl Into<String>, value: impl Into<String>) -> Vec<Span> {
    vec![Span::new(Style::Label, label), Span::plain(value)]
}

fn literal_lines(values: &[Value]) -> String {
    values
        .iter()
        .map(to_literal_string)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Renders the report of one validated test.
///
/// 渲染一个已验证测试的报告。
pub fn render_test(
    result: &TestResult,
    index: usize,
    success: bool,
    expected: Option<&Value>,
    show_time: bool,
    header_width: usize,
) -> Report {
    let level = if success { Level::Info } else { Level::Error };
    let mut report = Report::new(level).text(header(&t!("test_header", index = index), header_width));

    report = match result.kind {
        ResultKind::Classic => render_classic(report, result, success, expected),
        ResultKind::Stream => render_stream(report, result, success, expected),
    };

    if show_time {
        report = report.line(
            Style::ItalicBold,
            t!("report_time", time = format_duration(result.elapsed)),
        );
    }
    report.blank()
}

fn render_classic(mut report: Report, result: &TestResult, success: bool, expected: Option<&Value>) -> Report {
    if !result.args_before.is_empty() {
        report = report.text(literal_lines(&result.args_before));
    }

    if result.args_before != result.args_after {
        report = report.line(Style::Label, t!("report_arguments_after"));
        if !result.args_after.is_empty() {
            report = report.text(literal_lines(&result.args_after));
        }
    }

    let padding = if success { " " } else { "   " };
    report = report.spans(labeled(
        t!("report_result"),
        format!("{padding}{}", to_literal_string(&result.value)),
    ));

    if !success {
        let expected = expected.map(to_literal_string).unwrap_or_else(|| "null".to_string());
        report = report.spans(labeled(t!("report_expected"), format!(" {expected}")));
    }
    report
}

fn stream_text(value: Option<&Value>) -> &str {
    value.and_then(Value::as_str).map(str::trim).unwrap_or_default()
}

fn render_stream(mut report: Report, result: &TestResult, success: bool, expected: Option<&Value>) -> Report {
    let input = stream_text(result.args_before.first());
    let output = stream_text(Some(&result.value));
    let expected = stream_text(expected);
    let mut empty = true;

    if !input.is_empty() {
        report = report.line(Style::Label, t!("report_input")).text(input);
        empty = false;
    }
    if !output.is_empty() {
        report = report.line(Style::Label, t!("report_output")).text(output);
        empty = false;
    }
    if !success && !expected.is_empty() {
        report = report.line(Style::Label, t!("report_expected")).text(expected);
        empty = false;
    }

    if empty {
        report = report.line(Style::Italic, t!("report_no_io"));
    }
    report
}

/// Renders the final summary, plus a warning listing the tests that had no
/// expected value.
///
/// 渲染最终摘要，以及列出没有期望值的测试的警告。
pub fn render_summary(stats: &RunStatistics, show_time: bool, header_width: usize) -> Vec<Report> {
    let level = if stats.all_passed() {
        Level::Info
    } else {
        Level::Warning
    };

    let mut summary = Report::new(level)
        .line(Style::Bold, header(&t!("summary_title"), header_width))
        .line(
            Style::Bold,
            t!("summary_passed", passed = stats.passed, runs = stats.runs),
        );
    if show_time {
        summary = summary.line(
            Style::Bold,
            t!("summary_time", time = format_duration(stats.total_time)),
        );
    }

    let mut reports = vec![summary];
    if !stats.without_expected.is_empty() {
        let indices = stats
            .without_expected
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        reports.push(Report::new(Level::Warning).text(t!(
            "summary_without_expected",
            count = stats.without_expected.len(),
            indices = format!("[{indices}]")
        )));
    }
    reports
}
